use crate::domain::ports::{ConfigProvider, FeedSource};
use crate::utils::error::{FeedError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Production feed source: one GET per poll against the dashboard endpoint.
pub struct HttpFeedSource {
    client: Client,
    url: String,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: None,
            headers: HashMap::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut source = Self::new(config.feed_url().to_string());
        if let Some(secs) = config.request_timeout_secs() {
            source = source.with_timeout(Duration::from_secs(secs));
        }
        source
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<Value> {
        let mut request = self.client.get(&self.url);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("requesting feed from: {}", self.url);
        let response = request.send().await?;
        tracing::debug!("feed response status: {}", response.status());

        if !response.status().is_success() {
            return Err(FeedError::ProcessingError {
                message: format!("feed request failed with status: {}", response.status()),
            });
        }

        Ok(response.json().await?)
    }
}
