use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The polling collaborator. The engine calls this once per cycle and never
/// initiates, blocks on, or cancels anything else.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Value>;
}

/// Injected persistence for display preferences.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn feed_url(&self) -> &str;
    fn poll_interval_secs(&self) -> u64;
    fn request_timeout_secs(&self) -> Option<u64>;
}
