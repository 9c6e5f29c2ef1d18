use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "wellfeed")]
#[command(about = "Polls a drilling-stage JSON feed and keeps a normalized per-well view")]
pub struct CliConfig {
    /// Feed endpoint returning the dashboard JSON document.
    #[arg(long)]
    pub feed_url: String,

    /// Seconds between polls.
    #[arg(long, default_value = "30")]
    pub poll_interval: u64,

    /// Per-request timeout in seconds.
    #[arg(long, default_value = "10")]
    pub request_timeout: u64,

    /// File holding display preferences between runs.
    #[arg(long, default_value = "./wellfeed_prefs.json")]
    pub prefs_file: String,

    /// Poll a single time, print the snapshot, and exit.
    #[arg(long)]
    pub once: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process resource usage per poll cycle")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn feed_url(&self) -> &str {
        &self.feed_url
    }

    fn poll_interval_secs(&self) -> u64 {
        self.poll_interval
    }

    fn request_timeout_secs(&self) -> Option<u64> {
        Some(self.request_timeout)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("feed_url", &self.feed_url)?;
        validation::validate_positive_number("poll_interval", self.poll_interval, 1)?;
        validation::validate_positive_number("request_timeout", self.request_timeout, 1)?;
        validation::validate_path("prefs_file", &self.prefs_file)?;
        Ok(())
    }
}
