pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::http::HttpFeedSource;
pub use crate::adapters::store::{JsonFileStore, MemoryStore};
pub use crate::core::change::{has_changed, ChangeDetector};
pub use crate::core::engine::PollEngine;
pub use crate::core::normalize::{normalize, snapshot};
pub use crate::core::prefs::DisplayPrefs;
pub use crate::utils::error::{FeedError, Result};
