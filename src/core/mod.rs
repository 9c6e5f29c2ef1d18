pub mod change;
pub mod coerce;
pub mod engine;
pub mod normalize;
pub mod prefs;

pub use crate::domain::model::{FeedSnapshot, NormalizedFeed, Stage, StockItem, Well};
pub use crate::domain::ports::{ConfigProvider, FeedSource, KeyValueStore};
pub use crate::utils::error::Result;
