use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of drilling progress for a single well. Every field except the
/// label is optional on the wire; absent means absent, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub label: String,
    pub timestamp: Option<NaiveDateTime>,
    pub depth: Option<f64>,
    pub fracture_date: Option<NaiveDateTime>,
    pub fracture_date_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub name: String,
    pub stages: Vec<Stage>,
}

/// Always exactly six wells, in source slot order, rebuilt wholesale on
/// every normalization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeed {
    pub wells: Vec<Well>,
}

/// Stock record passed through from the feed untouched; STOCK arrives as
/// either a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub item: String,
    pub stock: Value,
}

/// What one changed poll produces for the rendering side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub feed: NormalizedFeed,
    pub last_update: Option<String>,
    pub stock: Vec<StockItem>,
}
