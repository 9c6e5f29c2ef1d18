use crate::domain::model::{NormalizedFeed, StockItem, Well};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Store key for the serialized preference blob.
pub const PREFS_KEY: &str = "display_prefs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    // The board runs on TVs, so dark is the default.
    #[default]
    Dark,
    Light,
}

/// User display flags for the board: which wells and stock items to hide,
/// per-well header colors, auto-scroll and theme. Explicit state passed
/// around and persisted through an injected store, never module globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayPrefs {
    pub hidden_wells: Vec<String>,
    pub hidden_stock: Vec<String>,
    pub header_colors: HashMap<String, String>,
    pub auto_scroll: bool,
    pub theme: Theme,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        Self {
            hidden_wells: Vec::new(),
            hidden_stock: Vec::new(),
            header_colors: HashMap::new(),
            auto_scroll: true,
            theme: Theme::default(),
        }
    }
}

impl DisplayPrefs {
    /// Best-effort load: a missing key, an unreadable store, or a corrupt
    /// blob all degrade to the defaults.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(PREFS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!("stored preferences unreadable, using defaults: {}", err);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(err) => {
                tracing::warn!("preference store unavailable, using defaults: {}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        store.set(PREFS_KEY, &raw)
    }

    pub fn toggle_well(&mut self, name: &str) {
        toggle(&mut self.hidden_wells, name);
    }

    pub fn toggle_stock_item(&mut self, item: &str) {
        toggle(&mut self.hidden_stock, item);
    }

    pub fn is_well_hidden(&self, name: &str) -> bool {
        self.hidden_wells.iter().any(|hidden| hidden == name)
    }

    pub fn visible_wells<'a>(&self, feed: &'a NormalizedFeed) -> Vec<&'a Well> {
        feed.wells
            .iter()
            .filter(|well| !self.is_well_hidden(&well.name))
            .collect()
    }

    pub fn visible_stock<'a>(&self, stock: &'a [StockItem]) -> Vec<&'a StockItem> {
        stock
            .iter()
            .filter(|entry| !self.hidden_stock.iter().any(|hidden| hidden == &entry.item))
            .collect()
    }

    pub fn header_color(&self, well: &str) -> Option<&str> {
        self.header_colors.get(well).map(String::as_str)
    }

    pub fn set_header_color(&mut self, well: &str, color: &str) {
        self.header_colors
            .insert(well.to_string(), color.to_string());
    }
}

fn toggle(list: &mut Vec<String>, value: &str) {
    if let Some(pos) = list.iter().position(|entry| entry == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MemoryStore;
    use crate::domain::model::Stage;
    use serde_json::json;

    fn well(name: &str) -> Well {
        Well {
            name: name.to_string(),
            stages: vec![Stage {
                label: "1".to_string(),
                timestamp: None,
                depth: None,
                fracture_date: None,
                fracture_date_text: None,
            }],
        }
    }

    #[test]
    fn test_defaults() {
        let prefs = DisplayPrefs::default();
        assert!(prefs.hidden_wells.is_empty());
        assert!(prefs.auto_scroll);
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn test_toggle_well_round_trips() {
        let mut prefs = DisplayPrefs::default();
        prefs.toggle_well("Well-A");
        assert!(prefs.is_well_hidden("Well-A"));
        prefs.toggle_well("Well-A");
        assert!(!prefs.is_well_hidden("Well-A"));
    }

    #[test]
    fn test_visible_wells_applies_hidden_list() {
        let feed = NormalizedFeed {
            wells: vec![well("Well-A"), well("Well-B"), well("Pozo 3")],
        };
        let mut prefs = DisplayPrefs::default();
        prefs.toggle_well("Well-B");

        let visible: Vec<&str> = prefs
            .visible_wells(&feed)
            .iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(visible, vec!["Well-A", "Pozo 3"]);
    }

    #[test]
    fn test_visible_stock_applies_hidden_list() {
        let stock = vec![
            StockItem {
                item: "Cement".to_string(),
                stock: json!(3),
            },
            StockItem {
                item: "Casing".to_string(),
                stock: json!("ok"),
            },
        ];
        let mut prefs = DisplayPrefs::default();
        prefs.toggle_stock_item("Cement");

        let visible = prefs.visible_stock(&stock);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].item, "Casing");
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = MemoryStore::new();
        let mut prefs = DisplayPrefs::default();
        prefs.toggle_well("Well-A");
        prefs.set_header_color("Well-A", "#ff8800");
        prefs.auto_scroll = false;
        prefs.theme = Theme::Light;
        prefs.save(&store).unwrap();

        let loaded = DisplayPrefs::load(&store);
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.header_color("Well-A"), Some("#ff8800"));
    }

    #[test]
    fn test_missing_key_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(DisplayPrefs::load(&store), DisplayPrefs::default());
    }

    #[test]
    fn test_corrupt_blob_loads_defaults() {
        let store = MemoryStore::new();
        store.set(PREFS_KEY, "{not json").unwrap();
        assert_eq!(DisplayPrefs::load(&store), DisplayPrefs::default());
    }
}
