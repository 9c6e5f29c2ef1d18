use crate::core::coerce;
use crate::domain::model::{FeedSnapshot, NormalizedFeed, Stage, StockItem, Well};
use chrono::{NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};

/// Fixed number of well columns in the source sheet, populated or not.
pub const WELL_SLOTS: usize = 6;

/// Row 0 is the header, row 1 is reserved; stage data starts here.
const FIRST_DATA_ROW: usize = 2;

const ROW_LABEL_KEY: &str = "Fila";
const SEQUENCE_KEY: &str = "SecuenciaPozo";
const DEPTH_KEY: &str = "TPNPozo";
const FRACTURE_KEY: &str = "FechaFracPozo";

/// Header cells carrying this value mark the slot as unnamed.
const UNNAMED_SENTINEL: &str = "X";

/// Reshapes the spreadsheet-shaped payload into one stage list per well.
///
/// Best-effort and total: malformed input degrades to placeholder wells or
/// absent fields, never to an error. Empty well columns stay in the output;
/// the slot count is always [`WELL_SLOTS`].
pub fn normalize(payload: &Value) -> NormalizedFeed {
    let items = match payload.get("items").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => {
            return NormalizedFeed {
                wells: placeholder_wells(),
            }
        }
    };

    let header = items.first().and_then(Value::as_object);
    let mut wells: Vec<Well> = (1..=WELL_SLOTS)
        .map(|slot| Well {
            name: well_name(header, slot),
            stages: Vec::new(),
        })
        .collect();

    for row in items.iter().skip(FIRST_DATA_ROW) {
        let Some(record) = row.as_object() else {
            continue;
        };
        // A row without a label contributes no stage to any well.
        let label = match field_text(record, ROW_LABEL_KEY) {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => continue,
        };
        for (index, well) in wells.iter_mut().enumerate() {
            well.stages.push(build_stage(record, index + 1, label.clone()));
        }
    }

    NormalizedFeed { wells }
}

/// [`normalize`] plus the passthrough side channels (`lastUpdate`, `stock`).
pub fn snapshot(payload: &Value) -> FeedSnapshot {
    FeedSnapshot {
        feed: normalize(payload),
        last_update: payload
            .get("lastUpdate")
            .and_then(Value::as_str)
            .map(str::to_string),
        stock: stock_items(payload),
    }
}

fn placeholder_wells() -> Vec<Well> {
    (1..=WELL_SLOTS)
        .map(|slot| Well {
            name: placeholder_name(slot),
            stages: Vec::new(),
        })
        .collect()
}

fn placeholder_name(slot: usize) -> String {
    format!("Pozo {}", slot)
}

// Alternate key first, then the primary, then the synthesized placeholder.
fn well_name(header: Option<&Map<String, Value>>, slot: usize) -> String {
    let Some(header) = header else {
        return placeholder_name(slot);
    };
    header_cell(header, &format!("{}{}", FRACTURE_KEY, slot))
        .or_else(|| header_cell(header, &format!("{}{}", DEPTH_KEY, slot)))
        .unwrap_or_else(|| placeholder_name(slot))
}

// A usable name is non-empty after trimming and not the "X" sentinel.
fn header_cell(header: &Map<String, Value>, key: &str) -> Option<String> {
    let text = field_text(header, key)?;
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNNAMED_SENTINEL) {
        return None;
    }
    Some(trimmed.to_string())
}

fn build_stage(record: &Map<String, Value>, slot: usize, label: String) -> Stage {
    let timestamp = record
        .get(&format!("{}{}", SEQUENCE_KEY, slot))
        .and_then(coerce::coerce_date_value);
    let depth = record
        .get(&format!("{}{}", DEPTH_KEY, slot))
        .and_then(coerce::coerce_f64);

    let (fracture_date, fracture_date_text) =
        match record.get(&format!("{}{}", FRACTURE_KEY, slot)) {
            Some(raw) => match coerce::coerce_date_value(raw) {
                Some(date) => (Some(date), Some(display_date(&date))),
                // Free text such as "FRACTURADO" stays visible as-is.
                None => (None, raw_display_text(raw)),
            },
            None => (None, None),
        };

    Stage {
        label,
        timestamp,
        depth,
        fracture_date,
        fracture_date_text,
    }
}

fn display_date(date: &NaiveDateTime) -> String {
    if date.time() == NaiveTime::MIN {
        date.format("%d/%m/%Y").to_string()
    } else {
        date.format("%d/%m/%Y %H:%M").to_string()
    }
}

fn raw_display_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn field_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn stock_items(payload: &Value) -> Vec<StockItem> {
    payload
        .get("stock")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(|entry| StockItem {
                    item: field_text(entry, "ITEM").unwrap_or_default(),
                    stock: entry.get("STOCK").cloned().unwrap_or(Value::Null),
                })
                .collect()
        })
        .unwrap_or_default()
}
