use serde_json::Value;

/// Deep comparison of two raw feed payloads, field order included: the
/// serialized forms are compared byte for byte (serde_json is built with
/// `preserve_order`). False only for structurally identical payloads.
pub fn has_changed(previous: &Value, candidate: &Value) -> bool {
    match (
        serde_json::to_string(previous),
        serde_json::to_string(candidate),
    ) {
        (Ok(a), Ok(b)) => a != b,
        _ => true,
    }
}

/// Re-render gate for the poll loop. Holds the serialized form of the last
/// observed payload; not a diff mechanism — a change means the consumer
/// rebuilds wholesale.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    snapshot: Option<String>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `payload` differs from the previous observation (always
    /// true for the first one); records it as the new snapshot.
    pub fn observe(&mut self, payload: &Value) -> bool {
        let serialized = match serde_json::to_string(payload) {
            Ok(s) => s,
            Err(_) => return true,
        };
        let changed = self.snapshot.as_deref() != Some(serialized.as_str());
        if changed {
            self.snapshot = Some(serialized);
        }
        changed
    }
}
