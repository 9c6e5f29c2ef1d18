use crate::core::change::ChangeDetector;
use crate::core::normalize;
use crate::domain::model::FeedSnapshot;
use crate::domain::ports::FeedSource;
use crate::utils::error::Result;

/// Drives one poll cycle at a time: fetch, gate on change, normalize.
/// The periodic scheduling lives with the caller; the engine never sleeps.
pub struct PollEngine<F: FeedSource> {
    source: F,
    detector: ChangeDetector,
    polls: u64,
    updates: u64,
}

impl<F: FeedSource> PollEngine<F> {
    pub fn new(source: F) -> Self {
        Self {
            source,
            detector: ChangeDetector::new(),
            polls: 0,
            updates: 0,
        }
    }

    /// `Ok(None)` means the payload was identical to the previous poll and
    /// no rebuild is needed. Fetch errors propagate without touching the
    /// detector state, so the next successful poll compares against the
    /// last payload actually seen.
    pub async fn poll_once(&mut self) -> Result<Option<FeedSnapshot>> {
        let payload = self.source.fetch().await?;
        self.polls += 1;

        if !self.detector.observe(&payload) {
            tracing::debug!("feed unchanged, skipping rebuild");
            return Ok(None);
        }

        self.updates += 1;
        let snapshot = normalize::snapshot(&payload);
        tracing::info!(
            wells = snapshot.feed.wells.len(),
            stages = snapshot
                .feed
                .wells
                .iter()
                .map(|w| w.stages.len())
                .sum::<usize>(),
            "feed changed, rebuilt snapshot"
        );
        Ok(Some(snapshot))
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FeedError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Value>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Value>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl FeedSource for ScriptedSource {
        async fn fetch(&self) -> Result<Value> {
            self.responses
                .lock()
                .expect("scripted source lock")
                .pop_front()
                .unwrap_or_else(|| {
                    Err(FeedError::ProcessingError {
                        message: "script exhausted".to_string(),
                    })
                })
        }
    }

    fn payload(label: &str) -> Value {
        json!({"items": [{}, {}, {"Fila": label}]})
    }

    #[tokio::test]
    async fn test_first_poll_produces_snapshot() {
        let mut engine = PollEngine::new(ScriptedSource::new(vec![Ok(payload("1"))]));
        let snapshot = engine.poll_once().await.unwrap();
        assert!(snapshot.is_some());
        assert_eq!(engine.polls(), 1);
        assert_eq!(engine.updates(), 1);
    }

    #[tokio::test]
    async fn test_identical_poll_is_suppressed() {
        let mut engine = PollEngine::new(ScriptedSource::new(vec![
            Ok(payload("1")),
            Ok(payload("1")),
            Ok(payload("2")),
        ]));

        assert!(engine.poll_once().await.unwrap().is_some());
        assert!(engine.poll_once().await.unwrap().is_none());
        assert!(engine.poll_once().await.unwrap().is_some());
        assert_eq!(engine.polls(), 3);
        assert_eq!(engine.updates(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_and_keeps_detector_state() {
        let mut engine = PollEngine::new(ScriptedSource::new(vec![
            Ok(payload("1")),
            Err(FeedError::ProcessingError {
                message: "boom".to_string(),
            }),
            Ok(payload("1")),
        ]));

        assert!(engine.poll_once().await.unwrap().is_some());
        assert!(engine.poll_once().await.is_err());
        // The failed poll did not clear the snapshot, so the repeat payload
        // still reads as unchanged.
        assert!(engine.poll_once().await.unwrap().is_none());
    }
}
