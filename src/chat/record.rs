use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;

use crate::broker::Handler;
use crate::pair::PairKey;
use crate::persistence::Recorder;
use crate::utils::ChatError;

/// Bus handler that writes every message of one conversation to storage.
///
/// The handler carries its pair as a field and uses the pair's topic as its
/// key, so every handler built for the same conversation deduplicates to a
/// single subscription.
pub struct RecordHandler {
    pair: PairKey,
    key: String,
    recorder: Arc<dyn Recorder>,
}

impl RecordHandler {
    pub fn new(pair: PairKey, recorder: Arc<dyn Recorder>) -> Self {
        Self {
            key: pair.topic(),
            pair,
            recorder,
        }
    }
}

#[async_trait]
impl Handler for RecordHandler {
    fn key(&self) -> &str {
        &self.key
    }

    async fn handle(&self, message: &str) -> Result<(), ChatError> {
        self.recorder.record(&self.pair, Local::now(), message).await
    }
}
