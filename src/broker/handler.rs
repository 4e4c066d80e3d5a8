use async_trait::async_trait;

use crate::utils::ChatError;

/// A unit of behavior invoked with the payload of every message published to
/// the topic it is subscribed to.
///
/// `key` identifies the handler for deduplication: the bus keeps at most one
/// handler per key per topic, so two separately constructed handlers with
/// the same key count as the same subscriber.
#[async_trait]
pub trait Handler: Send + Sync {
    fn key(&self) -> &str;

    async fn handle(&self, message: &str) -> Result<(), ChatError>;
}
