//! Publish/subscribe bus
//!
//! The bus maps topic names to ordered handler lists. It is constructed once
//! at startup and shared behind an `Arc`.
//!
//! Concurrency and usage notes:
//! - Topics live in a `DashMap`, so subscribe-if-absent runs under the lock
//!   of the topic's entry and two racing subscribers for the same key can
//!   never both get in.
//! - `publish` snapshots the handler list and drops the lock before awaiting
//!   any handler. A slow handler (for example a stalled disk write) holds up
//!   only the publisher that invoked it, never other topics or subscribers.
//! - Handler failures are isolated: they are logged and counted, and the
//!   remaining handlers still run.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::Handler;
use super::topic::Topic;
use crate::utils::Fanout;

#[derive(Debug, Default)]
pub struct Bus {
    topics: DashMap<String, Topic>,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            topics: DashMap::new(),
        }
    }

    /// Subscribes a handler to a topic. Automatically creates the topic if it
    /// doesn't exist. Returns `false` when a handler with the same key was
    /// already subscribed, in which case nothing changes.
    pub fn subscribe(&self, topic: &str, handler: Arc<dyn Handler>) -> bool {
        let key = handler.key().to_string();
        let added = self
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic))
            .subscribe(handler);

        if added {
            debug!(topic, handler = %key, "subscribed handler");
        }
        added
    }

    /// Invokes every handler of `topic` in subscription order and returns
    /// once all of them have finished. Publishing to a topic nobody
    /// subscribed to is a no-op.
    pub async fn publish(&self, topic: &str, message: &str) -> Fanout {
        let handlers = self.topics.get(topic).map(|t| t.handlers().to_vec());
        let Some(handlers) = handlers else {
            debug!(topic, "publish to topic without subscribers");
            return Fanout::default();
        };

        let mut fanout = Fanout::default();
        for handler in handlers {
            match handler.handle(message).await {
                Ok(()) => fanout.delivered += 1,
                Err(e) => {
                    warn!(topic, handler = handler.key(), error = %e, "handler failed");
                    fanout.failed += 1;
                }
            }
        }
        fanout
    }

    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.topics.get(topic).map(|t| t.len()).unwrap_or(0)
    }
}
