//! The `chat` module is the routing entry point between two participants.
//!
//! `ChatRouter` wires the bus, the registry and the storage backend together
//! for each connection:
//! - `join` subscribes the conversation's record handler (deduplicated by the
//!   bus) and registers the connection,
//! - `relay` attributes an inbound message to its sender, records it through
//!   the bus and fans it out to every connection of the pair,
//! - `leave` removes the connection from the registry. Bus subscriptions are
//!   kept for the lifetime of the process.

pub mod record;

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use crate::broker::Bus;
use crate::client::Connection;
use crate::pair::PairKey;
use crate::persistence::Recorder;
use crate::registry::Registry;
use crate::utils::Fanout;

pub use record::RecordHandler;

pub struct ChatRouter {
    bus: Arc<Bus>,
    registry: Arc<Registry>,
    recorder: Arc<dyn Recorder>,
}

impl ChatRouter {
    pub fn new(bus: Arc<Bus>, registry: Arc<Registry>, recorder: Arc<dyn Recorder>) -> Self {
        Self {
            bus,
            registry,
            recorder,
        }
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn recorder(&self) -> &Arc<dyn Recorder> {
        &self.recorder
    }

    /// Make sure the conversation is recorded, then register the connection
    /// once `handshake` succeeds.
    pub async fn join<F, E>(&self, sender: &str, peer: &str, handshake: F) -> Result<Connection, E>
    where
        F: Future<Output = Result<Connection, E>>,
    {
        let pair = PairKey::new(sender, peer);
        let handler = RecordHandler::new(pair.clone(), self.recorder.clone());
        self.bus.subscribe(&pair.topic(), Arc::new(handler));

        let connection = self.registry.connect(sender, peer, handshake).await?;
        info!(%pair, %sender, connection = %connection.id(), "connected");
        Ok(connection)
    }

    /// Record `text` as sent by `sender` and deliver it to every live
    /// connection of the conversation.
    ///
    /// Recording and delivery are separate failure domains: a storage error
    /// is logged by the bus and the message is still delivered.
    pub async fn relay(&self, sender: &str, peer: &str, text: &str) -> Fanout {
        let pair = PairKey::new(sender, peer);
        let message = format!("{sender}: {text}");

        let recorded = self.bus.publish(&pair.topic(), &message).await;
        if recorded.failed > 0 {
            warn!(%pair, "message delivered without being recorded");
        }

        self.registry.broadcast_private(sender, peer, &message)
    }

    /// Forget the connection. The socket itself is left to the transport.
    pub fn leave(&self, sender: &str, peer: &str, connection: &Connection) {
        if self.registry.disconnect(sender, peer, connection) {
            info!(pair = %PairKey::new(sender, peer), %sender, connection = %connection.id(), "disconnected");
        }
    }
}

#[cfg(test)]
mod tests;
