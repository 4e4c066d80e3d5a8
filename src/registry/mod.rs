//! The `registry` module tracks which live connections belong to which
//! conversation.
//!
//! Identities are normalized into a `PairKey` before any lookup or insert,
//! so `(alice, bob)` and `(bob, alice)` share one connection set. Sets are
//! unordered and unbounded, which lets a participant be connected from more
//! than one device at a time.
//!
//! Concurrency notes:
//! - Pairs live in a `DashMap`; create-or-add and remove-then-prune each run
//!   under the lock of the pair's entry.
//! - `broadcast_private` copies the pair's set under that lock and sends
//!   outside of it. A connection leaving mid-broadcast may or may not still
//!   receive the message, but the broadcast itself never fails.
//! - The registry only does bookkeeping. It never closes a connection; the
//!   transport owns the socket and its teardown.

use std::collections::HashMap;
use std::future::Future;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};

use crate::client::{Connection, ConnectionId};
use crate::pair::PairKey;
use crate::utils::Fanout;

#[derive(Debug, Default)]
pub struct Registry {
    pairs: DashMap<PairKey, HashMap<ConnectionId, Connection>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            pairs: DashMap::new(),
        }
    }

    /// Completes the connection's handshake and adds it to the pair's set.
    ///
    /// Registration happens only after `handshake` succeeds, so a connection
    /// in the registry is always live. If the handshake fails its error is
    /// returned and nothing is registered.
    pub async fn connect<F, E>(&self, a: &str, b: &str, handshake: F) -> Result<Connection, E>
    where
        F: Future<Output = Result<Connection, E>>,
    {
        let connection = handshake.await?;
        let key = PairKey::new(a, b);
        let pair = key.to_string();

        let size = {
            let mut set = self.pairs.entry(key).or_default();
            set.insert(connection.id(), connection.clone());
            set.len()
        };

        debug!(%pair, connection = %connection.id(), size, "connection registered");
        Ok(connection)
    }

    /// Removes `connection` from the pair's set and prunes the pair once its
    /// set is empty. Removing a connection that is not registered is a no-op.
    /// Returns whether anything was removed.
    pub fn disconnect(&self, a: &str, b: &str, connection: &Connection) -> bool {
        let key = PairKey::new(a, b);
        let pair = key.to_string();

        let removed = match self.pairs.entry(key) {
            Entry::Occupied(mut entry) => {
                let removed = entry.get_mut().remove(&connection.id()).is_some();
                if entry.get().is_empty() {
                    entry.remove();
                    debug!(%pair, "last connection left, pair pruned");
                }
                removed
            }
            Entry::Vacant(_) => false,
        };

        if removed {
            debug!(%pair, connection = %connection.id(), "connection deregistered");
        }
        removed
    }

    /// Sends `message` to every connection of the pair.
    ///
    /// A failed send is logged and counted but the connection stays
    /// registered: the transport reports its own closed signal, which is what
    /// triggers `disconnect`. Broadcasting to a pair with no connections is a
    /// no-op.
    pub fn broadcast_private(&self, a: &str, b: &str, message: &str) -> Fanout {
        let key = PairKey::new(a, b);
        let targets: Vec<Connection> = self
            .pairs
            .get(&key)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default();

        let mut fanout = Fanout::default();
        for connection in targets {
            match connection.send_text(message) {
                Ok(()) => fanout.delivered += 1,
                Err(e) => {
                    warn!(pair = %key, error = %e, "failed to deliver message");
                    fanout.failed += 1;
                }
            }
        }
        fanout
    }

    /// Number of pairs with at least one live connection.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn connection_count(&self, a: &str, b: &str) -> usize {
        self.pairs
            .get(&PairKey::new(a, b))
            .map(|set| set.len())
            .unwrap_or(0)
    }
}
