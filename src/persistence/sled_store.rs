//! Persistence layer backed by `sled`
//!
//! This stores messages per conversation in a `sled` tree named after the
//! pair. Each key is prefixed with a zero-padded millisecond timestamp so
//! iteration yields messages in chronological order; a UUID suffix keeps
//! keys unique when two messages land in the same millisecond.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use sled::Db;
use tracing::warn;
use uuid::Uuid;

use super::{Recorder, format_line};
use crate::pair::PairKey;
use crate::utils::ChatError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoredMessage {
    pub pair: String,
    pub message: String,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: i64,
}

impl StoredMessage {
    pub fn recorded_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }
}

#[derive(Clone)]
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create a sled database at `path`.
    pub fn open(path: &str) -> Result<Self, ChatError> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    /// Raw stored records of a conversation, oldest first.
    pub fn load_messages(&self, pair: &PairKey) -> Result<Vec<StoredMessage>, ChatError> {
        let tree = self.db.open_tree(pair.to_string())?;
        let mut messages = Vec::new();
        for entry in tree.iter() {
            let (key, value) = entry?;
            match serde_json::from_slice::<StoredMessage>(&value) {
                Ok(msg) => messages.push(msg),
                Err(e) => {
                    warn!(pair = %pair, key = ?key, error = %e, "skipping unreadable record")
                }
            }
        }
        Ok(messages)
    }
}

#[async_trait]
impl Recorder for SledStore {
    async fn record(
        &self,
        pair: &PairKey,
        at: DateTime<Local>,
        message: &str,
    ) -> Result<(), ChatError> {
        let stored = StoredMessage {
            pair: pair.to_string(),
            message: message.to_string(),
            timestamp: at.timestamp_millis(),
        };
        let serialized = serde_json::to_vec(&stored)?;

        let tree = self.db.open_tree(&stored.pair)?;
        let key = format!("{:020}_{}", stored.timestamp, Uuid::new_v4());
        tree.insert(key.as_bytes(), serialized)?;
        Ok(())
    }

    async fn history(&self, pair: &PairKey) -> Result<Vec<String>, ChatError> {
        Ok(self
            .load_messages(pair)?
            .into_iter()
            .filter_map(|msg| {
                let at = msg.recorded_at()?;
                Some(format_line(&at, &msg.message))
            })
            .collect())
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("db", &"sled::Db")
            .finish()
    }
}
