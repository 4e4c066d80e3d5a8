//! The `persistence` module records every relayed message, keyed by the
//! conversation's `PairKey`.
//!
//! Two backends implement `Recorder`:
//! - `FileLog` appends one text line per message to `{dir}/{pair}.txt`.
//! - `SledStore` keeps one `sled` tree per pair with chronological keys.
//!
//! The timestamp is chosen by the caller and passed in, so backends only
//! format and store.

pub mod file_log;
pub mod sled_store;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use tracing::info;

use crate::config::StorageSettings;
use crate::pair::PairKey;
use crate::utils::ChatError;

pub use file_log::FileLog;
pub use sled_store::{SledStore, StoredMessage};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[async_trait]
pub trait Recorder: Send + Sync {
    /// Persist one message of the pair's conversation.
    async fn record(&self, pair: &PairKey, at: DateTime<Local>, message: &str)
    -> Result<(), ChatError>;

    /// Every recorded line of the conversation, oldest first.
    async fn history(&self, pair: &PairKey) -> Result<Vec<String>, ChatError>;
}

/// Render a record the way it is stored on disk: `{timestamp} | {message}`.
pub fn format_line(at: &DateTime<Local>, message: &str) -> String {
    format!("{} | {}", at.format(TIMESTAMP_FORMAT), message)
}

/// Open the backend selected in configuration.
pub fn open(settings: &StorageSettings) -> Result<Arc<dyn Recorder>, ChatError> {
    let recorder: Arc<dyn Recorder> = match settings.backend.trim().to_lowercase().as_str() {
        "file" => Arc::new(FileLog::open(&settings.dir)?),
        "sled" => Arc::new(SledStore::open(&settings.dir)?),
        other => return Err(ChatError::UnknownBackend(other.to_string())),
    };
    info!(backend = %settings.backend, dir = %settings.dir, "storage ready");
    Ok(recorder)
}
