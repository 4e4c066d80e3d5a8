//! The `error` module defines the error type used throughout `pairchat`.
//!
//! None of these errors is fatal to the process. Routing code isolates them
//! per handler or per connection and logs them; only bootstrap code (binding
//! the listener, opening storage, loading configuration) propagates them up.

use thiserror::Error;

use crate::client::ConnectionId;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// The writer side of a connection is gone; the transport will surface
    /// its own closed signal shortly.
    #[error("connection {0} is closed")]
    ConnectionClosed(ConnectionId),

    #[error("unknown storage backend '{0}'")]
    UnknownBackend(String),
}
