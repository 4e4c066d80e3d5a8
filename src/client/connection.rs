//! Connection handle
//!
//! `Connection` holds the sending side of a per-connection channel. The
//! transport owns the socket and drains the receiving side into it; every
//! other component (registry, router) only ever holds a clone of this handle
//! and can push text through it, never close it.

use std::fmt;

use tokio::sync::mpsc::UnboundedSender;
use tungstenite::protocol::Message as WsMessage;
use uuid::Uuid;

use crate::utils::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    sender: UnboundedSender<WsMessage>,
}

impl Connection {
    /// Wrap the sending side of a connection's outbound channel.
    pub fn new(sender: UnboundedSender<WsMessage>) -> Self {
        Self {
            id: ConnectionId::new(),
            sender,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a text frame for this connection.
    ///
    /// Fails only when the writer side has already gone away.
    pub fn send_text(&self, text: &str) -> Result<(), ChatError> {
        self.sender
            .send(WsMessage::text(text))
            .map_err(|_| ChatError::ConnectionClosed(self.id))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}
