//! The `client` module defines the representation of one live connection.
//!
//! It provides the `Connection` handle, which pairs a unique identifier with
//! the channel used to push outbound frames to that connection's socket.

pub mod connection;
pub use connection::{Connection, ConnectionId};
