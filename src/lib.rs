//! # pairchat
//!
//! `pairchat` routes text messages between exactly two participants over
//! WebSockets and records every message of a conversation, keyed by the
//! unordered pair of participants.
//!
//! ## Core Modules
//!
//! - `broker`: topic-keyed publish/subscribe bus of deduplicated handlers.
//! - `registry`: map from a participant pair to its live connections.
//! - `chat`: the routing entry point that wires bus, registry and storage.
//! - `pair`: canonical, order-independent conversation keys.
//! - `client`: the handle used to push frames to one connection.
//! - `persistence`: conversation storage (text files or `sled`).
//! - `transport`: the WebSocket server.
//! - `config`: loading server configuration.
//! - `utils`: errors, logging and fan-out counters.

pub mod broker;
pub mod chat;
pub mod client;
pub mod config;
pub mod pair;
pub mod persistence;
pub mod registry;
pub mod transport;
pub mod utils;
