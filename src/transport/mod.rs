//! The `transport` module is responsible for network communication with
//! clients over WebSockets.
//!
//! It accepts connections on `/ws/private/{user1}/{user2}`, turns each one
//! into a `Connection` handle and drives the routing entry point from the
//! connection's inbound frames until the client goes away.

pub mod route;
pub mod websocket;

pub use route::PrivateRoute;
pub use websocket::{serve, start_websocket_server};
