//! The `utils` module provides definitions shared across the `pairchat`
//! application: the crate-wide error type, logging setup and the delivery
//! counters returned by fan-out operations.

pub mod error;
pub mod fanout;
pub mod logging;

pub use error::ChatError;
pub use fanout::Fanout;
