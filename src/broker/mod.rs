//! The `broker` module holds the topic-keyed publish/subscribe bus.
//!
//! The bus knows nothing about connections or pairs: topics are opaque
//! strings and subscribers are `Handler` values. It decides what happens to a
//! message logically (today: recording it), while the registry decides who
//! receives it live.

pub mod bus;
pub mod handler;
pub mod topic;

pub use bus::Bus;
pub use handler::Handler;
