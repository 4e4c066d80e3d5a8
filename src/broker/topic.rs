//! Topic management
//!
//! A `Topic` holds the ordered list of handlers subscribed to one topic name.
//! Handlers are compared by key and duplicate subscriptions are a no-op.
//!
//! Concurrency note: callers must synchronize access to `Topic` (the bus
//! keeps each topic behind its map entry lock) when modifying subscriptions.

use std::fmt;
use std::sync::Arc;

use super::Handler;

pub struct Topic {
    pub name: String,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Topic {
    /// Create a new topic with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handlers: Vec::new(),
        }
    }

    /// Append a handler unless one with the same key is already present.
    /// Returns whether the handler was added.
    pub fn subscribe(&mut self, handler: Arc<dyn Handler>) -> bool {
        if self.contains(handler.key()) {
            return false;
        }
        self.handlers.push(handler);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.iter().any(|h| h.key() == key)
    }

    /// Handlers in subscription order.
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.key()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
