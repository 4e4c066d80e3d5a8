//! The `pair` module canonicalizes two participant identities into the key
//! that names their conversation.
//!
//! A conversation is one logical entity no matter which side opened it, so
//! both the registry and the bus only ever see the normalized form.

use std::fmt;

/// Prefix of every conversation topic on the bus.
pub const TOPIC_PREFIX: &str = "private:";

/// Unordered pair of participant identities, stored in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: String,
    high: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    pub fn members(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    /// Bus topic for this conversation, e.g. `private:5:alice|bob`.
    ///
    /// The length of the low member is spelled out so that no two pairs
    /// share a topic, whatever characters the identities contain. The
    /// `Display` form (`alice-bob`) does not have that property and is only
    /// used to name storage.
    pub fn topic(&self) -> String {
        format!("{TOPIC_PREFIX}{}:{}|{}", self.low.len(), self.low, self.high)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests;
