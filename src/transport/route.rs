/// Path prefix of the private chat endpoint.
pub const ROUTE_PREFIX: &str = "/ws/private/";

/// Identities taken from `/ws/private/{sender}/{peer}`.
///
/// `sender` is the participant on this connection; every message it sends is
/// attributed to that name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateRoute {
    pub sender: String,
    pub peer: String,
}

impl PrivateRoute {
    /// Parse a request path. Anything other than exactly two non-empty
    /// segments after the prefix is rejected.
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(ROUTE_PREFIX)?;
        let mut segments = rest.split('/');
        let sender = segments.next().filter(|s| !s.is_empty())?;
        let peer = segments.next().filter(|s| !s.is_empty())?;
        if segments.next().is_some() {
            return None;
        }
        Some(Self {
            sender: sender.to_string(),
            peer: peer.to_string(),
        })
    }

    pub fn path(&self) -> String {
        format!("{ROUTE_PREFIX}{}/{}", self.sender, self.peer)
    }
}
