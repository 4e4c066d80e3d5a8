/// Outcome of delivering one message to a set of receivers.
///
/// Returned by `Bus::publish` (receivers are handlers) and
/// `Registry::broadcast_private` (receivers are connections). Failures are
/// counted rather than propagated so one bad receiver never hides the rest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fanout {
    pub delivered: usize,
    pub failed: usize,
}

impl Fanout {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }

    /// True when there was nobody to deliver to.
    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }
}
