/// Lifecycle of a mirror's subscription.
///
/// `Opening` covers the window between the link request and the first
/// signal from the remote; `Syncing` is entered on `WillSync`, after
/// the entries have been cleared. While in either of those states the
/// mirror's contents are provisional and must not be trusted as
/// complete. The four-signal contract carries no explicit end-of-sync
/// marker, so the first inbound data event transitions to `Synced`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncState {
    Closed,
    Opening,
    Syncing,
    Synced,
    Unlinked,
}

impl SyncState {
    /// Whether the mirror's contents may be incomplete.
    pub fn is_provisional(self) -> bool {
        matches!(self, Self::Opening | Self::Syncing)
    }

    /// Whether the mirror still applies inbound events.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Opening | Self::Syncing | Self::Synced)
    }
}
