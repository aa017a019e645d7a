use lanelink_shared::{EntryKey, Payload};

/// A single observable change to a mirror. Each listener sees a
/// mirror's changes in the mirror's own emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MirrorChange {
    /// The mirror dropped its entries ahead of a resync.
    Reset,
    /// An entry was inserted or overwritten.
    Upsert(EntryKey, Payload),
    /// An entry was removed.
    Removed(EntryKey),
    /// A scalar lane's value was replaced wholesale.
    Set(Payload),
    /// The subscription is gone. Emitted exactly once per mirror;
    /// reconnection is the consumer's policy.
    Disconnected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MirrorChangeKind {
    Reset,
    Upsert,
    Removed,
    Set,
    Disconnected,
}

impl MirrorChange {
    pub fn kind(&self) -> MirrorChangeKind {
        match self {
            Self::Reset => MirrorChangeKind::Reset,
            Self::Upsert(_, _) => MirrorChangeKind::Upsert,
            Self::Removed(_) => MirrorChangeKind::Removed,
            Self::Set(_) => MirrorChangeKind::Set,
            Self::Disconnected => MirrorChangeKind::Disconnected,
        }
    }
}
