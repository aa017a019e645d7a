use crate::{EntryKey, Payload};

/// Inbound signals a transport delivers for a single mirror.
///
/// The transport's contract is arrival-order preservation per mirror;
/// the mirror applies these strictly in the order they were delivered,
/// with no batching or reordering, since later events may depend on
/// earlier structural state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkEvent {
    /// The remote is about to replay the lane's full current state.
    WillSync,
    /// Insert-or-overwrite of a single map entry.
    Update { key: EntryKey, payload: Payload },
    /// Removal of a single map entry.
    Remove { key: EntryKey },
    /// Wholesale replacement of a scalar lane's value.
    Set { payload: Payload },
    /// The remote is tearing the subscription down.
    WillUnlink,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkEventKind {
    WillSync,
    Update,
    Remove,
    Set,
    WillUnlink,
}

impl LinkEvent {
    pub fn kind(&self) -> LinkEventKind {
        match self {
            Self::WillSync => LinkEventKind::WillSync,
            Self::Update { .. } => LinkEventKind::Update,
            Self::Remove { .. } => LinkEventKind::Remove,
            Self::Set { .. } => LinkEventKind::Set,
            Self::WillUnlink => LinkEventKind::WillUnlink,
        }
    }

    pub fn log(&self) -> String {
        match self {
            Self::WillSync => "WillSync".to_string(),
            Self::Update { key, .. } => format!("Update {:?}", key),
            Self::Remove { key } => format!("Remove {:?}", key),
            Self::Set { .. } => "Set".to_string(),
            Self::WillUnlink => "WillUnlink".to_string(),
        }
    }
}
