use lanelink_shared::{EntryKey, LaneUri, NodeUri, Payload};

use crate::change::MirrorChange;
use crate::listeners::ListenerId;
use crate::mirror::{MirrorKind, SharedMirror, SyncState};

/// Consumer-facing handle to a mirror. Cheap to clone; all clones
/// observe the same mirror.
///
/// Handles only read mirror state and manage listeners; the mirror's
/// contents are mutated exclusively by event application inside
/// [`Client::deliver`].
///
/// [`Client::deliver`]: crate::Client::deliver
#[derive(Clone)]
pub struct MirrorHandle {
    mirror: SharedMirror,
}

impl MirrorHandle {
    pub(crate) fn new(mirror: SharedMirror) -> Self {
        Self { mirror }
    }

    pub fn node(&self) -> NodeUri {
        self.mirror.borrow().node().clone()
    }

    pub fn lane(&self) -> LaneUri {
        self.mirror.borrow().lane().clone()
    }

    pub fn kind(&self) -> MirrorKind {
        self.mirror.borrow().kind()
    }

    pub fn sync_state(&self) -> SyncState {
        self.mirror.borrow().state()
    }

    /// Registers a listener for this mirror's changes. Listeners see
    /// changes in the mirror's emission order; relative order across
    /// listeners is unspecified.
    pub fn on_change(&self, listener: impl FnMut(&MirrorChange) + 'static) -> ListenerId {
        self.mirror.borrow_mut().listeners.insert(listener)
    }

    /// Returns whether the listener was still registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.mirror.borrow_mut().listeners.remove(id)
    }

    /// Owned copy of the entries in insertion order. Provisional while
    /// [`sync_state`](Self::sync_state) is `Opening` or `Syncing`.
    pub fn snapshot(&self) -> Vec<(EntryKey, Payload)> {
        self.mirror.borrow().entries().snapshot()
    }

    pub fn get(&self, key: &EntryKey) -> Option<Payload> {
        self.mirror.borrow().entries().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.mirror.borrow().entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirror.borrow().entries().is_empty()
    }

    /// Current value of a scalar lane; `None` until the first `Set`.
    pub fn value(&self) -> Option<Payload> {
        self.mirror.borrow().value().cloned()
    }

    /// Idempotent: detaches from the transport, discards the mirrored
    /// state and any pending events, and transitions the mirror to
    /// `Closed`. No `Disconnected` is emitted for a locally initiated
    /// close.
    pub fn close(&self) {
        self.mirror.borrow_mut().close();
    }
}
