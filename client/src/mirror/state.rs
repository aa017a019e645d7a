use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::{info, trace, warn};

use lanelink_shared::{EntryMap, LaneUri, LinkEvent, NodeUri, Payload};

use crate::change::MirrorChange;
use crate::listeners::ListenerRegistry;
use crate::mirror::SyncState;
use crate::transport::LinkTransport;

/// Whether a lane exposes a map-typed or scalar-typed state view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MirrorKind {
    Map,
    Scalar,
}

pub(crate) type SharedMirror = Rc<RefCell<MirrorCore>>;

/// Local reconstruction of one lane's remote state.
///
/// All mutation of `entries`/`value` happens here, driven by
/// [`deliver`]; consumers only read, via listener callbacks or
/// snapshot accessors on [`MirrorHandle`].
///
/// [`MirrorHandle`]: crate::MirrorHandle
pub(crate) struct MirrorCore {
    node: NodeUri,
    lane: LaneUri,
    kind: MirrorKind,
    state: SyncState,
    entries: EntryMap,
    value: Option<Payload>,
    pub(crate) listeners: ListenerRegistry,
    // Events delivered from inside a listener callback wait here until
    // the in-flight dispatch completes.
    pending: VecDeque<LinkEvent>,
    dispatching: bool,
    transport: Rc<RefCell<dyn LinkTransport>>,
}

impl MirrorCore {
    pub(crate) fn new(
        node: NodeUri,
        lane: LaneUri,
        kind: MirrorKind,
        transport: Rc<RefCell<dyn LinkTransport>>,
    ) -> Self {
        Self {
            node,
            lane,
            kind,
            state: SyncState::Opening,
            entries: EntryMap::new(),
            value: None,
            listeners: ListenerRegistry::new(),
            pending: VecDeque::new(),
            dispatching: false,
            transport,
        }
    }

    pub(crate) fn node(&self) -> &NodeUri {
        &self.node
    }

    pub(crate) fn lane(&self) -> &LaneUri {
        &self.lane
    }

    pub(crate) fn kind(&self) -> MirrorKind {
        self.kind
    }

    pub(crate) fn state(&self) -> SyncState {
        self.state
    }

    pub(crate) fn entries(&self) -> &EntryMap {
        &self.entries
    }

    pub(crate) fn value(&self) -> Option<&Payload> {
        self.value.as_ref()
    }

    /// Applies one event to the local state, returning the changes to
    /// fan out. Strictly one event at a time, in arrival order.
    fn apply(&mut self, event: LinkEvent) -> Vec<MirrorChange> {
        match event {
            LinkEvent::WillSync => {
                // Stale entries from a prior session must never leak
                // into a resync.
                self.entries.clear();
                self.value = None;
                self.state = SyncState::Syncing;
                vec![MirrorChange::Reset]
            }
            LinkEvent::Update { key, payload } => {
                if self.kind != MirrorKind::Map {
                    warn!(
                        "ignoring map update on scalar lane {}/{}",
                        self.node, self.lane
                    );
                    return Vec::new();
                }
                self.mark_synced();
                if payload.is_empty() {
                    // Empty payload means drop, not an empty entry.
                    trace!(
                        "dropping empty-payload update for key {} on {}/{}",
                        key, self.node, self.lane
                    );
                    return Vec::new();
                }
                self.entries.upsert(key.clone(), payload.clone());
                vec![MirrorChange::Upsert(key, payload)]
            }
            LinkEvent::Remove { key } => {
                if self.kind != MirrorKind::Map {
                    warn!(
                        "ignoring map remove on scalar lane {}/{}",
                        self.node, self.lane
                    );
                    return Vec::new();
                }
                self.mark_synced();
                match self.entries.remove(&key) {
                    Some(_) => vec![MirrorChange::Removed(key)],
                    None => {
                        // The remote may signal removal of something
                        // already pruned locally, e.g. after a reset.
                        trace!(
                            "remove for absent key {} on {}/{}",
                            key, self.node, self.lane
                        );
                        Vec::new()
                    }
                }
            }
            LinkEvent::Set { payload } => {
                if self.kind != MirrorKind::Scalar {
                    warn!("ignoring scalar set on map lane {}/{}", self.node, self.lane);
                    return Vec::new();
                }
                self.mark_synced();
                self.value = Some(payload.clone());
                vec![MirrorChange::Set(payload)]
            }
            LinkEvent::WillUnlink => {
                if self.state == SyncState::Unlinked {
                    return Vec::new();
                }
                info!("mirror {}/{} unlinked by remote", self.node, self.lane);
                self.state = SyncState::Unlinked;
                vec![MirrorChange::Disconnected]
            }
        }
    }

    fn mark_synced(&mut self) {
        if self.state.is_provisional() {
            self.state = SyncState::Synced;
        }
    }

    /// Idempotent teardown: detaches from the transport, discards the
    /// mirrored state along with pending events and listeners, and
    /// transitions to `Closed`. Emits nothing; `Disconnected` belongs
    /// to the unlink path.
    pub(crate) fn close(&mut self) {
        if self.state == SyncState::Closed {
            return;
        }
        let remote_initiated = self.state == SyncState::Unlinked;
        self.state = SyncState::Closed;
        self.entries.clear();
        self.value = None;
        self.pending.clear();
        self.listeners.clear();
        if !remote_initiated {
            // The remote already dropped unlinked subscriptions.
            if let Err(err) = self.transport.borrow_mut().unlink(&self.node, &self.lane) {
                warn!("unlink for {}/{} failed: {}", self.node, self.lane, err);
            }
        }
        info!("closed mirror {}/{}", self.node, self.lane);
    }
}

/// Applies one inbound event to the mirror and fans the resulting
/// changes out to the listener set. Returns whether this event left the
/// mirror `Unlinked`, so the lifecycle manager can tear down siblings.
///
/// Events delivered re-entrantly (from inside a listener callback) are
/// queued and applied after the in-flight dispatch, preserving arrival
/// order; events for a closed mirror are discarded, not applied.
pub(crate) fn deliver(mirror: &SharedMirror, event: LinkEvent) -> bool {
    {
        let mut core = mirror.borrow_mut();
        if core.state == SyncState::Closed {
            trace!(
                "discarding {} for closed mirror {}/{}",
                event.log(),
                core.node,
                core.lane
            );
            return false;
        }
        if core.dispatching {
            core.pending.push_back(event);
            return false;
        }
        core.dispatching = true;
    }

    let mut unlinked = false;
    let mut next = Some(event);
    while let Some(current) = next {
        let (changes, listeners) = {
            let mut core = mirror.borrow_mut();
            if core.state == SyncState::Closed {
                // A listener closed the mirror mid-dispatch; the rest
                // of the queue is already discarded.
                break;
            }
            let changes = core.apply(current);
            if core.state == SyncState::Unlinked {
                unlinked = true;
            }
            (changes, core.listeners.snapshot())
        };

        // The core's borrow is released here: listeners are free to
        // read snapshots, register/deregister, or close the mirror.
        for change in &changes {
            for listener in &listeners {
                (&mut *listener.borrow_mut())(change);
            }
        }

        next = mirror.borrow_mut().pending.pop_front();
    }

    mirror.borrow_mut().dispatching = false;
    unlinked
}
