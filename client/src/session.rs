use std::collections::HashMap;

use lanelink_shared::{LaneUri, NodeUri};

use crate::mirror::SharedMirror;

/// The pairing of a remote node with its open mirrors, keyed by lane.
///
/// Sessions are explicit values owned by the [`Client`], never ambient
/// state, so multiple sessions (e.g. a room-list session alongside the
/// active room's session) coexist without cross-talk.
///
/// [`Client`]: crate::Client
pub struct NodeSession {
    node: NodeUri,
    mirrors: HashMap<LaneUri, SharedMirror>,
}

impl NodeSession {
    pub(crate) fn new(node: NodeUri) -> Self {
        Self {
            node,
            mirrors: HashMap::new(),
        }
    }

    pub fn node(&self) -> &NodeUri {
        &self.node
    }

    pub fn len(&self) -> usize {
        self.mirrors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mirrors.is_empty()
    }

    pub fn lanes(&self) -> impl Iterator<Item = &LaneUri> {
        self.mirrors.keys()
    }

    pub fn contains(&self, lane: &LaneUri) -> bool {
        self.mirrors.contains_key(lane)
    }

    pub(crate) fn get(&self, lane: &LaneUri) -> Option<SharedMirror> {
        self.mirrors.get(lane).cloned()
    }

    pub(crate) fn insert(&mut self, lane: LaneUri, mirror: SharedMirror) {
        self.mirrors.insert(lane, mirror);
    }

    pub(crate) fn remove(&mut self, lane: &LaneUri) -> Option<SharedMirror> {
        self.mirrors.remove(lane)
    }

    pub(crate) fn into_mirrors(self) -> Vec<(LaneUri, SharedMirror)> {
        self.mirrors.into_iter().collect()
    }
}
