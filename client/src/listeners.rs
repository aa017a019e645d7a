use std::cell::RefCell;
use std::rc::Rc;

use crate::change::MirrorChange;

/// Identifies a registered listener for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type SharedListener = Rc<RefCell<dyn FnMut(&MirrorChange)>>;

/// Fans a mirror's changes out to any number of listeners.
///
/// Dispatch works off a snapshot of the listener set, so a listener
/// removed (or added) from inside a callback neither crashes the
/// in-flight dispatch nor skips the remaining listeners. A listener
/// added mid-dispatch sees only subsequent changes.
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, SharedListener)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn insert(&mut self, listener: impl FnMut(&MirrorChange) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Rc::new(RefCell::new(listener))));
        id
    }

    /// Returns whether the listener was still registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn snapshot(&self) -> Vec<SharedListener> {
        self.listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect()
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
