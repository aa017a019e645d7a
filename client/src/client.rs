use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{info, trace, warn};

use lanelink_shared::{Command, LaneUri, LinkEvent, NodeUri, Payload};

use crate::config::{ClientConfig, DuplicatePolicy};
use crate::error::SubscribeError;
use crate::handle::MirrorHandle;
use crate::mirror::{self, MirrorCore, MirrorKind};
use crate::session::NodeSession;
use crate::transport::LinkTransport;

/// Owns the link transport and every open [`NodeSession`], and
/// guarantees the lifecycle rules:
///
/// 1. switching the active node closes every mirror of the previous
///    node before anything for the new node can open, so no two
///    sessions' events ever interleave into the same listener;
/// 2. at most one live mirror per (node, lane), enforced per
///    [`DuplicatePolicy`];
/// 3. a `WillUnlink` on any mirror tears down its whole node session,
///    with each sibling's listeners observing `Disconnected` exactly
///    once.
pub struct Client {
    config: ClientConfig,
    transport: Rc<RefCell<dyn LinkTransport>>,
    sessions: HashMap<NodeUri, NodeSession>,
    active_node: Option<NodeUri>,
}

impl Client {
    pub fn new(transport: impl LinkTransport + 'static) -> Self {
        Self::with_config(ClientConfig::default(), transport)
    }

    pub fn with_config(config: ClientConfig, transport: impl LinkTransport + 'static) -> Self {
        Self {
            config,
            transport: Rc::new(RefCell::new(transport)),
            sessions: HashMap::new(),
            active_node: None,
        }
    }

    /// Opens a mirror of a map-typed lane. The session for `node` is
    /// created on first use.
    pub fn open_map(
        &mut self,
        node: &NodeUri,
        lane: &LaneUri,
    ) -> Result<MirrorHandle, SubscribeError> {
        self.open(node, lane, MirrorKind::Map)
    }

    /// Opens a mirror of a scalar-typed lane.
    pub fn open_scalar(
        &mut self,
        node: &NodeUri,
        lane: &LaneUri,
    ) -> Result<MirrorHandle, SubscribeError> {
        self.open(node, lane, MirrorKind::Scalar)
    }

    fn open(
        &mut self,
        node: &NodeUri,
        lane: &LaneUri,
        kind: MirrorKind,
    ) -> Result<MirrorHandle, SubscribeError> {
        if let Some(session) = self.sessions.get_mut(node) {
            if let Some(existing) = session.get(lane) {
                if existing.borrow().state().is_live() {
                    match self.config.duplicate_policy {
                        DuplicatePolicy::Reject => {
                            return Err(SubscribeError::DuplicateSubscription {
                                node: node.to_string(),
                                lane: lane.to_string(),
                            });
                        }
                        DuplicatePolicy::Replace => {
                            info!("replacing live mirror for {}/{}", node, lane);
                            existing.borrow_mut().close();
                        }
                    }
                }
                // Closed mirrors linger in the session until replaced.
                session.remove(lane);
            }
        }

        let mirror = Rc::new(RefCell::new(MirrorCore::new(
            node.clone(),
            lane.clone(),
            kind,
            self.transport.clone(),
        )));

        if let Err(err) = self.transport.borrow_mut().link(node, lane) {
            // Reported asynchronously: the transport driver follows up
            // with WillUnlink for this lane.
            warn!("link request for {}/{} failed: {}", node, lane, err);
        }

        self.sessions
            .entry(node.clone())
            .or_insert_with(|| NodeSession::new(node.clone()))
            .insert(lane.clone(), mirror.clone());

        info!("opened {:?} mirror for {}/{}", kind, node, lane);
        Ok(MirrorHandle::new(mirror))
    }

    /// Entry point for the transport driver: applies one inbound event
    /// to the addressed mirror, in arrival order. Events for unknown or
    /// closed mirrors are discarded.
    pub fn deliver(&mut self, node: &NodeUri, lane: &LaneUri, event: LinkEvent) {
        let Some(mirror) = self.sessions.get(node).and_then(|s| s.get(lane)) else {
            trace!("discarding {} for unknown mirror {}/{}", event.log(), node, lane);
            return;
        };
        if mirror::deliver(&mirror, event) {
            // Disconnect means the whole node session is gone.
            self.teardown_session(node);
        }
    }

    /// Sends a fire-and-forget command to a lane on a remote node.
    /// Send failures are logged and swallowed; no acknowledgment is
    /// surfaced.
    pub fn command(&mut self, node: &NodeUri, lane: &LaneUri, payload: Payload) {
        let command = Command::new(node.clone(), lane.clone(), payload);
        if let Err(err) = self.transport.borrow_mut().command(command) {
            warn!("command to {}/{} failed: {}", node, lane, err);
        }
    }

    /// Marks `node` as the active session, first closing every mirror
    /// of the previously active node. The old subscriptions are fully
    /// torn down before this returns, so mirrors the caller opens next
    /// cannot interleave with the old node's events.
    pub fn set_active_node(&mut self, node: &NodeUri) {
        if self.active_node.as_ref() == Some(node) {
            return;
        }
        if let Some(previous) = self.active_node.take() {
            self.close_session(&previous);
        }
        self.active_node = Some(node.clone());
    }

    pub fn active_node(&self) -> Option<&NodeUri> {
        self.active_node.as_ref()
    }

    /// Closes every mirror of `node` and drops its session. Locally
    /// initiated, so listeners observe no `Disconnected`.
    pub fn close_session(&mut self, node: &NodeUri) {
        let Some(session) = self.sessions.remove(node) else {
            return;
        };
        info!("closing session for node {} ({} mirrors)", node, session.len());
        for (_lane, mirror) in session.into_mirrors() {
            mirror.borrow_mut().close();
        }
        if self.active_node.as_ref() == Some(node) {
            self.active_node = None;
        }
    }

    pub fn session(&self, node: &NodeUri) -> Option<&NodeSession> {
        self.sessions.get(node)
    }

    pub fn is_open(&self, node: &NodeUri, lane: &LaneUri) -> bool {
        self.sessions
            .get(node)
            .and_then(|s| s.get(lane))
            .map(|m| m.borrow().state().is_live())
            .unwrap_or(false)
    }

    /// Tears down every session. The client can keep being used;
    /// subsequent opens start fresh sessions.
    pub fn close(&mut self) {
        let nodes: Vec<NodeUri> = self.sessions.keys().cloned().collect();
        for node in nodes {
            self.close_session(&node);
        }
    }

    /// Remote-initiated teardown: every sibling mirror of the node
    /// session is unlinked (its listeners observe `Disconnected`
    /// exactly once) and then closed.
    fn teardown_session(&mut self, node: &NodeUri) {
        let Some(session) = self.sessions.remove(node) else {
            return;
        };
        info!(
            "tearing down session for node {} ({} mirrors)",
            node,
            session.len()
        );
        for (lane, mirror) in session.into_mirrors() {
            // The remote only dropped the lane that signalled the
            // unlink; a live sibling still holds its subscription on
            // the transport.
            let holds_subscription = mirror.borrow().state().is_live();
            // Already-unlinked mirrors (the one that triggered the
            // teardown) emit nothing here.
            mirror::deliver(&mirror, LinkEvent::WillUnlink);
            mirror.borrow_mut().close();
            if holds_subscription {
                if let Err(err) = self.transport.borrow_mut().unlink(node, &lane) {
                    warn!("unlink for {}/{} failed: {}", node, lane, err);
                }
            }
        }
        if self.active_node.as_ref() == Some(node) {
            self.active_node = None;
        }
    }
}
