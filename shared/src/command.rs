use crate::{LaneUri, NodeUri, Payload};

/// Outbound fire-and-forget command addressed to a lane on a remote
/// node. No delivery acknowledgment is surfaced to the core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    node: NodeUri,
    lane: LaneUri,
    payload: Payload,
}

impl Command {
    pub fn new(node: NodeUri, lane: LaneUri, payload: Payload) -> Self {
        Self {
            node,
            lane,
            payload,
        }
    }

    pub fn node(&self) -> &NodeUri {
        &self.node
    }

    pub fn lane(&self) -> &LaneUri {
        &self.lane
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}
