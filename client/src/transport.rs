use lanelink_shared::{Command, LaneUri, LinkError, NodeUri};

/// The seam to the remote state-synchronization service. Treated as a
/// black box: any transport that delivers [`LinkEvent`]s for a linked
/// lane to [`Client::deliver`] in arrival order is compatible.
///
/// Implementations must not call back into the [`Client`] from inside
/// these methods; deliver inbound events from the driving loop instead.
///
/// [`LinkEvent`]: lanelink_shared::LinkEvent
/// [`Client`]: crate::Client
/// [`Client::deliver`]: crate::Client::deliver
pub trait LinkTransport {
    /// Requests a subscription to the given lane. Connect failures are
    /// reported asynchronously, by delivering `WillUnlink` for the
    /// lane; an `Err` here only means the request could not be
    /// enqueued.
    fn link(&mut self, node: &NodeUri, lane: &LaneUri) -> Result<(), LinkError>;

    /// Tears down the subscription to the given lane.
    fn unlink(&mut self, node: &NodeUri, lane: &LaneUri) -> Result<(), LinkError>;

    /// Sends a fire-and-forget command. No acknowledgment is surfaced;
    /// commands on the same (node, lane) pair are sent in call order.
    fn command(&mut self, command: Command) -> Result<(), LinkError>;
}
