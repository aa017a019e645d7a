use thiserror::Error;

/// Errors that can occur when handing traffic to the link transport.
///
/// These are never thrown synchronously at the consumer: open and
/// command calls only enqueue intent on an asynchronous channel, so the
/// lifecycle manager logs these and surfaces the failure as a
/// `Disconnected` change when the transport follows up with an unlink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// The transport has no route to the remote node
    #[error("Link transport cannot reach node {node}")]
    Unreachable { node: String },
    /// The transport accepted the address but could not send
    #[error("Link transport failed to send to node {node} lane {lane}")]
    SendFailed { node: String, lane: String },
}
