use thiserror::Error;

/// Errors that can occur when opening a mirror.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    /// A mirror is already live for the (node, lane) address. Only
    /// returned under [`DuplicatePolicy::Reject`]; the default policy
    /// replaces the existing mirror instead.
    ///
    /// [`DuplicatePolicy::Reject`]: crate::DuplicatePolicy::Reject
    #[error("A mirror is already open for node {node} lane {lane}. Close it first, or use DuplicatePolicy::Replace")]
    DuplicateSubscription { node: String, lane: String },
}
