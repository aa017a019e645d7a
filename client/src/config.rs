/// What to do when a lane is opened while a mirror for the same
/// (node, lane) address is already live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Close the existing mirror, then open a fresh one (the default).
    Replace,
    /// Refuse with [`SubscribeError::DuplicateSubscription`].
    ///
    /// [`SubscribeError::DuplicateSubscription`]:
    /// crate::SubscribeError::DuplicateSubscription
    Reject,
}

/// Contains the configuration parameters of a [`Client`].
///
/// [`Client`]: crate::Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Replace,
        }
    }
}
