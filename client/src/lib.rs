//! # Lanelink Client
//! Local mirrors of server-held lane state, kept consistent across an
//! unreliable, reconnecting link via incremental events, with
//! full-resync-on-connect semantics and a one-way command channel.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod change;
mod client;
mod config;
mod error;
mod handle;
mod listeners;
mod mirror;
mod session;
mod transport;

pub use change::{MirrorChange, MirrorChangeKind};
pub use client::Client;
pub use config::{ClientConfig, DuplicatePolicy};
pub use error::SubscribeError;
pub use handle::MirrorHandle;
pub use listeners::{ListenerId, ListenerRegistry};
pub use mirror::{MirrorKind, SyncState};
pub use transport::LinkTransport;
