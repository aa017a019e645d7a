//! # Lanelink Shared
//! Common functionality shared between the lanelink client core and
//! transport drivers.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod address;
mod command;
mod entry_map;
mod error;
mod link_event;
mod payload;

pub use address::{LaneUri, NodeUri};
pub use command::Command;
pub use entry_map::{EntryKey, EntryMap};
pub use error::LinkError;
pub use link_event::{LinkEvent, LinkEventKind};
pub use payload::Payload;
