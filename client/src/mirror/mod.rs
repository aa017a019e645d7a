mod state;
mod sync_state;


pub use state::MirrorKind;
pub use sync_state::SyncState;

pub(crate) use state::{deliver, MirrorCore, SharedMirror};
