//! Session state and snapshot persistence.
//!
//! The [`SessionStore`] holds the single live session and talks to storage
//! only through the [`SnapshotStore`] port, so it runs the same against the
//! in-memory backend in tests and the file backend on disk.

mod file;
mod memory;
mod port;
mod session_store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use port::{Clock, FixedClock, SnapshotStore, SystemClock};
pub use session_store::{LoadOutcome, SessionStore};
