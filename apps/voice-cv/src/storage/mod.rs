// Persistence: immutable timestamped Record snapshots and the "current" pointer.

pub mod snapshots;

pub use snapshots::{Committed, PersistenceError, SnapshotStore};
