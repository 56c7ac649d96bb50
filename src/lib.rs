//! # orcasync - three-way profile sync
//!
//! Keeps a live settings directory (by default OrcaSlicer's user profiles) in
//! step with a git-tracked mirror. Every file is fingerprinted on both sides
//! and compared against the baseline recorded at the last successful sync, so
//! edits made on two machines are detected as conflicts instead of being
//! silently overwritten.

// Module declarations
pub mod baseline;
pub mod commands;
pub mod config;
pub mod diff;
pub mod executor;
pub mod hash;
pub mod scanner;
pub mod sync;
pub mod types;
pub mod ui;
pub mod vcs;

// Re-export commonly used types
pub use config::Config;
pub use diff::{reconcile, ThreeWayDiff};
pub use sync::{Outcome, Snapshot};
pub use types::{FingerprintMap, SyncAction, SyncError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
