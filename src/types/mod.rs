//! Core type definitions for orcasync

mod action;
mod error;
mod fingerprint;
mod scope;

pub use action::SyncAction;
pub use error::SyncError;
pub use fingerprint::{normalize_rel_path, resolve_rel_path, FingerprintMap};
pub use scope::{ExclusionFilter, Scope};
