//! Directional sync operations
//!
//! Every operation captures a [`Snapshot`] before touching anything, then
//! plans, applies, and finally records the mirror as the new baseline. Git is
//! not involved here; the commands layer wraps these with version control.

mod operations;
mod snapshot;

pub use operations::{pull_apply, push, status, wipe, ApplyOptions, WipeReport};
pub use snapshot::Snapshot;

use crate::diff::PlanStats;
use crate::executor::{ExecutionCallback, ExecutionStats};

/// Which of the two trees a scan event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Local,
    Mirror,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Local => "local",
            Side::Mirror => "mirror",
        }
    }
}

/// Scan progress, reported for each tree in turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    Started { side: Side },
    Progress { side: Side, files: u64, bytes: u64 },
    Finished { side: Side, files: usize },
}

pub type ScanCallback<'a> = dyn Fn(&ScanEvent) + 'a;

/// Optional observers for scanning and applying
#[derive(Default, Clone, Copy)]
pub struct Hooks<'a> {
    pub on_scan: Option<&'a ScanCallback<'a>>,
    pub on_event: Option<&'a ExecutionCallback<'a>>,
}

impl<'a> Hooks<'a> {
    /// No progress reporting
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_scan(mut self, on_scan: &'a ScanCallback<'a>) -> Self {
        self.on_scan = Some(on_scan);
        self
    }

    pub fn with_events(mut self, on_event: &'a ExecutionCallback<'a>) -> Self {
        self.on_event = Some(on_event);
        self
    }

    fn scan(&self, event: &ScanEvent) {
        if let Some(callback) = self.on_scan {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_scan", &self.on_scan.is_some())
            .field("on_event", &self.on_event.is_some())
            .finish()
    }
}

/// What an apply run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Planned copies and removals
    pub plan: PlanStats,
    /// Execution counters
    pub stats: ExecutionStats,
    /// Number of entries in the recorded baseline
    pub baseline_entries: usize,
}

impl ApplyReport {
    pub fn is_noop(&self) -> bool {
        self.plan.copy_count == 0 && self.plan.remove_count == 0
    }
}

/// Result of a conflict-gated operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The plan ran to completion and the baseline was recorded
    Applied(ApplyReport),
    /// Conflicts were found; nothing was mutated
    Blocked(Vec<String>),
}

impl Outcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Outcome::Blocked(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Applied(_) => 0,
            Outcome::Blocked(_) => 1,
        }
    }
}
