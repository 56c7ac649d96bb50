//! Executor module for file operations

pub mod copy;
pub mod remove;

use crate::diff::ApplyPlan;
use crate::types::{SyncAction, SyncError};
use std::path::Path;
use tracing::{debug, warn};

pub use copy::{copy_file, copy_file_atomic};
pub use remove::remove_file;

/// Execution progress statistics for an apply run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of actions in the input plan.
    pub total_actions: usize,
    /// Number of successfully processed actions.
    pub completed_actions: usize,
    /// Number of failed actions.
    pub failed_actions: usize,
    /// Aggregate copied bytes.
    pub bytes_copied: u64,
}

/// Events emitted while executing a plan.
#[derive(Debug)]
pub enum ExecutionEvent<'a> {
    /// Action execution started.
    ActionStart {
        index: usize,
        total: usize,
        action: &'static str,
        path: &'a str,
    },
    /// Action execution succeeded.
    ActionSuccess {
        index: usize,
        total: usize,
        action: &'static str,
        path: &'a str,
        bytes_copied: u64,
    },
    /// Action execution failed but executor continued.
    ActionError {
        index: usize,
        total: usize,
        action: &'static str,
        path: &'a str,
        error: &'a SyncError,
    },
    /// Plan execution completed (with or without errors).
    Complete { stats: &'a ExecutionStats },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent<'_>) + 'a;

/// Execute an apply plan from `src_root` into `dst_root`
///
/// Copies read from `src_root` and write to `dst_root`; removals act on
/// `dst_root` only. Actions run sequentially; a failure aborts that one file,
/// the batch continues, and an aggregated error is returned at the end.
pub fn execute_plan(
    plan: &ApplyPlan,
    src_root: &Path,
    dst_root: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<ExecutionStats, SyncError> {
    let mut stats = ExecutionStats {
        total_actions: plan.actions.len(),
        ..Default::default()
    };
    let mut errors: Vec<(String, SyncError)> = Vec::new();

    for (idx, action) in plan.actions.iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            ExecutionEvent::ActionStart {
                index,
                total: stats.total_actions,
                action: action.action_name(),
                path: action.path(),
            },
        );

        match execute_action(action, src_root, dst_root) {
            Ok(bytes) => {
                stats.completed_actions += 1;
                stats.bytes_copied += bytes;
                debug!(action = action.action_name(), path = action.path(), "applied");

                emit_event(
                    on_event,
                    ExecutionEvent::ActionSuccess {
                        index,
                        total: stats.total_actions,
                        action: action.action_name(),
                        path: action.path(),
                        bytes_copied: bytes,
                    },
                );
            }
            Err(err) => {
                stats.failed_actions += 1;
                warn!(action = action.action_name(), path = action.path(), "{}", err);

                emit_event(
                    on_event,
                    ExecutionEvent::ActionError {
                        index,
                        total: stats.total_actions,
                        action: action.action_name(),
                        path: action.path(),
                        error: &err,
                    },
                );

                errors.push((action.path().to_string(), err));
            }
        }
    }

    emit_event(on_event, ExecutionEvent::Complete { stats: &stats });

    if errors.is_empty() {
        Ok(stats)
    } else {
        Err(SyncError::Apply {
            failed: errors.len(),
            summary: build_error_summary(&errors),
        })
    }
}

fn execute_action(action: &SyncAction, src_root: &Path, dst_root: &Path) -> Result<u64, SyncError> {
    match action {
        SyncAction::Copy(path) => copy_file(src_root, dst_root, path),
        SyncAction::Remove(path) => remove_file(dst_root, path).map(|_| 0),
    }
}

fn emit_event(on_event: Option<&ExecutionCallback<'_>>, event: ExecutionEvent<'_>) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

fn build_error_summary(errors: &[(String, SyncError)]) -> String {
    let preview = errors
        .iter()
        .take(3)
        .map(|(path, err)| format!("{}: {}", path, err))
        .collect::<Vec<_>>()
        .join("; ");

    if errors.len() > 3 {
        format!("{}; ... and {} more", preview, errors.len() - 3)
    } else {
        preview
    }
}
