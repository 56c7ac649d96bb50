//! SyncAction - Actions produced by the apply planner

/// Single file operation between two roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy file from the source root to the destination root (create or overwrite)
    Copy(String),

    /// Remove file from the destination root and prune empty parents
    Remove(String),
}

impl SyncAction {
    /// Relative path the action operates on
    pub fn path(&self) -> &str {
        match self {
            SyncAction::Copy(path) | SyncAction::Remove(path) => path,
        }
    }

    /// Short label used in progress and error output
    pub fn action_name(&self) -> &'static str {
        match self {
            SyncAction::Copy(_) => "Copy",
            SyncAction::Remove(_) => "Remove",
        }
    }

    pub fn is_copy(&self) -> bool {
        matches!(self, SyncAction::Copy(_))
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, SyncAction::Remove(_))
    }
}
