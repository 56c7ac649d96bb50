//! File removal with empty-directory pruning

use crate::types::{resolve_rel_path, SyncError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Delete `root/rel` and prune parent directories left empty
///
/// A missing file is not an error. Pruning walks upward from the file's
/// parent and stops at the first non-empty directory or at `root`, which is
/// never removed.
pub fn remove_file(root: &Path, rel: &str) -> Result<(), SyncError> {
    let target = resolve_rel_path(root, rel);

    match fs::remove_file(&target) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(SyncError::io(&target, e)),
    }

    prune_empty_parents(root, &target);
    Ok(())
}

fn prune_empty_parents(root: &Path, target: &Path) {
    let mut current = target.parent();

    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        // Fails on non-empty (or missing) directories, which ends the walk.
        if fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}
