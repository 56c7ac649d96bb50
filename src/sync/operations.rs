use super::snapshot::scan_side;
use super::{ApplyReport, Hooks, Outcome, Side, Snapshot};
use crate::baseline::save_baseline;
use crate::config::Config;
use crate::diff::{pull_plan, push_plan, ApplyPlan, ThreeWayDiff};
use crate::executor::execute_plan;
use crate::types::{FingerprintMap, SyncError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for applying the mirror onto the local tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Remove in-scope local files that are absent from the mirror
    pub prune: bool,
    /// Apply even when conflicts exist (the mirror wins)
    pub force: bool,
}

/// What a wipe removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WipeReport {
    /// Mirror entries that were deleted
    pub removed: Vec<PathBuf>,
}

/// Reconcile the two trees against the baseline without changing anything
pub fn status(config: &Config, hooks: &Hooks<'_>) -> Result<ThreeWayDiff, SyncError> {
    Ok(Snapshot::capture(config, hooks)?.diff)
}

/// Make the mirror match the local tree
///
/// Refuses to mutate anything while conflicts exist. On success the mirror is
/// re-scanned and recorded as the new baseline, so the baseline reflects what
/// actually landed on disk.
pub fn push(config: &Config, hooks: &Hooks<'_>) -> Result<Outcome, SyncError> {
    require_dir(&config.local_root)?;

    let snapshot = Snapshot::capture(config, hooks)?;
    if snapshot.diff.has_conflicts() {
        info!(conflicts = snapshot.diff.conflicts.len(), "push blocked");
        return Ok(Outcome::Blocked(snapshot.diff.conflicts));
    }

    fs::create_dir_all(&config.mirror_root).map_err(|e| SyncError::io(&config.mirror_root, e))?;

    let plan = push_plan(&snapshot.diff);
    let report = apply(config, &plan, &config.local_root, &config.mirror_root, hooks)?;
    info!(
        copied = report.plan.copy_count,
        removed = report.plan.remove_count,
        "push applied"
    );
    Ok(Outcome::Applied(report))
}

/// Bring the mirror's content into the local tree
///
/// Copies every mirror file whose local content is missing or different.
/// Local-only files are kept unless `options.prune` is set. Conflicts block
/// the apply unless `options.force` is set.
pub fn pull_apply(
    config: &Config,
    options: ApplyOptions,
    hooks: &Hooks<'_>,
) -> Result<Outcome, SyncError> {
    require_dir(&config.mirror_root)?;

    let snapshot = Snapshot::capture(config, hooks)?;
    if snapshot.diff.has_conflicts() && !options.force {
        info!(conflicts = snapshot.diff.conflicts.len(), "apply blocked");
        return Ok(Outcome::Blocked(snapshot.diff.conflicts));
    }

    fs::create_dir_all(&config.local_root).map_err(|e| SyncError::io(&config.local_root, e))?;

    let plan = pull_plan(&snapshot.local, &snapshot.mirror, &config.scope, options.prune);
    let report = apply(config, &plan, &config.mirror_root, &config.local_root, hooks)?;
    info!(
        copied = report.plan.copy_count,
        removed = report.plan.remove_count,
        prune = options.prune,
        "apply finished"
    );
    Ok(Outcome::Applied(report))
}

/// Delete the mirror scope and reset the baseline to empty
///
/// With an active scope each scope folder is removed from the mirror root;
/// otherwise every entry of the mirror root goes. Nothing happens without
/// `confirmed`.
pub fn wipe(config: &Config, confirmed: bool) -> Result<WipeReport, SyncError> {
    if !confirmed {
        return Err(SyncError::MissingConfirmation(
            "wipe deletes every mirrored profile; pass --yes to proceed".to_string(),
        ));
    }
    if config.mirror_root == config.repo_root {
        return Err(SyncError::Config(format!(
            "refusing to wipe the repository root {}",
            config.repo_root.display()
        )));
    }

    let mut targets = Vec::new();
    if config.scope.is_active() {
        targets.extend(config.scope.folders().map(|f| config.mirror_root.join(f)));
    } else if config.mirror_root.is_dir() {
        let entries =
            fs::read_dir(&config.mirror_root).map_err(|e| SyncError::io(&config.mirror_root, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SyncError::io(&config.mirror_root, e))?;
            targets.push(entry.path());
        }
        targets.sort();
    }

    let mut report = WipeReport::default();
    for target in targets {
        if remove_entry(&target)? {
            report.removed.push(target);
        }
    }

    save_baseline(&config.state_path, &FingerprintMap::new())?;
    info!(removed = report.removed.len(), "mirror wiped");
    Ok(report)
}

fn require_dir(root: &Path) -> Result<(), SyncError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(SyncError::MissingSource {
            path: root.to_path_buf(),
        })
    }
}

/// Execute `plan`, then record the freshly scanned mirror as the baseline
///
/// A failed action leaves the previous baseline untouched.
fn apply(
    config: &Config,
    plan: &ApplyPlan,
    src_root: &Path,
    dst_root: &Path,
    hooks: &Hooks<'_>,
) -> Result<ApplyReport, SyncError> {
    let stats = execute_plan(plan, src_root, dst_root, hooks.on_event)?;

    let baseline = scan_side(config, Side::Mirror, &config.mirror_root, &Hooks::none())?;
    save_baseline(&config.state_path, &baseline)?;

    Ok(ApplyReport {
        plan: plan.stats,
        stats,
        baseline_entries: baseline.len(),
    })
}

/// Remove a file, symlink or directory tree; `false` if it was not there
fn remove_entry(path: &Path) -> Result<bool, SyncError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(SyncError::io(path, e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| SyncError::io(path, e))?;
    Ok(true)
}
