//! Three-way reconciliation of local, mirror and baseline fingerprints

use crate::types::FingerprintMap;
use std::collections::BTreeSet;

/// Result of reconciling (local, mirror, baseline)
///
/// Every bucket is sorted lexicographically. A path listed in `conflicts`
/// never appears in any other bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreeWayDiff {
    /// Present locally, absent from the mirror
    pub only_local: Vec<String>,
    /// Present in the mirror, absent locally
    pub only_mirror: Vec<String>,
    /// Changed locally since the baseline, mirror untouched
    pub changed_local: Vec<String>,
    /// Changed in the mirror since the baseline, local untouched
    pub changed_mirror: Vec<String>,
    /// Changed differently on both sides since the baseline
    pub conflicts: Vec<String>,
}

/// Bucket sizes, used for status output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffCounts {
    pub only_local: usize,
    pub only_mirror: usize,
    pub changed_local: usize,
    pub changed_mirror: usize,
    pub conflicts: usize,
}

impl ThreeWayDiff {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// True when the two trees agree with each other and with the baseline
    pub fn is_clean(&self) -> bool {
        self.only_local.is_empty()
            && self.only_mirror.is_empty()
            && self.changed_local.is_empty()
            && self.changed_mirror.is_empty()
            && self.conflicts.is_empty()
    }

    pub fn counts(&self) -> DiffCounts {
        DiffCounts {
            only_local: self.only_local.len(),
            only_mirror: self.only_mirror.len(),
            changed_local: self.changed_local.len(),
            changed_mirror: self.changed_mirror.len(),
            conflicts: self.conflicts.len(),
        }
    }
}

/// Classify every known path against the last-sync baseline
///
/// Absence is its own value: a path missing from the baseline but present on
/// one side counts as changed on that side.
///
/// 1. Changed on both sides to different content → conflict (and nothing else)
/// 2. Present on exactly one side → `only_local` / `only_mirror`
/// 3. Changed on exactly one side → `changed_local` / `changed_mirror`
///
/// Both sides converging on identical new content is not a conflict.
///
/// # Example
/// ```
/// use orcasync::diff::reconcile;
/// use orcasync::types::FingerprintMap;
///
/// let mut local = FingerprintMap::new();
/// local.insert("machine/printer.json", "h1");
///
/// let diff = reconcile(&local, &FingerprintMap::new(), &FingerprintMap::new());
/// assert_eq!(diff.only_local, vec!["machine/printer.json".to_string()]);
/// assert_eq!(diff.changed_local, vec!["machine/printer.json".to_string()]);
/// assert!(diff.conflicts.is_empty());
/// ```
pub fn reconcile(
    local: &FingerprintMap,
    mirror: &FingerprintMap,
    baseline: &FingerprintMap,
) -> ThreeWayDiff {
    let all_paths: BTreeSet<&str> = local
        .paths()
        .chain(mirror.paths())
        .chain(baseline.paths())
        .collect();

    let mut diff = ThreeWayDiff::default();

    // BTreeSet iteration keeps every bucket sorted.
    for path in all_paths {
        let l = local.get(path);
        let m = mirror.get(path);
        let b = baseline.get(path);

        let local_changed = l != b;
        let mirror_changed = m != b;

        if local_changed && mirror_changed && l != m {
            diff.conflicts.push(path.to_string());
            continue;
        }

        match (l, m) {
            (Some(_), None) => diff.only_local.push(path.to_string()),
            (None, Some(_)) => diff.only_mirror.push(path.to_string()),
            _ => {}
        }

        if local_changed && !mirror_changed {
            diff.changed_local.push(path.to_string());
        } else if mirror_changed && !local_changed {
            diff.changed_mirror.push(path.to_string());
        }
    }

    diff
}
