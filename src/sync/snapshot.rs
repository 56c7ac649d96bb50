//! Pre-mutation snapshot of the three fingerprint maps

use super::{Hooks, ScanEvent, Side};
use crate::baseline::load_baseline;
use crate::config::Config;
use crate::diff::{reconcile, ThreeWayDiff};
use crate::scanner::scan_tree;
use crate::types::{FingerprintMap, SyncError};
use std::path::Path;
use tracing::debug;

/// Local, mirror and baseline fingerprints plus their reconciliation
///
/// Captured once, before any operation mutates either tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub local: FingerprintMap,
    pub mirror: FingerprintMap,
    pub baseline: FingerprintMap,
    pub diff: ThreeWayDiff,
}

impl Snapshot {
    /// Scan local, scan mirror, load the baseline, reconcile
    pub fn capture(config: &Config, hooks: &Hooks<'_>) -> Result<Self, SyncError> {
        let local = scan_side(config, Side::Local, &config.local_root, hooks)?;
        let mirror = scan_side(config, Side::Mirror, &config.mirror_root, hooks)?;
        let baseline = load_baseline(&config.state_path)?;
        let diff = reconcile(&local, &mirror, &baseline);

        debug!(
            local = local.len(),
            mirror = mirror.len(),
            baseline = baseline.len(),
            conflicts = diff.conflicts.len(),
            "snapshot captured"
        );

        Ok(Self {
            local,
            mirror,
            baseline,
            diff,
        })
    }
}

pub(crate) fn scan_side(
    config: &Config,
    side: Side,
    root: &Path,
    hooks: &Hooks<'_>,
) -> Result<FingerprintMap, SyncError> {
    hooks.scan(&ScanEvent::Started { side });

    let progress = |files: u64, bytes: u64| hooks.scan(&ScanEvent::Progress { side, files, bytes });
    let map = scan_tree(root, &config.scope, &config.exclusions, Some(&progress))?;

    hooks.scan(&ScanEvent::Finished {
        side,
        files: map.len(),
    });
    Ok(map)
}
