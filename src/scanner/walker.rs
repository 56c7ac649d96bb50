//! Sequential tree walker producing content fingerprints

use crate::hash::compute_hash;
use crate::types::{normalize_rel_path, ExclusionFilter, FingerprintMap, Scope, SyncError};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Callback for reporting scan progress
///
/// Arguments:
/// - `files_scanned`: Total number of files fingerprinted so far
/// - `bytes_scanned`: Total bytes hashed so far
pub type ProgressCallback<'a> = dyn Fn(u64, u64) + 'a;

/// Scan a tree and fingerprint every in-scope file
///
/// Walks `root_path` (or only `root_path/<folder>` for each scope folder when
/// the scope is active) and hashes every regular file whose normalized
/// relative path is not excluded.
///
/// # Arguments
/// * `root_path` - The root directory to scan
/// * `scope` - Top-level folders to restrict the scan to (empty = whole tree)
/// * `exclusions` - Substring filter applied to relative paths before hashing
/// * `on_progress` - Optional callback for progress updates (files_scanned, bytes_scanned)
///
/// # Returns
/// * `Ok(FingerprintMap)` - relative path → digest; empty if `root_path` is absent
/// * `Err(SyncError)` - a listed file could not be hashed
///
/// # Errors
/// * Entries that cannot be listed (permission denied on a directory) are
///   logged and skipped
/// * A file that disappears or becomes unreadable while hashing aborts the scan
pub fn scan_tree(
    root_path: &Path,
    scope: &Scope,
    exclusions: &ExclusionFilter,
    on_progress: Option<&ProgressCallback<'_>>,
) -> Result<FingerprintMap, SyncError> {
    let start_time = Instant::now();
    let mut map = FingerprintMap::new();

    if !root_path.exists() {
        debug!(root = %root_path.display(), "scan root absent, treating as empty");
        return Ok(map);
    }

    let mut counters = ScanCounters::default();

    if scope.is_active() {
        for folder in scope.folders() {
            let folder_path = root_path.join(folder);
            if !folder_path.is_dir() {
                debug!(folder = %folder_path.display(), "scope folder missing, skipping");
                continue;
            }
            walk_into(
                root_path,
                &folder_path,
                exclusions,
                &mut map,
                &mut counters,
                on_progress,
            )?;
        }
    } else {
        walk_into(
            root_path,
            root_path,
            exclusions,
            &mut map,
            &mut counters,
            on_progress,
        )?;
    }

    debug!(
        root = %root_path.display(),
        files = counters.files,
        bytes = counters.bytes,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "scan complete"
    );

    Ok(map)
}

#[derive(Debug, Default)]
struct ScanCounters {
    files: u64,
    bytes: u64,
}

fn walk_into(
    root_path: &Path,
    walk_path: &Path,
    exclusions: &ExclusionFilter,
    map: &mut FingerprintMap,
    counters: &mut ScanCounters,
    on_progress: Option<&ProgressCallback<'_>>,
) -> Result<(), SyncError> {
    // No .gitignore/.ignore/hidden-file handling: the exclusion filter is the only filter.
    let walker = ignore::WalkBuilder::new(walk_path)
        .standard_filters(false)
        .follow_links(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Error during directory traversal: {}. Scan will continue with remaining files.",
                    e
                );
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        if file_type.is_dir() {
            continue;
        }

        let size = if file_type.is_file() {
            match entry.metadata() {
                Ok(m) => m.len(),
                Err(e) => {
                    warn!(path = %entry.path().display(), "Failed to read metadata: {}", e);
                    continue;
                }
            }
        } else if file_type.is_symlink() {
            // Symlinks count only when they resolve to a regular file.
            match fs::metadata(entry.path()) {
                Ok(m) if m.is_file() => m.len(),
                Ok(_) => continue,
                Err(e) => {
                    warn!(path = %entry.path().display(), "Skipping broken symlink: {}", e);
                    continue;
                }
            }
        } else {
            // Pipes, sockets, devices
            continue;
        };

        let relative_path = match entry
            .path()
            .strip_prefix(root_path)
            .ok()
            .and_then(normalize_rel_path)
        {
            Some(rel) => rel,
            None => {
                warn!(
                    path = %entry.path().display(),
                    "Failed to calculate relative path, file will be skipped"
                );
                continue;
            }
        };

        if exclusions.is_excluded(&relative_path) {
            continue;
        }

        let digest = compute_hash(entry.path())?;
        map.insert(relative_path, digest);

        counters.files += 1;
        counters.bytes += size;

        if let Some(callback) = on_progress {
            callback(counters.files, counters.bytes);
        }
    }

    Ok(())
}
