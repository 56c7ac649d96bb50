//! Baseline store
//!
//! The baseline is the mirror's fingerprint map as of the end of the last
//! successful sync. It lives in a small JSON document with a single `hashes`
//! field and is always replaced wholesale, never merged.

use crate::types::{FingerprintMap, SyncError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk layout of the baseline file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaselineFile {
    /// Relative path → digest, written in sorted order
    #[serde(default)]
    pub hashes: BTreeMap<String, String>,
}

/// Load the baseline stored at `state_path`
///
/// A missing file is equivalent to an empty baseline (first sync).
pub fn load_baseline(state_path: &Path) -> Result<FingerprintMap, SyncError> {
    if !state_path.exists() {
        debug!(path = %state_path.display(), "no baseline recorded yet");
        return Ok(FingerprintMap::new());
    }

    let content = fs::read_to_string(state_path).map_err(|e| SyncError::io(state_path, e))?;
    let file: BaselineFile =
        serde_json::from_str(&content).map_err(|source| SyncError::Baseline {
            path: state_path.to_path_buf(),
            source,
        })?;

    Ok(file.hashes.into())
}

/// Replace the baseline stored at `state_path` with `hashes`
pub fn save_baseline(state_path: &Path, hashes: &FingerprintMap) -> Result<(), SyncError> {
    if let Some(parent) = state_path.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }

    let file = BaselineFile {
        hashes: hashes.to_sorted(),
    };
    let mut json = serde_json::to_string_pretty(&file).map_err(|source| SyncError::Baseline {
        path: state_path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    fs::write(state_path, json).map_err(|e| SyncError::io(state_path, e))?;
    debug!(path = %state_path.display(), entries = hashes.len(), "baseline saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_baseline_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let map = load_baseline(&temp_dir.path().join("state.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = temp_dir.path().join(".orcasync/state.json");

        let mut hashes = FingerprintMap::new();
        hashes.insert("machine/printer.json", "h1");
        hashes.insert("filament/pla.json", "h2");

        save_baseline(&state_path, &hashes).unwrap();
        assert_eq!(load_baseline(&state_path).unwrap(), hashes);
    }

    #[test]
    fn test_saved_file_layout() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = temp_dir.path().join("state.json");

        let mut hashes = FingerprintMap::new();
        hashes.insert("b", "2");
        hashes.insert("a", "1");
        save_baseline(&state_path, &hashes).unwrap();

        let content = fs::read_to_string(&state_path).unwrap();
        assert!(content.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["hashes"]["a"], "1");
        assert_eq!(value["hashes"]["b"], "2");
        assert!(content.find("\"a\"").unwrap() < content.find("\"b\"").unwrap());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = temp_dir.path().join("state.json");

        let mut first = FingerprintMap::new();
        first.insert("old", "1");
        save_baseline(&state_path, &first).unwrap();

        let mut second = FingerprintMap::new();
        second.insert("new", "2");
        save_baseline(&state_path, &second).unwrap();

        let loaded = load_baseline(&state_path).unwrap();
        assert!(!loaded.contains("old"));
        assert_eq!(loaded.get("new"), Some("2"));
    }

    #[test]
    fn test_missing_hashes_field_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = temp_dir.path().join("state.json");
        fs::write(&state_path, "{\"other\": 1}").unwrap();

        assert!(load_baseline(&state_path).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_baseline_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let state_path = temp_dir.path().join("state.json");
        fs::write(&state_path, "not json").unwrap();

        let result = load_baseline(&state_path);
        assert!(matches!(result, Err(SyncError::Baseline { .. })));
    }
}
