//! FingerprintMap - content hashes keyed by normalized relative path

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};

/// Map: normalized relative path → hex content digest
///
/// Keys always use `/` as separator regardless of platform. Iteration order
/// is unspecified; use [`FingerprintMap::sorted_paths`] for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintMap {
    entries: HashMap<String, String>,
}

impl FingerprintMap {
    /// Create a new empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fingerprint, replacing any previous digest for the path
    pub fn insert(&mut self, path: impl Into<String>, digest: impl Into<String>) {
        self.entries.insert(path.into(), digest.into());
    }

    /// Get the digest recorded for a path
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Check if a path exists in the map
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Return the number of fingerprints in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over all (path, digest) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, d)| (p.as_str(), d.as_str()))
    }

    /// Iterator over just the paths
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All paths in lexicographic order
    pub fn sorted_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.paths().collect();
        paths.sort_unstable();
        paths
    }

    /// Ordered copy of the map, used for stable serialization
    pub fn to_sorted(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(p, d)| (p.clone(), d.clone()))
            .collect()
    }
}

impl FromIterator<(String, String)> for FingerprintMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for FingerprintMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Render a relative filesystem path as a `/`-separated key.
///
/// Returns `None` for paths that are not plain relative paths (absolute,
/// containing `..`, or empty).
pub fn normalize_rel_path(rel: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Join a `/`-separated key onto a root directory
pub fn resolve_rel_path(root: &Path, rel: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in rel.split('/').filter(|p| !p.is_empty()) {
        path.push(part);
    }
    path
}
