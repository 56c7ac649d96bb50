//! Scope and exclusion filtering for relative paths

use std::collections::BTreeSet;

/// Set of top-level folder names that participate in sync.
///
/// An empty scope means the whole root is in scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    folders: BTreeSet<String>,
}

impl Scope {
    /// Scope covering the whole root
    pub fn whole() -> Self {
        Self::default()
    }

    /// Build a scope from folder names; duplicates and blank names are dropped
    pub fn new<I, S>(folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let folders = folders
            .into_iter()
            .map(|f| f.as_ref().trim_matches('/').to_string())
            .filter(|f| !f.is_empty())
            .collect();
        Self { folders }
    }

    /// Whether a folder restriction is in effect
    pub fn is_active(&self) -> bool {
        !self.folders.is_empty()
    }

    /// Configured folders in sorted order
    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().map(String::as_str)
    }

    /// Whether a `/`-separated relative path falls inside the scope
    pub fn contains(&self, rel: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        match rel.split('/').next() {
            Some(first) => self.folders.contains(first),
            None => false,
        }
    }
}

/// Coarse substring-based exclusion filter.
///
/// A relative path is excluded if any configured substring occurs anywhere
/// in it. No glob or regex semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionFilter {
    substrings: Vec<String>,
}

impl ExclusionFilter {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // An empty needle matches every path.
        let substrings = substrings
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
        Self { substrings }
    }

    pub fn is_excluded(&self, rel: &str) -> bool {
        self.substrings.iter().any(|s| rel.contains(s.as_str()))
    }

    pub fn substrings(&self) -> &[String] {
        &self.substrings
    }
}
