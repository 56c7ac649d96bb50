//! Configuration management
//!
//! [`Settings`] is what the user edits on disk; [`Config`] is the resolved
//! runtime view with every storage location spelled out as an absolute path.

mod cli;
mod expand;
mod settings;

pub use cli::{Cli, Commands};
pub use expand::expand_path;
pub use settings::{default_local_base_dir, Settings, DEFAULT_MIRROR_DIR};

use crate::types::{ExclusionFilter, Scope, SyncError};
use std::path::{Path, PathBuf};

/// Directory (under the repository root) holding tool-owned files
pub const APP_DIR_NAME: &str = ".orcasync";
/// Settings file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Baseline file name inside [`APP_DIR_NAME`]
pub const STATE_FILE_NAME: &str = "state.json";

/// Resolved configuration passed to every sync operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Git repository containing the mirror and the baseline
    pub repo_root: PathBuf,

    /// Settings file location
    pub config_path: PathBuf,

    /// Baseline file location
    pub state_path: PathBuf,

    /// Live tree (`local_base_dir` joined with `scope_subdir`)
    pub local_root: PathBuf,

    /// Git-tracked mirror tree
    pub mirror_root: PathBuf,

    /// Top-level folders that participate in sync
    pub scope: Scope,

    /// Substring exclusions
    pub exclusions: ExclusionFilter,
}

impl Config {
    /// Configuration with explicit roots, whole-tree scope and no exclusions
    pub fn new(
        repo_root: impl Into<PathBuf>,
        local_root: impl Into<PathBuf>,
        mirror_root: impl Into<PathBuf>,
    ) -> Self {
        let repo_root = repo_root.into();
        let app_dir = repo_root.join(APP_DIR_NAME);
        Self {
            config_path: app_dir.join(CONFIG_FILE_NAME),
            state_path: app_dir.join(STATE_FILE_NAME),
            repo_root,
            local_root: local_root.into(),
            mirror_root: mirror_root.into(),
            scope: Scope::whole(),
            exclusions: ExclusionFilter::default(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionFilter) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Load (or create on first run) the settings of `repo_root` and resolve them
    pub fn load(repo_root: &Path) -> Result<Self, SyncError> {
        let config_path = repo_root.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        let settings = Settings::load_or_init(&config_path)?;
        Self::from_settings(repo_root, &settings)
    }

    /// Resolve settings against `repo_root`
    pub fn from_settings(repo_root: &Path, settings: &Settings) -> Result<Self, SyncError> {
        if settings.local_base_dir.trim().is_empty() {
            return Err(SyncError::Config(
                "local_base_dir must not be empty".to_string(),
            ));
        }
        if settings.mirror_dir.trim().is_empty() {
            return Err(SyncError::Config("mirror_dir must not be empty".to_string()));
        }

        for folder in &settings.scope_folders {
            validate_scope_folder(folder)?;
        }

        let mut local_root = resolve_against(repo_root, &settings.local_base_dir);
        if let Some(subdir) = settings.scope_subdir.as_deref() {
            let subdir = subdir.trim_matches(|c: char| c == '/' || c == '\\');
            if !subdir.is_empty() {
                local_root = local_root.join(subdir);
            }
        }
        let mirror_root = resolve_against(repo_root, &settings.mirror_dir);

        if mirror_root == repo_root || mirror_root == local_root {
            return Err(SyncError::Config(format!(
                "mirror_dir must be a dedicated directory, got {}",
                mirror_root.display()
            )));
        }

        Ok(Self::new(repo_root, local_root, mirror_root)
            .with_scope(Scope::new(&settings.scope_folders))
            .with_exclusions(ExclusionFilter::new(
                settings.exclude_substrings.iter().cloned(),
            )))
    }
}

/// Scope entries must name a single folder directly under a root
fn validate_scope_folder(raw: &str) -> Result<(), SyncError> {
    use std::path::Component;

    let name = raw.trim_end_matches('/');
    if name.is_empty() {
        return Ok(());
    }
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal || name.contains('\\') {
        return Err(SyncError::Config(format!(
            "scope_folders entry {:?} must be a plain folder name",
            raw
        )));
    }
    Ok(())
}

/// Expand a configured path and anchor it at `base` when relative
fn resolve_against(base: &Path, raw: &str) -> PathBuf {
    let expanded = expand_path(raw);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    lexical_normalize(&joined)
}

/// Drop `.` components and fold `..` without touching the filesystem
fn lexical_normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_for(local: &str) -> Settings {
        Settings {
            local_base_dir: local.to_string(),
            scope_subdir: None,
            scope_folders: vec![],
            mirror_dir: DEFAULT_MIRROR_DIR.to_string(),
            exclude_substrings: vec![],
        }
    }

    #[test]
    fn test_new_places_state_under_app_dir() {
        let config = Config::new("/repo", "/live", "/repo/profiles");
        assert_eq!(config.state_path, Path::new("/repo/.orcasync/state.json"));
        assert_eq!(config.config_path, Path::new("/repo/.orcasync/config.toml"));
        assert!(!config.scope.is_active());
    }

    #[test]
    fn test_relative_mirror_resolves_against_repo() {
        let repo = Path::new("/repo");
        let config = Config::from_settings(repo, &settings_for("/live")).unwrap();
        assert_eq!(config.mirror_root, Path::new("/repo/profiles"));
        assert_eq!(config.local_root, Path::new("/live"));
    }

    #[test]
    fn test_scope_folders_must_be_plain_names() {
        for bad in ["..", ".", "machine/../..", "a/b", "/etc", "..\\x"] {
            let mut settings = settings_for("/live");
            settings.scope_folders = vec![bad.to_string()];
            let err = Config::from_settings(Path::new("/repo"), &settings).unwrap_err();
            assert!(matches!(err, SyncError::Config(_)), "accepted {:?}", bad);
        }

        let mut settings = settings_for("/live");
        settings.scope_folders = vec!["machine/".to_string(), "".to_string()];
        let config = Config::from_settings(Path::new("/repo"), &settings).unwrap();
        assert_eq!(config.scope, Scope::new(["machine"]));
    }

    #[test]
    fn test_scope_subdir_is_joined() {
        let mut settings = settings_for("/live");
        settings.scope_subdir = Some("user/default/".to_string());
        settings.scope_folders = vec!["machine".to_string(), "machine".to_string()];

        let config = Config::from_settings(Path::new("/repo"), &settings).unwrap();
        assert_eq!(config.local_root, Path::new("/live/user/default"));
        assert_eq!(config.scope, Scope::new(["machine"]));
    }

    #[test]
    fn test_empty_scope_subdir_is_ignored() {
        let mut settings = settings_for("/live");
        settings.scope_subdir = Some(String::new());
        let config = Config::from_settings(Path::new("/repo"), &settings).unwrap();
        assert_eq!(config.local_root, Path::new("/live"));
    }

    #[test]
    fn test_mirror_equal_to_repo_is_rejected() {
        let mut settings = settings_for("/live");
        settings.mirror_dir = ".".to_string();
        let result = Config::from_settings(Path::new("/repo"), &settings);
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_empty_local_dir_is_rejected() {
        let result = Config::from_settings(Path::new("/repo"), &settings_for("  "));
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_load_bootstraps_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();

        assert!(config.config_path.exists());
        assert_eq!(config.mirror_root, temp_dir.path().join("profiles"));
        assert!(config.scope.is_active());
        assert!(config.exclusions.is_excluded("machine/.DS_Store"));
    }

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(
            lexical_normalize(Path::new("/repo/./a/../profiles")),
            Path::new("/repo/profiles")
        );
    }
}
