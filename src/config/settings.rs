//! Persisted settings file (`.orcasync/config.toml`)

use crate::types::SyncError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Default mirror location, relative to the repository root
pub const DEFAULT_MIRROR_DIR: &str = "./profiles";

/// User-editable settings
///
/// Every field falls back to its default when missing; unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Live application settings directory (supports `~`, `$VAR`, `%VAR%`)
    pub local_base_dir: String,

    /// Optional subdirectory of `local_base_dir` that holds the synced tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_subdir: Option<String>,

    /// Top-level folders that participate in sync (empty = everything)
    pub scope_folders: Vec<String>,

    /// Git-tracked mirror directory (relative paths resolve against the repo root)
    pub mirror_dir: String,

    /// Paths containing any of these substrings are ignored
    pub exclude_substrings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            local_base_dir: default_local_base_dir().to_string(),
            scope_subdir: Some("user/default".to_string()),
            scope_folders: vec![
                "filament".to_string(),
                "machine".to_string(),
                "process".to_string(),
            ],
            mirror_dir: DEFAULT_MIRROR_DIR.to_string(),
            exclude_substrings: [
                "/cache/",
                "/Cache/",
                "/logs/",
                "/Logs/",
                ".DS_Store",
                "Thumbs.db",
                ".lock",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Best-effort location of OrcaSlicer's data directory for this OS
pub fn default_local_base_dir() -> &'static str {
    if cfg!(target_os = "macos") {
        "~/Library/Application Support/OrcaSlicer"
    } else if cfg!(target_os = "windows") {
        "%APPDATA%\\OrcaSlicer"
    } else {
        "~/.config/OrcaSlicer"
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|e| SyncError::Config(format!("Invalid settings: {}", e)))
    }

    /// Render settings as TOML text
    pub fn to_toml(&self) -> Result<String, SyncError> {
        toml::to_string_pretty(self)
            .map_err(|e| SyncError::Config(format!("Failed to serialize settings: {}", e)))
    }

    /// Load settings from `path`, writing the defaults first if it is missing
    pub fn load_or_init(path: &Path) -> Result<Self, SyncError> {
        if !path.exists() {
            let settings = Settings::default();
            settings.save(path)?;
            info!(path = %path.display(), "wrote default settings");
            return Ok(settings);
        }

        let text = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        Self::from_toml(&text)
    }

    /// Write settings to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), SyncError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
        }
        fs::write(path, self.to_toml()?).map_err(|e| SyncError::io(path, e))
    }
}
