//! Saved path settings.
//!
//! Paths entered once can be remembered in a small JSON file in the home
//! directory. The key names match the settings file written by the earlier
//! desktop version of the tool, so existing files keep working.

use std::path::{Path, PathBuf};

use qls_sticker_core::SheetTargets;
use serde::{Deserialize, Serialize};

use crate::cli::MasterPaths;

/// File name of the settings file in the home directory.
pub const SETTINGS_FILE_NAME: &str = ".qls_sticker_settings.json";

/// Persisted paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSettings {
    /// PDF base folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<PathBuf>,
    /// Sticker mapping workbook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<PathBuf>,
    /// BX726 master workbook.
    #[serde(default, rename = "m1", skip_serializing_if = "Option::is_none")]
    pub master_bx726: Option<PathBuf>,
    /// V769 master workbook.
    #[serde(default, rename = "m2", skip_serializing_if = "Option::is_none")]
    pub master_v769: Option<PathBuf>,
    /// Output folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    /// Master worksheet names, when they differ from the defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_targets: Option<SheetTargets>,
}

impl SavedSettings {
    /// Overlay explicitly given paths on top of the saved ones.
    pub fn merged(&self, base: Option<&Path>, paths: &MasterPaths) -> SavedSettings {
        fn pick(given: Option<&Path>, saved: &Option<PathBuf>) -> Option<PathBuf> {
            given.map(Path::to_path_buf).or_else(|| saved.clone())
        }

        SavedSettings {
            base: pick(base, &self.base),
            mapping: pick(paths.mapping.as_deref(), &self.mapping),
            master_bx726: pick(paths.master_bx726.as_deref(), &self.master_bx726),
            master_v769: pick(paths.master_v769.as_deref(), &self.master_v769),
            out: pick(paths.out.as_deref(), &self.out),
            sheet_targets: self.sheet_targets.clone(),
        }
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        *self == SavedSettings::default()
    }

    /// Master worksheet names in effect.
    pub fn targets(&self) -> SheetTargets {
        self.sheet_targets.clone().unwrap_or_default()
    }
}

/// Location of the settings file and its load/save operations.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.qls_sticker_settings.json`, or the working directory when no home
    /// directory can be determined.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(SETTINGS_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved settings. A missing or unreadable file yields defaults.
    pub fn load(&self) -> SavedSettings {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return SavedSettings::default(),
            Err(e) => {
                tracing::warn!("could not read settings {}: {e}", self.path.display());
                return SavedSettings::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed settings {}: {e}", self.path.display());
            SavedSettings::default()
        })
    }

    /// Save settings. Failures are logged and reported as `false`.
    pub fn save(&self, settings: &SavedSettings) -> bool {
        let result = serde_json::to_string_pretty(settings)
            .map_err(std::io::Error::other)
            .and_then(|json| {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&self.path, json)
            });

        match result {
            Ok(()) => {
                tracing::info!("saved settings to {}", self.path.display());
                true
            }
            Err(e) => {
                tracing::warn!("could not save settings {}: {e}", self.path.display());
                false
            }
        }
    }

    /// Delete the settings file. Returns whether a file was removed.
    pub fn clear(&self) -> std::io::Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
