//! Application configuration.
//!
//! Persisted as JSON under the XDG config directory; missing fields fall
//! back to defaults so old config files keep parsing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ReelcutResult;

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory where recording bundles are stored.
    pub recordings_dir: PathBuf,

    /// Editor defaults applied to new sessions.
    pub editor: EditorDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default editor behavior for new sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// Container extension for export destinations.
    pub export_extension: String,

    /// Open the export progress dialog automatically when an export starts.
    pub auto_open_export_dialog: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "reelcut=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path; `None` logs to stderr.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recordings_dir: default_recordings_dir(),
            editor: EditorDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            export_extension: "mp4".to_string(),
            auto_open_export_dialog: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl EditorDefaults {
    /// Export destination for a recording: `<dir>/<stem>.<extension>`.
    pub fn export_path(&self, dir: impl AsRef<Path>, stem: &str) -> PathBuf {
        dir.as_ref().join(stem).with_extension(&self.export_extension)
    }
}

impl AppConfig {
    /// Load from the standard location, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load() -> Self {
        Self::load_from(config_file_path())
    }

    /// Load from an explicit path. An absent file is the normal first-run
    /// case; a present but broken file is logged and replaced by defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "could not read config; using defaults"
                    );
                }
                return Self::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not parse config; using defaults"
                );
                Self::default()
            }
        }
    }

    /// Save to the standard location.
    pub fn save(&self) -> ReelcutResult<()> {
        self.save_to(config_file_path())
    }

    /// Save to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ReelcutResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn config_file_path() -> PathBuf {
    xdg_base("XDG_CONFIG_HOME", &[".config"])
        .join("reelcut")
        .join("config.json")
}

fn default_recordings_dir() -> PathBuf {
    xdg_base("XDG_DATA_HOME", &[".local", "share"])
        .join("reelcut")
        .join("recordings")
}

/// An XDG base directory, falling back to the conventional path under
/// `$HOME` (or `/tmp` on a stripped environment).
fn xdg_base(var: &str, home_fallback: &[&str]) -> PathBuf {
    if let Some(dir) = std::env::var_os(var) {
        return PathBuf::from(dir);
    }
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    home_fallback.iter().fold(home, |path, part| path.join(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("reelcut_test_app_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.editor.export_extension = "mov".to_string();
        config.logging.json = true;
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from("/nonexistent/reelcut/config.json");
        assert_eq!(config.editor.export_extension, "mp4");
        assert!(config.editor.auto_open_export_dialog);
    }

    #[test]
    fn test_partial_file_defaults_missing_fields() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "editor": { "export_extension": "webm" } }"#).unwrap();
        assert_eq!(parsed.editor.export_extension, "webm");
        assert!(parsed.editor.auto_open_export_dialog);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn test_export_path_applies_extension() {
        let defaults = EditorDefaults::default();
        assert_eq!(
            defaults.export_path("/videos", "demo"),
            PathBuf::from("/videos/demo.mp4")
        );
    }
}
