//! Project configuration: the editing settings applied to a recording.
//!
//! The editor engine only reads and writes `background.crop`; every other
//! field passes through it untouched on its way to the render backend.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::CropRect;

/// The complete editing configuration for one recording, persisted as
/// `project-config.json` inside the recording bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfiguration {
    /// Background framing (padding, rounding, crop).
    pub background: BackgroundConfig,

    /// Webcam overlay settings.
    pub camera: CameraConfig,

    /// Cursor overlay settings.
    pub cursor: CursorConfig,
}

/// Background framing applied around and over the screen capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Fill behind the (padded) capture.
    pub source: BackgroundSource,

    /// Background blur strength `[0.0, 100.0]`.
    pub blur: f64,

    /// Padding around the capture in output pixels.
    pub padding: f64,

    /// Corner rounding of the capture in output pixels.
    pub rounding: f64,

    /// Inset of the capture content within its frame.
    pub inset: f64,

    /// Crop rectangle over the source display. `None` means full frame.
    pub crop: Option<CropRect>,
}

/// What fills the background behind the capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum BackgroundSource {
    /// Solid color, `#rrggbb`.
    Color { value: String },
    /// Two-stop linear gradient with an angle in degrees.
    Gradient {
        from: String,
        to: String,
        angle: f64,
    },
}

/// Webcam overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Hide the webcam overlay entirely.
    pub hide: bool,

    /// Mirror the webcam horizontally.
    pub mirror: bool,

    /// Corner placement for the overlay.
    pub position: CameraCorner,

    /// Corner rounding of the overlay in output pixels.
    pub rounding: f64,

    /// Shadow intensity `[0.0, 1.0]`.
    pub shadow: f64,
}

/// Corner placement for the webcam overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

/// Cursor overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Hide the rendered cursor.
    pub hide: bool,

    /// Cursor size multiplier.
    pub size: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            source: BackgroundSource::Color {
                value: "#1a1a1a".to_string(),
            },
            blur: 0.0,
            padding: 0.0,
            rounding: 0.0,
            inset: 0.0,
            crop: None,
        }
    }
}

impl Default for BackgroundSource {
    fn default() -> Self {
        Self::Color {
            value: "#1a1a1a".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            hide: false,
            mirror: false,
            position: CameraCorner::BottomRight,
            rounding: 0.0,
            shadow: 0.0,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            hide: false,
            size: 1.0,
        }
    }
}

impl ProjectConfiguration {
    /// Load a configuration from a recording bundle directory, falling back
    /// to defaults when no config has been saved yet.
    pub fn load(bundle_dir: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = config_path(bundle_dir.as_ref());
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ProjectError::IoError {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ProjectError::ParseError { path, source: e })
    }

    /// Save the configuration into a recording bundle directory.
    pub fn save(&self, bundle_dir: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = config_path(bundle_dir.as_ref());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ProjectError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| ProjectError::IoError { path, source: e })
    }
}

fn config_path(bundle_dir: &Path) -> PathBuf {
    bundle_dir.join("project-config.json")
}

/// Errors that can occur when working with project configuration files.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::XY;

    #[test]
    fn test_default_has_no_crop() {
        let config = ProjectConfiguration::default();
        assert!(config.background.crop.is_none());
        assert!(!config.camera.hide);
        assert_eq!(config.cursor.size, 1.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut config = ProjectConfiguration::default();
        config.background.crop = Some(CropRect::new(
            XY::new(50.0, 30.0),
            XY::new(1870.0, 1050.0),
        ));
        config.background.source = BackgroundSource::Gradient {
            from: "#4785ff".to_string(),
            to: "#ff4766".to_string(),
            angle: 90.0,
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: ProjectConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_legacy_files_default_missing_fields() {
        // A config written before the cursor settings existed still parses.
        let parsed: ProjectConfiguration =
            serde_json::from_str(r#"{ "background": { "padding": 16.0 } }"#).unwrap();
        assert_eq!(parsed.background.padding, 16.0);
        assert!(!parsed.cursor.hide);
        assert_eq!(parsed.camera.position, CameraCorner::BottomRight);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("reelcut_test_missing_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let config = ProjectConfiguration::load(&dir).unwrap();
        assert_eq!(config, ProjectConfiguration::default());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("reelcut_test_config_roundtrip");
        let _ = std::fs::remove_dir_all(&dir);

        let mut config = ProjectConfiguration::default();
        config.background.crop = Some(CropRect::new(XY::new(0.0, 0.0), XY::new(800.0, 600.0)));
        config.save(&dir).unwrap();

        let loaded = ProjectConfiguration::load(&dir).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }
}
