//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FacecamError, FacecamResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Camera tracking parameters.
    pub tracking: TrackingDefaults,

    /// Input frame geometry.
    pub capture: CaptureDefaults,

    /// Virtual-camera output settings.
    pub output: OutputDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// How the zoom padding term is applied to the eased radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaddingMode {
    /// Padding is added to the eased radius on every frame, so the
    /// steady-state radius settles at `target + padding / easing`.
    #[default]
    Accumulate,
    /// Padding is a fixed margin around the target radius; the camera
    /// eases toward `target + padding`.
    Margin,
}

/// Default tracking parameters used by the application loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingDefaults {
    /// Per-frame easing coefficient in (0, 1].
    pub easing: f64,

    /// Zoom padding in pixels.
    pub padding: f64,

    /// How much slower panning is than zooming.
    pub pan_ratio: f64,

    /// Camera radius at startup (pixels).
    pub initial_radius: f64,

    /// Padding interpretation.
    pub padding_mode: PaddingMode,
}

/// Input frame geometry. Frames are resized to this before detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureDefaults {
    pub width: u32,
    pub height: u32,
}

/// Output frame settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDefaults {
    pub width: u32,
    pub height: u32,

    /// Flip output frames horizontally (selfie view).
    pub mirror: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "facecam=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tracking: TrackingDefaults::default(),
            capture: CaptureDefaults::default(),
            output: OutputDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for TrackingDefaults {
    fn default() -> Self {
        Self {
            easing: 0.25,
            padding: 25.0,
            pan_ratio: 3.0,
            initial_radius: 100.0,
            padding_mode: PaddingMode::Accumulate,
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
        }
    }
}

impl Default for OutputDefaults {
    fn default() -> Self {
        Self {
            width: 540,
            height: 540,
            mirror: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location. `Ok(None)` if no file exists.
    pub fn try_load() -> FacecamResult<Option<Self>> {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path. `Ok(None)` if no file exists.
    pub fn load_from(path: &Path) -> FacecamResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Check values the tracking loop cannot start with.
    ///
    /// Tracking filter parameters are validated by the tracker itself.
    pub fn validate(&self) -> FacecamResult<()> {
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(FacecamError::config(format!(
                "capture size must be positive, got {}x{}",
                self.capture.width, self.capture.height
            )));
        }
        if self.output.width == 0 || self.output.height == 0 {
            return Err(FacecamError::config(format!(
                "output size must be positive, got {}x{}",
                self.output.width, self.output.height
            )));
        }
        let radius = self.tracking.initial_radius;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FacecamError::config(format!(
                "initial radius must be positive, got {radius}"
            )));
        }
        Ok(())
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&config_path, json)?;
        Ok(config_path)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("facecam").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_loop() {
        let config = AppConfig::default();
        assert_eq!(config.tracking.easing, 0.25);
        assert_eq!(config.tracking.padding, 25.0);
        assert_eq!(config.tracking.pan_ratio, 3.0);
        assert_eq!(config.capture.width, 960);
        assert_eq!(config.capture.height, 540);
        assert_eq!(config.output.width, 540);
        assert_eq!(config.tracking.padding_mode, PaddingMode::Accumulate);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{ "tracking": { "easing": 0.1, "padding_mode": "margin" } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tracking.easing, 0.1);
        assert_eq!(config.tracking.padding, 25.0);
        assert_eq!(config.tracking.padding_mode, PaddingMode::Margin);
        assert_eq!(config.output, OutputDefaults::default());
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.capture.width = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.output.height = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.tracking.initial_radius = -5.0;
        assert!(matches!(config.validate(), Err(FacecamError::Config { .. })));
    }

    #[test]
    fn test_load_from_missing_file_is_none() {
        let loaded = AppConfig::load_from(Path::new("/nonexistent/facecam/config.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        let path = config_file_path();
        assert!(path.ends_with("facecam/config.json"));
    }
}
