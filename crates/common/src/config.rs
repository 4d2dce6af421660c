//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HandmouseError, HandmouseResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Camera device and frame size.
    pub camera: CameraConfig,

    /// External hand-landmark detector process.
    pub detector: DetectorConfig,

    /// Gesture thresholds and cursor mapping.
    pub gesture: GestureConfig,

    /// Debug window settings.
    pub display: DisplayConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Camera capture parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Zero-based camera device index.
    pub device_index: i32,

    /// Frame width every captured frame is resized to (pixels).
    pub width: u32,

    /// Frame height every captured frame is resized to (pixels).
    pub height: u32,
}

/// How to launch the landmark detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Interpreter or executable to launch.
    pub program: String,

    /// Detector script passed as the first argument.
    pub script: PathBuf,

    /// Maximum number of hands the model looks for.
    pub max_hands: u32,

    /// Minimum detection confidence in `[0.0, 1.0]`.
    pub detection_confidence: f32,

    /// Minimum tracking confidence in `[0.0, 1.0]`.
    pub tracking_confidence: f32,
}

/// Gesture classification and cursor mapping parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Inset (pixels) from each frame edge bounding the active zone.
    pub frame_reduction: u32,

    /// Smoothing divisor; 1.0 disables smoothing.
    pub smoothening: f64,

    /// Fingertip distance (pixels) under which a pinch clicks.
    pub click_distance_px: f64,

    /// Blocking delay after each click (milliseconds).
    pub click_debounce_ms: u64,

    /// Mirror the cursor horizontally to match the mirrored preview.
    pub mirror_x: bool,
}

/// Debug window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Whether to open the debug window.
    pub enabled: bool,

    /// Window title.
    pub window_title: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handmouse_engine=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            detector: DetectorConfig::default(),
            gesture: GestureConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            width: 700,
            height: 500,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            script: PathBuf::from("scripts").join("hand_detect.py"),
            max_hands: 1,
            detection_confidence: 0.5,
            tracking_confidence: 0.5,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            frame_reduction: 100,
            smoothening: 10.0,
            click_distance_px: 20.0,
            click_debounce_ms: 200,
            mirror_x: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_title: "Hand Gesture Mouse".to_string(),
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
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Missing or malformed files are errors.
    pub fn load_from(path: &Path) -> HandmouseResult<Self> {
        if !path.exists() {
            return Err(HandmouseError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the standard location. Returns the path written.
    pub fn save(&self) -> HandmouseResult<PathBuf> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, json)?;
        Ok(config_path)
    }

    /// Check value ranges that the control loop relies on.
    pub fn validate(&self) -> HandmouseResult<()> {
        let camera = &self.camera;
        if camera.width == 0 || camera.height == 0 {
            return Err(HandmouseError::config(format!(
                "camera size must be non-zero, got {}x{}",
                camera.width, camera.height
            )));
        }

        let inset = self.gesture.frame_reduction.saturating_mul(2);
        if inset >= camera.width || inset >= camera.height {
            return Err(HandmouseError::config(format!(
                "frame_reduction {} leaves no gesture zone in a {}x{} frame",
                self.gesture.frame_reduction, camera.width, camera.height
            )));
        }

        if !(self.gesture.smoothening >= 1.0) {
            return Err(HandmouseError::config(format!(
                "smoothening must be >= 1.0, got {}",
                self.gesture.smoothening
            )));
        }

        if !(self.gesture.click_distance_px > 0.0) {
            return Err(HandmouseError::config(format!(
                "click_distance_px must be positive, got {}",
                self.gesture.click_distance_px
            )));
        }

        for (name, value) in [
            ("detection_confidence", self.detector.detection_confidence),
            ("tracking_confidence", self.detector.tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HandmouseError::config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        Ok(())
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
    base.join("handmouse").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_reference_setup() {
        let config = AppConfig::default();
        assert_eq!((config.camera.width, config.camera.height), (700, 500));
        assert_eq!(config.gesture.frame_reduction, 100);
        assert_eq!(config.gesture.smoothening, 10.0);
        assert_eq!(config.gesture.click_distance_px, 20.0);
        assert_eq!(config.gesture.click_debounce_ms, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"gesture": {"smoothening": 4.0}}"#).unwrap();
        assert_eq!(config.gesture.smoothening, 4.0);
        assert_eq!(config.gesture.frame_reduction, 100);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut config = AppConfig::default();
        config.gesture.smoothening = 0.5;
        assert!(matches!(
            config.validate(),
            Err(HandmouseError::Config { .. })
        ));

        let mut config = AppConfig::default();
        config.gesture.frame_reduction = 250;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.gesture.click_distance_px = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.detector.detection_confidence = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.camera.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_path_is_file_not_found() {
        let path = std::env::temp_dir().join("handmouse_missing_config.json");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(HandmouseError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_from_reads_written_file() {
        let dir = std::env::temp_dir().join("handmouse_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.camera.device_index = 2;
        config.gesture.mirror_x = false;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }
}
