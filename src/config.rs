//! Configuration management for the emotion detection application.
//!
//! Every field defaults to the built-in constants, so running without a
//! configuration file behaves exactly like the fixed defaults.

use crate::{
    constants::{
        DEFAULT_CAMERA_INDEX, DEFAULT_EMOTION_MODEL, DEFAULT_MODEL_INPUT_SIZE, DEFAULT_MODEL_LABELS,
        DETECTION_INTERVAL_SECS, EMOTION_HISTORY_SIZE, FONT_SCALE, FRAME_HEIGHT, FRAME_WIDTH, OVERLAY_ALPHA,
        TEXT_THICKNESS, WINDOW_TITLE,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capture configuration
    pub camera: CameraConfig,

    /// Detection timing and smoothing
    pub detection: DetectionConfig,

    /// Model configuration
    pub models: ModelConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Capture device and working resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Webcam index
    pub index: i32,

    /// Width every frame is resized to
    pub frame_width: i32,

    /// Height every frame is resized to
    pub frame_height: i32,
}

/// Detection interval and smoothing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Seconds between classifier invocations
    pub interval_seconds: f64,

    /// Number of recent labels used for majority voting
    pub history_size: usize,
}

/// Model file paths and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the emotion ONNX model
    pub emotion_model: PathBuf,

    /// Optional Haar cascade used to crop the face before classification
    pub face_cascade: Option<PathBuf>,

    /// Model output labels, in output order
    pub labels: Vec<String>,

    /// Side of the square grayscale model input
    pub input_size: i32,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title
    pub window_title: String,

    /// Text scale
    pub font_scale: f64,

    /// Text stroke thickness
    pub text_thickness: i32,

    /// Opacity of the box behind the result text (0.0-1.0)
    pub overlay_alpha: f64,

    /// Run without a window
    pub headless: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_CAMERA_INDEX,
            frame_width: FRAME_WIDTH,
            frame_height: FRAME_HEIGHT,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            interval_seconds: DETECTION_INTERVAL_SECS,
            history_size: EMOTION_HISTORY_SIZE,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            emotion_model: PathBuf::from(DEFAULT_EMOTION_MODEL),
            face_cascade: Some(PathBuf::from("assets/haarcascade_frontalface_default.xml")),
            labels: DEFAULT_MODEL_LABELS.iter().map(ToString::to_string).collect(),
            input_size: DEFAULT_MODEL_INPUT_SIZE,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_title: WINDOW_TITLE.to_string(),
            font_scale: FONT_SCALE,
            text_thickness: TEXT_THICKNESS,
            overlay_alpha: OVERLAY_ALPHA,
            headless: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.camera.frame_width <= 0 || self.camera.frame_height <= 0 {
            return Err(Error::Config(format!(
                "Frame size must be positive, got {}x{}",
                self.camera.frame_width, self.camera.frame_height
            )));
        }

        let interval = self.detection.interval_seconds;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(Error::Config(format!("Detection interval must be positive, got {interval}")));
        }
        if self.detection.history_size == 0 {
            return Err(Error::Config("History size must be greater than 0".to_string()));
        }

        if self.models.labels.is_empty() {
            return Err(Error::Config("At least one model label is required".to_string()));
        }
        let mut seen = HashSet::new();
        for label in &self.models.labels {
            if !seen.insert(label.to_lowercase()) {
                return Err(Error::Config(format!("Duplicate model label: {label}")));
            }
        }
        if self.models.input_size <= 0 {
            return Err(Error::Config("Model input size must be greater than 0".to_string()));
        }

        let font_scale = self.display.font_scale;
        if !font_scale.is_finite() || font_scale <= 0.0 {
            return Err(Error::Config(format!("Font scale must be positive, got {font_scale}")));
        }
        if self.display.text_thickness <= 0 {
            return Err(Error::Config("Text thickness must be greater than 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.display.overlay_alpha) {
            return Err(Error::Config("Overlay alpha must be between 0.0 and 1.0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Student Emotion Detection Configuration

camera:
  index: 0
  frame_width: 600
  frame_height: 400

detection:
  interval_seconds: 1.5
  history_size: 5

models:
  emotion_model: "assets/emotion_model.onnx"
  face_cascade: "assets/haarcascade_frontalface_default.xml"
  labels: ["angry", "disgust", "fear", "happy", "sad", "surprise", "neutral"]
  input_size: 48

display:
  window_title: "Student Emotion Detection"
  font_scale: 0.7
  text_thickness: 2
  overlay_alpha: 0.5
  headless: false
"#;
