//! Validation thresholds.
//!
//! `ValidationConfig` deserializes from partial JSON: any key the caller
//! leaves out keeps its default. Keys are camelCase to match the upload
//! route's payload (`minWidth`, `requireFace`, ...).
//!
//! ```
//! use skin_quality::ValidationConfig;
//!
//! let config = ValidationConfig::from_json_str(r#"{ "requireFace": false }"#).unwrap();
//! assert!(!config.require_face);
//! assert_eq!(config.min_width, 800);
//! ```

use crate::error::{QualityError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MIN_WIDTH: u32 = 800;
pub const DEFAULT_MIN_HEIGHT: u32 = 800;
pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 2.0;
pub const DEFAULT_MIN_BRIGHTNESS: f64 = 40.0;
pub const DEFAULT_MAX_BRIGHTNESS: f64 = 220.0;
pub const DEFAULT_MIN_SHARPNESS: f64 = 100.0;
/// Percent of image area.
pub const DEFAULT_MIN_FACE_SIZE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    pub min_width: u32,
    pub min_height: u32,
    /// Long side / short side above which a warning is raised.
    pub max_aspect_ratio: f64,
    /// Mean luma (0-255) at or below which the image is too dark.
    pub min_brightness: f64,
    /// Mean luma (0-255) at or above which the image is too bright.
    pub max_brightness: f64,
    /// Minimum Laplacian variance for a sharp image.
    pub min_sharpness: f64,
    pub require_face: bool,
    /// Minimum skin region coverage, in percent of image area (0-100).
    pub min_face_size: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
            min_brightness: DEFAULT_MIN_BRIGHTNESS,
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
            min_sharpness: DEFAULT_MIN_SHARPNESS,
            require_face: true,
            min_face_size: DEFAULT_MIN_FACE_SIZE,
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_resolution(mut self, min_width: u32, min_height: u32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    pub fn with_max_aspect_ratio(mut self, ratio: f64) -> Self {
        self.max_aspect_ratio = ratio;
        self
    }

    pub fn with_brightness_range(mut self, min: f64, max: f64) -> Self {
        self.min_brightness = min;
        self.max_brightness = max;
        self
    }

    pub fn with_min_sharpness(mut self, min_sharpness: f64) -> Self {
        self.min_sharpness = min_sharpness;
        self
    }

    pub fn with_require_face(mut self, require_face: bool) -> Self {
        self.require_face = require_face;
        self
    }

    pub fn with_min_face_size(mut self, percent: f64) -> Self {
        self.min_face_size = percent;
        self
    }

    /// Reject threshold combinations that cannot be evaluated meaningfully.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("maxAspectRatio", self.max_aspect_ratio),
            ("minBrightness", self.min_brightness),
            ("maxBrightness", self.max_brightness),
            ("minSharpness", self.min_sharpness),
            ("minFaceSize", self.min_face_size),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(QualityError::InvalidConfig(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.max_aspect_ratio < 1.0 {
            return Err(QualityError::InvalidConfig(format!(
                "maxAspectRatio must be >= 1.0, got {}",
                self.max_aspect_ratio
            )));
        }
        if !(0.0..=255.0).contains(&self.min_brightness)
            || !(0.0..=255.0).contains(&self.max_brightness)
        {
            return Err(QualityError::InvalidConfig(format!(
                "brightness bounds must lie in [0, 255], got {}..{}",
                self.min_brightness, self.max_brightness
            )));
        }
        if self.min_brightness >= self.max_brightness {
            return Err(QualityError::InvalidConfig(format!(
                "minBrightness ({}) must be below maxBrightness ({})",
                self.min_brightness, self.max_brightness
            )));
        }
        if self.min_sharpness < 0.0 {
            return Err(QualityError::InvalidConfig(format!(
                "minSharpness must be >= 0, got {}",
                self.min_sharpness
            )));
        }
        if !(0.0..=100.0).contains(&self.min_face_size) {
            return Err(QualityError::InvalidConfig(format!(
                "minFaceSize is a percentage in [0, 100], got {}",
                self.min_face_size
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Strict thresholds for the quick pre-filter.
///
/// Resolution is checked orientation-independently against the short and
/// long side, so portrait and landscape uploads are treated alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickValidateConfig {
    pub min_short_side: u32,
    pub min_long_side: u32,
    /// Ratios at or above this are rejected outright.
    pub max_aspect_ratio: f64,
}

impl Default for QuickValidateConfig {
    fn default() -> Self {
        Self {
            min_short_side: 480,
            min_long_side: 640,
            max_aspect_ratio: 3.0,
        }
    }
}
