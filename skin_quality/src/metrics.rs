//! Report types returned to upload handlers.
//!
//! Every type serializes with camelCase keys (`isValid`, `laplacianVariance`,
//! `faceDetected`, ...).

use serde::{Deserialize, Serialize};

/// Output of one sub-check: its measurements plus an optional issue or
/// warning message.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<M> {
    pub metrics: M,
    pub message: Option<String>,
}

impl<M> Checked<M> {
    pub fn pass(metrics: M) -> Self {
        Self {
            metrics,
            message: None,
        }
    }

    pub fn flag(metrics: M, message: String) -> Self {
        Self {
            metrics,
            message: Some(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetrics {
    pub width: u32,
    pub height: u32,
    /// width * height / 1e6, rounded to two decimals.
    pub megapixels: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectRatioMetrics {
    /// Long side / short side, always >= 1.
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingMetrics {
    /// Mean Rec.601 luma, 0-255.
    pub brightness: f64,
    pub is_well_lit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharpnessMetrics {
    pub laplacian_variance: f64,
    pub is_sharp: bool,
}

/// Axis-aligned box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetection {
    pub face_detected: bool,
    /// Fraction of image area covered by the detected region, 0-1.
    pub face_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<FaceRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub resolution: ResolutionMetrics,
    pub aspect_ratio: AspectRatioMetrics,
    pub lighting: LightingMetrics,
    pub sharpness: SharpnessMetrics,
    /// Only present when the face check was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_detection: Option<FaceDetection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Weighted composite, 0-100.
    pub score: f64,
    /// Hard failures in resolution, lighting, sharpness, face order.
    pub issues: Vec<String>,
    /// Soft flags that never affect `is_valid`.
    pub warnings: Vec<String>,
    pub metrics: QualityMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl QuickValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
        }
    }
}
