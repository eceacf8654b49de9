//! Weighted 0-100 quality score.
//!
//! Each dimension scores 100 when it passes. A failing dimension scores at
//! most `FAIL_CAP`, scaled by how close it came to its threshold, so a
//! failure always ranks below any pass and a worse measurement never
//! scores higher than a better one.

use crate::config::ValidationConfig;
use crate::metrics::QualityMetrics;

pub const WEIGHT_RESOLUTION: f64 = 0.25;
pub const WEIGHT_LIGHTING: f64 = 0.25;
pub const WEIGHT_SHARPNESS: f64 = 0.30;
pub const WEIGHT_FACE: f64 = 0.20;

const FAIL_CAP: f64 = 50.0;

/// Per-dimension sub-scores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub resolution: f64,
    pub lighting: f64,
    pub sharpness: f64,
    pub face: Option<f64>,
}

fn ratio_score(value: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return FAIL_CAP;
    }
    FAIL_CAP * (value / threshold).clamp(0.0, 1.0)
}

pub fn resolution_score(width: u32, height: u32, min_width: u32, min_height: u32) -> f64 {
    if width >= min_width && height >= min_height {
        return 100.0;
    }
    let w = ratio_score(width as f64, min_width as f64);
    let h = ratio_score(height as f64, min_height as f64);
    w.min(h)
}

pub fn lighting_score(brightness: f64, min_brightness: f64, max_brightness: f64) -> f64 {
    if brightness > min_brightness && brightness < max_brightness {
        100.0
    } else if brightness <= min_brightness {
        ratio_score(brightness, min_brightness)
    } else {
        ratio_score(255.0 - brightness, 255.0 - max_brightness)
    }
}

pub fn sharpness_score(laplacian_variance: f64, min_sharpness: f64) -> f64 {
    if laplacian_variance >= min_sharpness {
        100.0
    } else {
        ratio_score(laplacian_variance, min_sharpness)
    }
}

/// `face_size` is a fraction, `min_face_size` a percentage.
pub fn face_score(face_detected: bool, face_size: f64, min_face_size: f64) -> f64 {
    if face_detected {
        100.0
    } else {
        ratio_score(face_size * 100.0, min_face_size)
    }
}

pub fn sub_scores(metrics: &QualityMetrics, config: &ValidationConfig) -> SubScores {
    SubScores {
        resolution: resolution_score(
            metrics.resolution.width,
            metrics.resolution.height,
            config.min_width,
            config.min_height,
        ),
        lighting: lighting_score(
            metrics.lighting.brightness,
            config.min_brightness,
            config.max_brightness,
        ),
        sharpness: sharpness_score(metrics.sharpness.laplacian_variance, config.min_sharpness),
        face: metrics
            .face_detection
            .as_ref()
            .map(|f| face_score(f.face_detected, f.face_size, config.min_face_size)),
    }
}

/// Weighted sum, renormalized when the face dimension is absent, rounded to
/// one decimal and clamped to [0, 100].
pub fn combine(scores: &SubScores) -> f64 {
    let mut weighted = scores.resolution * WEIGHT_RESOLUTION
        + scores.lighting * WEIGHT_LIGHTING
        + scores.sharpness * WEIGHT_SHARPNESS;
    let mut total_weight = WEIGHT_RESOLUTION + WEIGHT_LIGHTING + WEIGHT_SHARPNESS;

    if let Some(face) = scores.face {
        weighted += face * WEIGHT_FACE;
        total_weight += WEIGHT_FACE;
    }

    let score = weighted / total_weight;
    ((score * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

pub fn score(metrics: &QualityMetrics, config: &ValidationConfig) -> f64 {
    combine(&sub_scores(metrics, config))
}
