//! Skin Quality - upload-time photo validation for skin analysis
//!
//! Decides whether an uploaded photo is good enough to analyze:
//! - resolution and aspect ratio
//! - lighting (mean luma)
//! - sharpness (Laplacian variance)
//! - face presence (skin-tone heuristic, pluggable)
//!
//! Results are a weighted 0-100 score plus itemized issues (blocking) and
//! warnings (non-blocking).
//!
//! ```no_run
//! use skin_quality::{validate_image_quality, quick_validate, ValidationConfig};
//!
//! let bytes = std::fs::read("selfie.jpg")?;
//! if quick_validate(&bytes)?.is_valid {
//!     let result = validate_image_quality(&bytes, &ValidationConfig::default())?;
//!     println!("score {:.1}, issues {:?}", result.score, result.issues);
//! }
//! # Ok::<(), skin_quality::QualityError>(())
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod face_detector;
pub mod lighting;
pub mod logging;
pub mod metrics;
pub mod pixel_grid;
pub mod report;
pub mod resolution;
pub mod sampling;
pub mod scorer;
pub mod sharpness;
pub mod validator;

#[cfg(test)]
mod test_support;

pub use config::{QuickValidateConfig, ValidationConfig};
pub use error::{QualityError, Result};
pub use face_detector::{FaceDetector, FaceEstimate, HeuristicFaceDetector};
pub use metrics::{
    AspectRatioMetrics, FaceDetection, FaceRegion, LightingMetrics, QualityMetrics,
    QuickValidationResult, ResolutionMetrics, SharpnessMetrics, ValidationResult,
};
pub use pixel_grid::PixelGrid;
pub use report::{quality_feedback, QualityGrade, QualityVerdict};
pub use validator::{
    quick_validate, quick_validate_dimensions, quick_validate_with, validate_image_quality,
    validate_image_quality_with_detector, validate_pixels, validate_pixels_with_detector,
};
