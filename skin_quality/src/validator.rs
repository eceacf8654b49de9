//! Validation entry points.
//!
//! ```text
//! bytes -> decode -> PixelGrid -> resolution / aspect ratio   (dimensions only)
//!                              -> lighting | sharpness | face (rayon::join)
//!                              -> scorer -> ValidationResult
//! ```
//! Every call is independent: no caches, no globals, safe to run for many
//! uploads at once.

use crate::config::{QuickValidateConfig, ValidationConfig};
use crate::error::Result;
use crate::face_detector::{check_face, FaceDetector, HeuristicFaceDetector};
use crate::lighting::check_lighting;
use crate::metrics::{QualityMetrics, QuickValidationResult, ValidationResult};
use crate::pixel_grid::{decode_dimensions, PixelGrid};
use crate::resolution::{
    aspect_ratio, check_aspect_ratio, check_resolution, ASPECT_RATIO_TOO_EXTREME,
    RESOLUTION_TOO_LOW,
};
use crate::sampling::SamplePlan;
use crate::scorer;
use crate::sharpness::check_sharpness;

/// Decode `bytes` and run the full quality pipeline with the built-in
/// heuristic face detector.
pub fn validate_image_quality(bytes: &[u8], config: &ValidationConfig) -> Result<ValidationResult> {
    validate_image_quality_with_detector(bytes, config, &HeuristicFaceDetector::default())
}

pub fn validate_image_quality_with_detector(
    bytes: &[u8],
    config: &ValidationConfig,
    detector: &dyn FaceDetector,
) -> Result<ValidationResult> {
    config.validate()?;
    let grid = PixelGrid::decode(bytes)?;
    Ok(run_pipeline(&grid, config, detector))
}

/// Full pipeline over pixels the caller already decoded.
pub fn validate_pixels(grid: &PixelGrid, config: &ValidationConfig) -> Result<ValidationResult> {
    validate_pixels_with_detector(grid, config, &HeuristicFaceDetector::default())
}

pub fn validate_pixels_with_detector(
    grid: &PixelGrid,
    config: &ValidationConfig,
    detector: &dyn FaceDetector,
) -> Result<ValidationResult> {
    config.validate()?;
    Ok(run_pipeline(grid, config, detector))
}

fn run_pipeline(
    grid: &PixelGrid,
    config: &ValidationConfig,
    detector: &dyn FaceDetector,
) -> ValidationResult {
    let (width, height) = (grid.width(), grid.height());
    let span = tracing::info_span!("validate_image", width, height);
    let _guard = span.enter();

    let plan = SamplePlan::for_dimensions(width, height);
    let resolution = check_resolution(width, height, config.min_width, config.min_height);
    let aspect = check_aspect_ratio(width, height, config.max_aspect_ratio);

    let (lighting, (sharpness, face)) = rayon::join(
        || check_lighting(grid, &plan, config.min_brightness, config.max_brightness),
        || {
            rayon::join(
                || check_sharpness(grid, &plan, config.min_sharpness),
                || {
                    config
                        .require_face
                        .then(|| check_face(detector.detect(grid), config.min_face_size))
                },
            )
        },
    );

    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    issues.extend(resolution.message);
    issues.extend(lighting.message);
    issues.extend(sharpness.message);
    warnings.extend(aspect.message);

    let face_detection = face.map(|checked| {
        issues.extend(checked.message);
        checked.metrics
    });

    let metrics = QualityMetrics {
        resolution: resolution.metrics,
        aspect_ratio: aspect.metrics,
        lighting: lighting.metrics,
        sharpness: sharpness.metrics,
        face_detection,
    };
    let score = scorer::score(&metrics, config);
    let is_valid = issues.is_empty();

    tracing::info!(
        is_valid,
        score,
        issues = issues.len(),
        warnings = warnings.len(),
        "image validated"
    );

    ValidationResult {
        is_valid,
        score,
        issues,
        warnings,
        metrics,
    }
}

/// Cheap pre-filter: reads only the image header and rejects on the first
/// failing dimension check (resolution, then aspect ratio).
pub fn quick_validate(bytes: &[u8]) -> Result<QuickValidationResult> {
    quick_validate_with(bytes, &QuickValidateConfig::default())
}

pub fn quick_validate_with(
    bytes: &[u8],
    config: &QuickValidateConfig,
) -> Result<QuickValidationResult> {
    let (width, height) = decode_dimensions(bytes)?;
    let result = quick_validate_dimensions(width, height, config);
    tracing::debug!(width, height, is_valid = result.is_valid, "quick validation");
    Ok(result)
}

pub fn quick_validate_dimensions(
    width: u32,
    height: u32,
    config: &QuickValidateConfig,
) -> QuickValidationResult {
    let short = width.min(height);
    let long = width.max(height);
    if short < config.min_short_side || long < config.min_long_side {
        return QuickValidationResult::reject(RESOLUTION_TOO_LOW);
    }
    if aspect_ratio(width, height) >= config.max_aspect_ratio {
        return QuickValidationResult::reject(ASPECT_RATIO_TOO_EXTREME);
    }
    QuickValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QualityError;
    use crate::face_detector::{FaceEstimate, NO_FACE_DETECTED};
    use crate::metrics::FaceRegion;
    use crate::test_support::{checkerboard, gray_checkerboard, png, skin_patch, solid};
    use image::RgbaImage;
    use proptest::prelude::*;

    fn no_face() -> ValidationConfig {
        ValidationConfig::default().with_require_face(false)
    }

    fn has(list: &[String], needle: &str) -> bool {
        list.iter().any(|s| s.contains(needle))
    }

    #[test]
    fn test_low_resolution_rejected() {
        let bytes = png(&gray_checkerboard(300, 300, 20));
        let result = validate_image_quality(&bytes, &no_face()).unwrap();
        assert!(!result.is_valid);
        assert!(has(&result.issues, "Resolution too low"));
        assert_eq!(result.metrics.resolution.width, 300);
        assert_eq!(result.metrics.resolution.height, 300);
    }

    #[test]
    fn test_megapixels_reported() {
        let bytes = png(&gray_checkerboard(1024, 1024, 32));
        let result = validate_image_quality(&bytes, &no_face()).unwrap();
        assert!((result.metrics.resolution.megapixels - 1.05).abs() < 0.1);
    }

    #[test]
    fn test_aspect_ratio_only_warns() {
        let bytes = png(&gray_checkerboard(1000, 300, 25));
        let config = no_face().with_max_aspect_ratio(2.0);
        let result = validate_image_quality(&bytes, &config).unwrap();
        assert!(has(&result.warnings, "Unusual aspect ratio"));
        assert!(!has(&result.issues, "aspect ratio"));

        // wide but otherwise acceptable
        let bytes = png(&gray_checkerboard(1700, 800, 50));
        let result = validate_image_quality(&bytes, &config).unwrap();
        assert!(has(&result.warnings, "Unusual aspect ratio"));
        assert!(result.is_valid, "issues: {:?}", result.issues);
    }

    #[test]
    fn test_lighting_bounds() {
        let black = validate_image_quality(&png(&solid(800, 800, [0, 0, 0, 255])), &no_face())
            .unwrap();
        assert!(black.metrics.lighting.brightness < 40.0);
        assert!(has(&black.issues, "Image too dark"));
        assert!(!black.is_valid);

        let white = validate_image_quality(
            &png(&solid(800, 800, [255, 255, 255, 255])),
            &no_face(),
        )
        .unwrap();
        assert!(white.metrics.lighting.brightness > 220.0);
        assert!(has(&white.issues, "Image too bright"));
        assert!(!white.is_valid);

        let gray = validate_image_quality(
            &png(&solid(800, 800, [0x80, 0x80, 0x80, 255])),
            &no_face(),
        )
        .unwrap();
        assert!(gray.metrics.lighting.brightness > 40.0);
        assert!(gray.metrics.lighting.brightness < 220.0);
        assert!(gray.metrics.lighting.is_well_lit);
    }

    #[test]
    fn test_sharpness_discrimination() {
        let config = no_face().with_min_sharpness(100.0);
        let flat = validate_image_quality(&png(&solid(800, 800, [120, 90, 60, 255])), &config)
            .unwrap();
        assert!(!flat.metrics.sharpness.is_sharp);
        assert!(has(&flat.issues, "Image is blurry"));

        let sharp = validate_image_quality(&png(&checkerboard(800, 800, 50)), &config).unwrap();
        assert!(sharp.metrics.sharpness.is_sharp);
        assert!(sharp.metrics.sharpness.laplacian_variance > 1000.0);
    }

    #[test]
    fn test_face_present() {
        let config = ValidationConfig::default()
            .with_require_face(true)
            .with_min_face_size(5.0);
        let result = validate_image_quality(&png(&skin_patch(800, 800, 0.7)), &config).unwrap();
        let face = result.metrics.face_detection.clone().unwrap();
        assert!(face.face_detected);
        assert!(face.face_size > 0.0);
        assert!(result.is_valid, "issues: {:?}", result.issues);
        assert!(result.score > 50.0);
    }

    #[test]
    fn test_blue_image_has_no_face() {
        let config = ValidationConfig::default().with_require_face(true);
        let result =
            validate_image_quality(&png(&solid(800, 800, [0, 0, 255, 255])), &config).unwrap();
        assert!(!result.is_valid);
        assert!(result.issues.iter().any(|i| i == NO_FACE_DETECTED));
        assert!(!result.metrics.face_detection.unwrap().face_detected);
    }

    #[test]
    fn test_face_metrics_absent_when_not_required() {
        let result =
            validate_image_quality(&png(&gray_checkerboard(800, 800, 50)), &no_face()).unwrap();
        assert!(result.metrics.face_detection.is_none());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["metrics"].get("faceDetection").is_none());
    }

    #[test]
    fn test_score_ordering() {
        let poor = validate_image_quality(&png(&solid(300, 300, [5, 5, 5, 255])), &no_face())
            .unwrap();
        assert!(poor.score < 50.0, "poor score {}", poor.score);

        let good =
            validate_image_quality(&png(&gray_checkerboard(800, 800, 50)), &no_face()).unwrap();
        assert!(good.score > 50.0, "good score {}", good.score);
        assert!(good.is_valid);
    }

    #[test]
    fn test_issue_order_is_stable() {
        let config = ValidationConfig::default();
        let result =
            validate_image_quality(&png(&solid(300, 300, [0, 0, 0, 255])), &config).unwrap();
        let position = |needle: &str| {
            result
                .issues
                .iter()
                .position(|i| i.contains(needle))
                .unwrap()
        };
        assert_eq!(result.issues.len(), 4);
        assert!(position("Resolution too low") < position("Image too dark"));
        assert!(position("Image too dark") < position("Image is blurry"));
        assert!(position("Image is blurry") < position(NO_FACE_DETECTED));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let bytes = png(&skin_patch(900, 700, 0.5));
        let config = ValidationConfig::default();
        let first = validate_image_quality(&bytes, &config).unwrap();
        let second = validate_image_quality(&bytes, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_garbage_bytes_are_decode_error() {
        let err = validate_image_quality(b"\x89PNG but not really", &no_face()).unwrap_err();
        assert!(matches!(err, QualityError::Decode(_)));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let bytes = png(&gray_checkerboard(64, 64, 8));
        let config = no_face().with_brightness_range(100.0, 50.0);
        assert!(matches!(
            validate_image_quality(&bytes, &config),
            Err(QualityError::InvalidConfig(_))
        ));
    }

    struct FixedDetector(FaceEstimate);

    impl FaceDetector for FixedDetector {
        fn detect(&self, _grid: &PixelGrid) -> FaceEstimate {
            self.0.clone()
        }
    }

    #[test]
    fn test_custom_detector_is_used() {
        let detector = FixedDetector(FaceEstimate {
            coverage: 0.3,
            region: Some(FaceRegion {
                x: 100,
                y: 100,
                width: 400,
                height: 480,
            }),
        });
        let bytes = png(&gray_checkerboard(800, 800, 50));
        let result =
            validate_image_quality_with_detector(&bytes, &ValidationConfig::default(), &detector)
                .unwrap();
        let face = result.metrics.face_detection.unwrap();
        assert!(face.face_detected);
        assert_eq!(face.face_size, 0.3);
        assert!(result.is_valid);
    }

    #[test]
    fn test_validate_pixels_matches_bytes_path() {
        let img = skin_patch(820, 820, 0.6);
        let config = ValidationConfig::default();
        let from_bytes = validate_image_quality(&png(&img), &config).unwrap();
        let grid = PixelGrid::new(img.width(), img.height(), img.into_raw()).unwrap();
        let from_pixels = validate_pixels(&grid, &config).unwrap();
        assert_eq!(from_bytes, from_pixels);
    }

    #[test]
    fn test_quick_validate_short_circuits() {
        let small = quick_validate(&png(&RgbaImage::new(300, 300))).unwrap();
        assert_eq!(small, QuickValidationResult::reject("Resolution too low"));

        let wide = quick_validate(&png(&RgbaImage::new(2000, 600))).unwrap();
        assert!(!wide.is_valid);
        assert_eq!(wide.reason.as_deref(), Some("Aspect ratio too extreme"));

        let ok = quick_validate(&png(&RgbaImage::new(1024, 768))).unwrap();
        assert!(ok.is_valid);
        assert_eq!(ok.reason, None);
    }

    #[test]
    fn test_quick_validate_resolution_checked_first() {
        // small and extreme: resolution wins
        let result = quick_validate_dimensions(400, 100, &QuickValidateConfig::default());
        assert_eq!(result.reason.as_deref(), Some("Resolution too low"));
    }

    #[test]
    fn test_quick_validate_garbage_is_error() {
        assert!(quick_validate(b"nope").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn quick_decision_is_orientation_independent(w in 1u32..5000, h in 1u32..5000) {
            let config = QuickValidateConfig::default();
            prop_assert_eq!(
                quick_validate_dimensions(w, h, &config),
                quick_validate_dimensions(h, w, &config)
            );
        }

        #[test]
        fn quick_accepts_imply_bounds(w in 1u32..5000, h in 1u32..5000) {
            let config = QuickValidateConfig::default();
            let result = quick_validate_dimensions(w, h, &config);
            if result.is_valid {
                prop_assert!(w.min(h) >= config.min_short_side);
                prop_assert!(aspect_ratio(w, h) < config.max_aspect_ratio);
            } else {
                prop_assert!(result.reason.is_some());
            }
        }
    }
}
