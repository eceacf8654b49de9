//! Resolution and aspect-ratio checks. Both depend on dimensions only.

use crate::metrics::{AspectRatioMetrics, Checked, ResolutionMetrics};

pub const RESOLUTION_TOO_LOW: &str = "Resolution too low";
pub const UNUSUAL_ASPECT_RATIO: &str = "Unusual aspect ratio";
pub const ASPECT_RATIO_TOO_EXTREME: &str = "Aspect ratio too extreme";

pub fn megapixels(width: u32, height: u32) -> f64 {
    let mp = (width as f64 * height as f64) / 1_000_000.0;
    (mp * 100.0).round() / 100.0
}

pub fn check_resolution(
    width: u32,
    height: u32,
    min_width: u32,
    min_height: u32,
) -> Checked<ResolutionMetrics> {
    let metrics = ResolutionMetrics {
        width,
        height,
        megapixels: megapixels(width, height),
    };

    if width < min_width || height < min_height {
        Checked::flag(
            metrics,
            format!(
                "{}: {}x{} (minimum {}x{})",
                RESOLUTION_TOO_LOW, width, height, min_width, min_height
            ),
        )
    } else {
        Checked::pass(metrics)
    }
}

/// Long side over short side; 1.0 for square images.
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    let long = width.max(height) as f64;
    let short = width.min(height).max(1) as f64;
    long / short
}

/// Lenient check used by full validation: extreme ratios only warn.
pub fn check_aspect_ratio(width: u32, height: u32, max_ratio: f64) -> Checked<AspectRatioMetrics> {
    let ratio = aspect_ratio(width, height);
    let metrics = AspectRatioMetrics { ratio };

    if ratio > max_ratio {
        Checked::flag(
            metrics,
            format!(
                "{}: {:.2}:1 (expected at most {:.2}:1)",
                UNUSUAL_ASPECT_RATIO, ratio, max_ratio
            ),
        )
    } else {
        Checked::pass(metrics)
    }
}
