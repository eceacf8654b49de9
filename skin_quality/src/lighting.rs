//! Lighting analysis: mean Rec.601 luma over the sampled grid.

use crate::metrics::{Checked, LightingMetrics};
use crate::pixel_grid::PixelGrid;
use crate::sampling::SamplePlan;
use rayon::prelude::*;

pub const IMAGE_TOO_DARK: &str = "Image too dark";
pub const IMAGE_TOO_BRIGHT: &str = "Image too bright";

/// Mean luma in 0-255. Integer accumulation keeps the result exact for
/// uniform images and independent of thread scheduling.
pub fn mean_brightness(grid: &PixelGrid, plan: &SamplePlan) -> f64 {
    let rows: Vec<usize> = plan.ys().collect();
    let (sum, count) = rows
        .par_iter()
        .map(|&y| {
            plan.xs()
                .fold((0u64, 0u64), |(s, n), x| (s + grid.luma_milli(x, y) as u64, n + 1))
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    if count == 0 {
        return 0.0;
    }
    sum as f64 / (count as f64 * 1000.0)
}

pub fn check_lighting(
    grid: &PixelGrid,
    plan: &SamplePlan,
    min_brightness: f64,
    max_brightness: f64,
) -> Checked<LightingMetrics> {
    let brightness = mean_brightness(grid, plan);
    let is_well_lit = brightness > min_brightness && brightness < max_brightness;
    tracing::debug!(brightness, is_well_lit, "lighting analyzed");

    let metrics = LightingMetrics {
        brightness,
        is_well_lit,
    };

    if brightness <= min_brightness {
        Checked::flag(
            metrics,
            format!(
                "{}: mean brightness {:.1} (minimum {:.1})",
                IMAGE_TOO_DARK, brightness, min_brightness
            ),
        )
    } else if brightness >= max_brightness {
        Checked::flag(
            metrics,
            format!(
                "{}: mean brightness {:.1} (maximum {:.1})",
                IMAGE_TOO_BRIGHT, brightness, max_brightness
            ),
        )
    } else {
        Checked::pass(metrics)
    }
}
