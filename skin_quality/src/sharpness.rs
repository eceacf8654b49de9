//! Blur detection via variance of the 4-neighbour Laplacian.
//!
//! Kernel:
//! ```text
//!  0 -1  0
//! -1  4 -1
//!  0 -1  0
//! ```
//! On large images the kernel centers are taken on the sampling stride but
//! always read their immediate neighbours, so edge energy survives
//! subsampling.

use crate::metrics::{Checked, SharpnessMetrics};
use crate::pixel_grid::PixelGrid;
use crate::sampling::SamplePlan;
use rayon::prelude::*;

pub const IMAGE_IS_BLURRY: &str = "Image is blurry";

#[derive(Debug, Default, Clone, Copy)]
struct Moments {
    sum: i64,
    sq_sum: u64,
    count: u64,
}

impl Moments {
    fn merge(self, other: Moments) -> Moments {
        Moments {
            sum: self.sum + other.sum,
            sq_sum: self.sq_sum + other.sq_sum,
            count: self.count + other.count,
        }
    }

    /// Population variance computed exactly in integers before the final
    /// division; never negative, 0 for constant input.
    fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as i128;
        let s = self.sum as i128;
        let q = self.sq_sum as i128;
        let numerator = n * q - s * s;
        numerator as f64 / (n * n) as f64
    }
}

pub fn laplacian_variance(grid: &PixelGrid, plan: &SamplePlan) -> f64 {
    let (w, h) = (plan.width, plan.height);
    if w < 3 || h < 3 {
        return 0.0;
    }

    let rows: Vec<usize> = (1..h - 1).step_by(plan.step).collect();
    let moments = rows
        .par_iter()
        .map(|&y| {
            let mut m = Moments::default();
            for x in (1..w - 1).step_by(plan.step) {
                let center = grid.gray(x, y);
                let laplacian = 4 * center
                    - grid.gray(x, y - 1)
                    - grid.gray(x, y + 1)
                    - grid.gray(x - 1, y)
                    - grid.gray(x + 1, y);
                m.sum += laplacian as i64;
                m.sq_sum += (laplacian as i64 * laplacian as i64) as u64;
                m.count += 1;
            }
            m
        })
        .reduce(Moments::default, Moments::merge);

    moments.variance()
}

pub fn check_sharpness(
    grid: &PixelGrid,
    plan: &SamplePlan,
    min_sharpness: f64,
) -> Checked<SharpnessMetrics> {
    let laplacian_variance = laplacian_variance(grid, plan);
    let is_sharp = laplacian_variance >= min_sharpness;
    tracing::debug!(laplacian_variance, is_sharp, "sharpness analyzed");

    let metrics = SharpnessMetrics {
        laplacian_variance,
        is_sharp,
    };

    if is_sharp {
        Checked::pass(metrics)
    } else {
        Checked::flag(
            metrics,
            format!(
                "{}: sharpness {:.1} (minimum {:.1})",
                IMAGE_IS_BLURRY, laplacian_variance, min_sharpness
            ),
        )
    }
}
