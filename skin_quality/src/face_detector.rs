//! Face presence check.
//!
//! [`HeuristicFaceDetector`] is a skin-colour proxy, not a face detector:
//! it finds the largest connected patch of skin-toned pixels and reports
//! how much of the frame it covers. A large beige wall passes, a face in
//! blue studio light fails. Thresholds (`minFaceSize`) are calibrated to
//! that coverage number, so swapping in a real detector means supplying a
//! different [`FaceDetector`], not changing this one.

use crate::metrics::{Checked, FaceDetection, FaceRegion};
use crate::pixel_grid::PixelGrid;
use crate::sampling::SamplePlan;

pub const NO_FACE_DETECTED: &str = "No face detected in image";

/// Raw detector output before the configured thresholds are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceEstimate {
    /// Fraction of image area covered by the candidate region, 0-1.
    pub coverage: f64,
    /// Candidate bounding box, `None` when nothing plausible was found.
    pub region: Option<FaceRegion>,
}

impl FaceEstimate {
    pub fn none() -> Self {
        Self {
            coverage: 0.0,
            region: None,
        }
    }
}

/// Pluggable face presence backend.
pub trait FaceDetector: Send + Sync {
    fn detect(&self, grid: &PixelGrid) -> FaceEstimate;
}

/// Rule-based RGB skin classifier (Peer/Kovac daylight rule).
#[inline]
pub fn is_skin_tone(r: u8, g: u8, b: u8) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95
        && g > 40
        && b > 20
        && max - min > 15
        && r.abs_diff(g) > 15
        && r > g
        && r > b
}

#[derive(Debug, Clone)]
pub struct HeuristicFaceDetector {
    /// Regions with fewer sampled pixels than this are treated as noise.
    pub min_region_samples: usize,
}

impl Default for HeuristicFaceDetector {
    fn default() -> Self {
        Self {
            min_region_samples: 64,
        }
    }
}

impl HeuristicFaceDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_region_samples(mut self, samples: usize) -> Self {
        self.min_region_samples = samples;
        self
    }
}

impl FaceDetector for HeuristicFaceDetector {
    fn detect(&self, grid: &PixelGrid) -> FaceEstimate {
        let plan = SamplePlan::for_dimensions(grid.width(), grid.height());
        let (cols, rows) = (plan.cols(), plan.rows());

        let mut mask = vec![false; cols * rows];
        for (row, y) in plan.ys().enumerate() {
            for (col, x) in plan.xs().enumerate() {
                let [r, g, b, _] = grid.rgba(x, y);
                mask[row * cols + col] = is_skin_tone(r, g, b);
            }
        }

        let Some(component) = largest_component(&mut mask, cols, rows) else {
            return FaceEstimate::none();
        };
        if component.size < self.min_region_samples {
            return FaceEstimate::none();
        }

        let step = plan.step as u32;
        let x = component.min_col as u32 * step;
        let y = component.min_row as u32 * step;
        let region = FaceRegion {
            x,
            y,
            width: ((component.max_col as u32 + 1) * step).min(grid.width()) - x,
            height: ((component.max_row as u32 + 1) * step).min(grid.height()) - y,
        };

        FaceEstimate {
            coverage: component.size as f64 / plan.sample_count() as f64,
            region: Some(region),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Component {
    size: usize,
    min_col: usize,
    max_col: usize,
    min_row: usize,
    max_row: usize,
}

/// Largest 4-connected `true` region. Clears visited cells in `mask`.
/// Ties keep the first region in scan order, so the result is deterministic.
fn largest_component(mask: &mut [bool], cols: usize, rows: usize) -> Option<Component> {
    let mut best: Option<Component> = None;
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..mask.len() {
        if !mask[start] {
            continue;
        }
        mask[start] = false;
        stack.push(start);

        let mut comp = Component {
            size: 0,
            min_col: usize::MAX,
            max_col: 0,
            min_row: usize::MAX,
            max_row: 0,
        };

        while let Some(idx) = stack.pop() {
            let (row, col) = (idx / cols, idx % cols);
            comp.size += 1;
            comp.min_col = comp.min_col.min(col);
            comp.max_col = comp.max_col.max(col);
            comp.min_row = comp.min_row.min(row);
            comp.max_row = comp.max_row.max(row);

            if col > 0 && mask[idx - 1] {
                mask[idx - 1] = false;
                stack.push(idx - 1);
            }
            if col + 1 < cols && mask[idx + 1] {
                mask[idx + 1] = false;
                stack.push(idx + 1);
            }
            if row > 0 && mask[idx - cols] {
                mask[idx - cols] = false;
                stack.push(idx - cols);
            }
            if row + 1 < rows && mask[idx + cols] {
                mask[idx + cols] = false;
                stack.push(idx + cols);
            }
        }

        if best.map_or(true, |b| comp.size > b.size) {
            best = Some(comp);
        }
    }

    best
}

/// Apply the configured thresholds to a detector estimate.
/// `min_face_size` is a percentage of image area.
pub fn check_face(estimate: FaceEstimate, min_face_size: f64) -> Checked<FaceDetection> {
    let face_detected = estimate.region.is_some() && estimate.coverage * 100.0 >= min_face_size;
    tracing::debug!(
        coverage = estimate.coverage,
        face_detected,
        "face presence analyzed"
    );

    let metrics = FaceDetection {
        face_detected,
        face_size: if estimate.region.is_some() {
            estimate.coverage
        } else {
            0.0
        },
        region: estimate.region,
    };

    if face_detected {
        Checked::pass(metrics)
    } else {
        Checked::flag(metrics, NO_FACE_DETECTED.to_string())
    }
}
