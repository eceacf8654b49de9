//! Sampling plan shared by the pixel analyzers.
//!
//! Large uploads are read on a regular stride so the per-image cost stays
//! bounded. The stride is the smallest integer that keeps the sample count
//! at or below `MAX_SAMPLES`.

/// Upper bound on sampled positions per analyzer.
pub const MAX_SAMPLES: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePlan {
    pub step: usize,
    pub width: usize,
    pub height: usize,
}

impl SamplePlan {
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        let (w, h) = (width as u64, height as u64);
        let mut step = 1u64;
        while w.div_ceil(step) * h.div_ceil(step) > MAX_SAMPLES {
            step += 1;
        }
        Self {
            step: step as usize,
            width: width as usize,
            height: height as usize,
        }
    }

    pub fn xs(&self) -> impl Iterator<Item = usize> {
        (0..self.width).step_by(self.step)
    }

    pub fn ys(&self) -> impl Iterator<Item = usize> {
        (0..self.height).step_by(self.step)
    }

    /// Number of sampled columns.
    pub fn cols(&self) -> usize {
        self.width.div_ceil(self.step)
    }

    /// Number of sampled rows.
    pub fn rows(&self) -> usize {
        self.height.div_ceil(self.step)
    }

    pub fn sample_count(&self) -> usize {
        self.cols() * self.rows()
    }
}
