//! Adaptive peak isolation in a Hough space.
//!
//! The threshold is `max − s·σ` for a softness `s`. Phase 1 lowers `s` in
//! coarse steps (zeroing more cells) until at least `min_zero_fraction` of the
//! cells are zero; phase 2 raises it in fine steps (restoring cells) until no
//! more than `max_zero_fraction` are zero. The retained set is therefore always
//! `{cells > 0 and ≥ threshold}` for the last threshold, which lets both phases
//! count zeros with a binary search over the sorted cell values.
use crate::error::{RectifyError, Result};
use crate::image::WeightGrid;
use log::debug;
use serde::{Deserialize, Serialize};

const STAGE: &str = "peak extraction";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakOptions {
    pub initial_softness: f64,
    /// Softness decrement of phase 1.
    pub coarse_step: f64,
    /// Softness increment of phase 2.
    pub fine_step: f64,
    pub min_zero_fraction: f64,
    pub max_zero_fraction: f64,
    /// Iteration cap per phase.
    pub max_iterations: usize,
    /// Spaces with a smaller standard deviation are treated as flat.
    pub min_std: f64,
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            initial_softness: 1.6,
            coarse_step: 0.1,
            fine_step: 0.01,
            min_zero_fraction: 0.9999,
            max_zero_fraction: 0.99999,
            max_iterations: 1_000_000,
            min_std: 1e-9,
        }
    }
}

/// Thresholded space plus the parameters it converged to.
#[derive(Clone, Debug)]
pub struct PeakExtraction {
    pub peaks: WeightGrid,
    pub softness: f64,
    pub threshold: f64,
    pub iterations: usize,
}

impl PeakExtraction {
    pub fn peak_count(&self) -> usize {
        self.peaks.count_nonzero()
    }
}

/// Zero every cell of `space` except its dominant peaks.
pub fn extract_peaks(space: &WeightGrid, opts: &PeakOptions) -> Result<PeakExtraction> {
    let n = space.len();
    if n == 0 {
        return Err(RectifyError::degenerate_lines(STAGE, "empty accumulator"));
    }
    let (_, std) = space.mean_std();
    if !(std.is_finite() && std > opts.min_std) {
        return Err(RectifyError::degenerate_lines(
            STAGE,
            format!("flat accumulator (std={std:.3e})"),
        ));
    }
    let max = space.max() as f64;

    let mut sorted = space.data.clone();
    sorted.sort_unstable();
    let zero_cells = sorted.partition_point(|&v| v == 0);
    // σ > 0 guarantees at least one positive cell.
    let min_positive = sorted[zero_cells] as f64;
    let zeros_below = |t: f64| sorted.partition_point(|&v| v == 0 || (v as f64) < t);
    let fraction = |zeros: usize| zeros as f64 / n as f64;

    let mut softness = opts.initial_softness;
    let mut threshold = f64::NEG_INFINITY;
    let mut zeros = zero_cells;
    let mut iterations = 0usize;

    let mut phase_steps = 0usize;
    while fraction(zeros) < opts.min_zero_fraction {
        if phase_steps >= opts.max_iterations {
            return Err(not_converged(1, softness));
        }
        phase_steps += 1;
        softness -= opts.coarse_step;
        threshold = max - softness * std;
        zeros = zeros_below(threshold);
    }
    iterations += phase_steps;

    phase_steps = 0;
    while fraction(zeros) > opts.max_zero_fraction {
        // Every positive cell is already retained.
        if threshold <= min_positive {
            break;
        }
        if phase_steps >= opts.max_iterations {
            return Err(not_converged(2, softness));
        }
        phase_steps += 1;
        softness += opts.fine_step;
        threshold = max - softness * std;
        zeros = zeros_below(threshold);
    }
    iterations += phase_steps;

    let mut peaks = WeightGrid::new(space.rows, space.cols);
    for (dst, &v) in peaks.data.iter_mut().zip(&space.data) {
        if v != 0 && v as f64 >= threshold {
            *dst = v;
        }
    }
    debug!(
        "peaks: {}x{} max={} std={:.3} softness={:.2} threshold={:.2} kept={} zero_fraction={:.6}",
        space.rows,
        space.cols,
        max,
        std,
        softness,
        threshold,
        n - zeros,
        fraction(zeros)
    );
    Ok(PeakExtraction {
        peaks,
        softness,
        threshold,
        iterations,
    })
}

fn not_converged(phase: u8, softness: f64) -> RectifyError {
    RectifyError::degenerate_lines(
        STAGE,
        format!("threshold search phase {phase} did not converge (softness={softness:.2})"),
    )
}
