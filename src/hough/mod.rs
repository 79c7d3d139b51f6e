//! Slope–intercept Hough machinery shared by both passes of the detector.
//!
//! - `accumulator`: votes every weighted cell of a grid into two accumulators,
//!   one for near-horizontal lines (`row = k·col + b`) and one for
//!   near-vertical lines (`col = k·row + b`), with `k ∈ [-1, 1]`.
//! - `peaks`: adaptive `max − s·σ` thresholding that keeps between 0.001% and
//!   0.01% of the cells.
//! - `clusters`: collapses each 8-connected blob of surviving peaks into one
//!   weighted cell at its centroid.
//!
//! The accumulator consumes a `WeightGrid`, and so does its own output: the
//! second ("meta") pass runs the very same function over a clustered Hough
//! space, where collinear peaks reveal a common vanishing point.

pub mod accumulator;
pub mod clusters;
pub mod peaks;

pub use accumulator::{accumulate, accumulate_family, slope_for_index, Family, HoughPair, HoughSpace};
pub use clusters::{collapse_clusters, ClusterMap, ClusterPoint};
pub use peaks::{extract_peaks, PeakExtraction, PeakOptions};

use serde::{Deserialize, Serialize};

/// Knobs for the two Hough passes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Upper bound on the cells of a single accumulator.
    pub max_accumulator_cells: usize,
    /// Meta slopes with a smaller magnitude are rejected as degenerate.
    pub min_meta_slope: f64,
    pub peaks: PeakOptions,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            max_accumulator_cells: 64 << 20,
            min_meta_slope: 1e-9,
            peaks: PeakOptions::default(),
        }
    }
}
