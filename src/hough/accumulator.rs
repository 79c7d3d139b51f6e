//! Weighted Hough accumulation in `(k, b)` space.
//!
//! For an `N × M` input (`rows × cols`):
//! - horizontal family: `(2M + 1) × (N + 2M)` cells, `row = k·col + b`,
//!   b-index `= round(row − k·col) + M`;
//! - vertical family: `(2N + 1) × (2N + M)` cells, `col = k·row + b`,
//!   b-index `= round(col − k·row) + N`.
//!
//! k-index `i` of `K` samples maps to `k = −1 + 2i/(K − 1)`. Every non-zero cell
//! votes its weight exactly once per k-row, so each k-row sums to the total
//! input weight. k-rows are disjoint and are filled in parallel.
use crate::error::{RectifyError, Result};
use crate::image::WeightGrid;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Orientation family of an accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Lines `row = k·col + b`.
    Horizontal,
    /// Lines `col = k·row + b`.
    Vertical,
}

impl Family {
    /// `(slope samples, intercept cells)` for a `rows × cols` input.
    pub fn shape(self, rows: usize, cols: usize) -> (usize, usize) {
        match self {
            Family::Horizontal => (2 * cols + 1, rows + 2 * cols),
            Family::Vertical => (2 * rows + 1, 2 * rows + cols),
        }
    }

    /// Shift applied to intercepts so that the smallest one lands on cell 0.
    pub fn offset(self, rows: usize, cols: usize) -> usize {
        match self {
            Family::Horizontal => cols,
            Family::Vertical => rows,
        }
    }

    /// `(dependent, independent)` coordinates of the cell `(row, col)`.
    #[inline]
    fn coords(self, row: usize, col: usize) -> (f64, f64) {
        match self {
            Family::Horizontal => (row as f64, col as f64),
            Family::Vertical => (col as f64, row as f64),
        }
    }
}

/// Slope value of k-index `index` among `samples` uniformly spaced samples.
#[inline]
pub fn slope_for_index(index: usize, samples: usize) -> f64 {
    if samples <= 1 {
        return 0.0;
    }
    -1.0 + 2.0 * index as f64 / (samples - 1) as f64
}

/// Accumulator of one family. `grid.rows` are k-samples, `grid.cols` b-cells.
#[derive(Clone, Debug)]
pub struct HoughSpace {
    pub family: Family,
    pub grid: WeightGrid,
    pub offset: usize,
}

impl HoughSpace {
    pub fn slope_samples(&self) -> usize {
        self.grid.rows
    }

    #[inline]
    pub fn slope_at(&self, k_index: usize) -> f64 {
        slope_for_index(k_index, self.grid.rows)
    }

    #[inline]
    pub fn intercept_at(&self, b_index: usize) -> f64 {
        b_index as f64 - self.offset as f64
    }
}

/// Both accumulators of one input grid.
#[derive(Clone, Debug)]
pub struct HoughPair {
    pub horizontal: HoughSpace,
    pub vertical: HoughSpace,
}

impl HoughPair {
    pub fn get(&self, family: Family) -> &HoughSpace {
        match family {
            Family::Horizontal => &self.horizontal,
            Family::Vertical => &self.vertical,
        }
    }
}

/// Build the horizontal and vertical accumulators of `weights`.
pub fn accumulate(weights: &WeightGrid, max_cells: usize) -> Result<HoughPair> {
    Ok(HoughPair {
        horizontal: accumulate_family(weights, Family::Horizontal, max_cells)?,
        vertical: accumulate_family(weights, Family::Vertical, max_cells)?,
    })
}

/// Build the accumulator of a single family.
pub fn accumulate_family(weights: &WeightGrid, family: Family, max_cells: usize) -> Result<HoughSpace> {
    if weights.rows == 0 || weights.cols == 0 {
        return Err(RectifyError::EmptyImage);
    }
    let (k_samples, b_cells) = family.shape(weights.rows, weights.cols);
    let cells = k_samples
        .checked_mul(b_cells)
        .filter(|&c| c <= max_cells)
        .ok_or(RectifyError::AccumulatorTooLarge {
            cells: k_samples.saturating_mul(b_cells),
            limit: max_cells,
        })?;
    let offset = family.offset(weights.rows, weights.cols);

    let votes: Vec<(f64, f64, u64)> = weights
        .nonzero()
        .map(|(r, c, w)| {
            let (dep, indep) = family.coords(r, c);
            (dep, indep, w)
        })
        .collect();

    let mut grid = WeightGrid::new(k_samples, b_cells);
    grid.data
        .par_chunks_mut(b_cells)
        .enumerate()
        .for_each(|(k_index, row)| {
            let k = slope_for_index(k_index, k_samples);
            for &(dep, indep, w) in &votes {
                let b = (dep - k * indep).round() as isize + offset as isize;
                if b >= 0 && (b as usize) < b_cells {
                    row[b as usize] += w;
                }
            }
        });

    debug!(
        "hough {:?}: input {}x{} votes={} space {}x{} ({} cells)",
        family,
        weights.rows,
        weights.cols,
        votes.len(),
        k_samples,
        b_cells,
        cells
    );
    Ok(HoughSpace {
        family,
        grid,
        offset,
    })
}
