//! Vanishing point recovery with a double Hough transform.
//!
//! Lines converging on a point `(r0, c0)` satisfy `b = r0 − k·c0` in the
//! horizontal accumulator (`b = c0 − k·r0` in the vertical one), i.e. their
//! peaks are collinear in `(k-index, b-index)` space. After peak extraction and
//! cluster collapsing, a second Hough pass over the clustered space finds that
//! line. Its parameters are turned back into the intercept-cell at `k = 0` and
//! `k = 1`, from which the point follows:
//!
//! - along-coordinate = `b(0) − offset`
//! - across-coordinate = `b(0) − b(1)`
//!
//! The meta line is parameterised either as `k_idx = κ·b_idx + β` (horizontal
//! meta family) or `b_idx = κ·k_idx + β` (vertical meta family), whichever holds
//! the larger peak; see [`MetaBranch`].
use crate::error::{RectifyError, Result};
use crate::hough::{
    accumulate, collapse_clusters, extract_peaks, Family, HoughPair, HoughParams, HoughSpace,
};
use crate::image::WeightGrid;
use crate::progress::ProgressSink;
use log::{debug, warn};
use serde::Serialize;

const STAGE: &str = "vanishing point estimation";

/// Pixel position of a vanishing point; may lie far outside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VanishingPoint {
    pub row: f64,
    pub col: f64,
}

impl VanishingPoint {
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    pub fn is_finite(&self) -> bool {
        self.row.is_finite() && self.col.is_finite()
    }

    /// Scale into another resolution of the same image.
    pub fn scaled(&self, row_scale: f64, col_scale: f64) -> Self {
        Self {
            row: self.row * row_scale,
            col: self.col * col_scale,
        }
    }
}

/// How the dominant meta line maps a k-index to a b-index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetaBranch {
    /// Horizontal meta family: `k_idx = κ·b_idx + β`, solved for `b_idx`.
    SolveForIntercept,
    /// Vertical meta family: `b_idx = κ·k_idx + β`, evaluated directly.
    EvaluateAtSlope,
}

impl MetaBranch {
    pub fn for_family(family: Family) -> Self {
        match family {
            Family::Horizontal => MetaBranch::SolveForIntercept,
            Family::Vertical => MetaBranch::EvaluateAtSlope,
        }
    }

    /// b-index of the meta line at k-index `k_index`.
    pub fn intercept_index(self, slope: f64, intercept: f64, k_index: f64, min_slope: f64) -> Result<f64> {
        match self {
            MetaBranch::SolveForIntercept => {
                if slope.abs() < min_slope {
                    return Err(RectifyError::degenerate_lines(
                        STAGE,
                        format!("meta line slope {slope:.3e} is too close to zero"),
                    ));
                }
                Ok((k_index - intercept) / slope)
            }
            MetaBranch::EvaluateAtSlope => Ok(slope * k_index + intercept),
        }
    }
}

/// Dominant line of the meta accumulator.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaLine {
    pub branch: MetaBranch,
    pub slope: f64,
    pub intercept: f64,
    pub votes: u64,
}

/// Vanishing point of one family together with the stage statistics.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyEstimate {
    pub family: Family,
    pub point: VanishingPoint,
    pub meta_line: MetaLine,
    pub peak_count: usize,
    pub cluster_count: usize,
    pub softness: f64,
    pub threshold: f64,
}

/// Both vanishing points of an edge map.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VanishingDetection {
    pub horizontal: FamilyEstimate,
    pub vertical: FamilyEstimate,
}

/// Recover the vanishing point encoded by the clustered peaks of `space`.
pub fn estimate_vanishing_point(
    space: &HoughSpace,
    clusters: &WeightGrid,
    params: &HoughParams,
) -> Result<(VanishingPoint, MetaLine)> {
    let meta = accumulate(clusters, params.max_accumulator_cells)?;
    let dominant = if meta.horizontal.grid.max() > meta.vertical.grid.max() {
        &meta.horizontal
    } else {
        &meta.vertical
    };
    let (k_idx, b_idx, votes) = dominant
        .grid
        .argmax()
        .filter(|&(_, _, v)| v > 0)
        .ok_or_else(|| RectifyError::degenerate_lines(STAGE, "meta accumulator is empty"))?;

    let line = MetaLine {
        branch: MetaBranch::for_family(dominant.family),
        slope: dominant.slope_at(k_idx),
        intercept: dominant.intercept_at(b_idx),
        votes,
    };

    let samples = space.slope_samples();
    let k_zero = ((samples - 1) / 2) as f64;
    let k_one = (samples - 1) as f64;
    let b_zero = line
        .branch
        .intercept_index(line.slope, line.intercept, k_zero, params.min_meta_slope)?;
    let b_one = line
        .branch
        .intercept_index(line.slope, line.intercept, k_one, params.min_meta_slope)?;

    let along = b_zero - space.offset as f64;
    let across = b_zero - b_one;
    let point = match space.family {
        Family::Horizontal => VanishingPoint::new(along, across),
        Family::Vertical => VanishingPoint::new(across, along),
    };
    if !point.is_finite() {
        return Err(RectifyError::degenerate_lines(
            STAGE,
            format!("non-finite {:?} vanishing point", space.family),
        ));
    }
    debug!(
        "vp {:?}: meta {:?} slope={:.4} intercept={:.1} votes={} -> row={:.1} col={:.1}",
        space.family, line.branch, line.slope, line.intercept, line.votes, point.row, point.col
    );
    Ok((point, line))
}

/// Run the full double Hough chain on one family's accumulator.
fn estimate_family(
    space: &HoughSpace,
    params: &HoughParams,
    progress: &mut dyn ProgressSink,
) -> Result<FamilyEstimate> {
    let peaks = extract_peaks(&space.grid, &params.peaks)?;
    let clusters = collapse_clusters(&peaks.peaks);
    progress.advance(3);
    let (point, meta_line) = estimate_vanishing_point(space, &clusters.grid, params)?;
    Ok(FamilyEstimate {
        family: space.family,
        point,
        meta_line,
        peak_count: peaks.peak_count(),
        cluster_count: clusters.points.len(),
        softness: peaks.softness,
        threshold: peaks.threshold,
    })
}

/// Detect the dominant horizontal and vertical vanishing points of `edges`.
///
/// Coordinates are in the pixel grid of `edges`.
pub fn detect_vanishing_points(
    edges: &WeightGrid,
    params: &HoughParams,
    progress: &mut dyn ProgressSink,
) -> Result<VanishingDetection> {
    progress.start("Retrieving vanishing points");
    let spaces = accumulate(edges, params.max_accumulator_cells)?;
    progress.advance(3);
    let result = estimate_both(&spaces, params, progress);
    if let Err(err) = &result {
        warn!("vanishing point detection failed: {err}");
    }
    result
}

fn estimate_both(
    spaces: &HoughPair,
    params: &HoughParams,
    progress: &mut dyn ProgressSink,
) -> Result<VanishingDetection> {
    let horizontal = estimate_family(&spaces.horizontal, params, progress)?;
    progress.advance(3);
    let vertical = estimate_family(&spaces.vertical, params, progress)?;
    progress.advance(8);
    Ok(VanishingDetection {
        horizontal,
        vertical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hough::accumulate_family;
    use crate::progress::NoProgress;

    #[test]
    fn solve_branch_rejects_zero_slope() {
        let err = MetaBranch::SolveForIntercept
            .intercept_index(0.0, 10.0, 5.0, 1e-9)
            .unwrap_err();
        assert!(matches!(err, RectifyError::DegenerateLineGeometry { .. }));
        let b = MetaBranch::EvaluateAtSlope
            .intercept_index(0.0, 10.0, 5.0, 1e-9)
            .unwrap();
        assert_eq!(b, 10.0);
    }

    #[test]
    fn two_collinear_peaks_give_their_vanishing_point() {
        // Lines through (row 50, col 1000) in a 100 x 100 frame: slopes -0.04
        // and 0.04 hit intercepts 90 and 10.
        let edges = WeightGrid::new(100, 100);
        let space = accumulate_family(&edges, Family::Horizontal, usize::MAX).unwrap();
        let mut clusters = WeightGrid::new(space.grid.rows, space.grid.cols);
        clusters.set(96, 190, 100);
        clusters.set(104, 110, 100);
        let (vp, line) = estimate_vanishing_point(&space, &clusters, &HoughParams::default()).unwrap();
        assert_eq!(line.branch, MetaBranch::SolveForIntercept);
        assert!(line.slope < 0.0);
        // Several meta slopes tie within rounding; the first one is taken.
        assert!((vp.row - 50.0).abs() < 1e-6, "row {}", vp.row);
        assert!((vp.col - 1000.0).abs() < 100.0, "col {}", vp.col);
    }

    #[test]
    fn empty_edge_map_is_degenerate() {
        let edges = WeightGrid::new(20, 30);
        let err = detect_vanishing_points(&edges, &HoughParams::default(), &mut NoProgress).unwrap_err();
        assert!(matches!(err, RectifyError::DegenerateLineGeometry { .. }));
    }
}
