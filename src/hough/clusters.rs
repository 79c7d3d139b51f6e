//! Reduction of connected peak blobs to single weighted cells.
//!
//! Each 8-connected component of non-zero cells becomes one cell at the
//! nearest-integer centroid of its members, holding the summed weight of the
//! component. Components whose centroids round to the same cell add up there,
//! so the total weight is always conserved.
use crate::image::WeightGrid;
use crate::imgproc::label_components;
use log::debug;
use serde::Serialize;

/// One collapsed cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ClusterPoint {
    pub row: usize,
    pub col: usize,
    pub weight: u64,
}

#[derive(Clone, Debug)]
pub struct ClusterMap {
    /// Same shape as the input; non-zero only at cluster centroids.
    pub grid: WeightGrid,
    /// Non-zero cells of `grid` in row-major order.
    pub points: Vec<ClusterPoint>,
    /// Number of connected components found in the input.
    pub components: usize,
}

#[derive(Clone, Copy, Default)]
struct ComponentStats {
    cells: usize,
    sum_row: f64,
    sum_col: f64,
    weight: u64,
}

impl ComponentStats {
    fn push(&mut self, row: usize, col: usize, weight: u64) {
        self.cells += 1;
        self.sum_row += row as f64;
        self.sum_col += col as f64;
        self.weight += weight;
    }

    fn centroid(&self) -> (usize, usize) {
        let n = self.cells as f64;
        ((self.sum_row / n).round() as usize, (self.sum_col / n).round() as usize)
    }
}

/// Collapse every connected blob of `peaks` into its weighted centroid.
pub fn collapse_clusters(peaks: &WeightGrid) -> ClusterMap {
    let labels = label_components(peaks);
    let mut stats = vec![ComponentStats::default(); labels.count];
    for (r, c, w) in peaks.nonzero() {
        let label = labels.get(r, c) as usize;
        stats[label - 1].push(r, c, w);
    }

    let mut grid = WeightGrid::new(peaks.rows, peaks.cols);
    for s in &stats {
        let (r, c) = s.centroid();
        grid.add(r, c, s.weight);
    }
    let points: Vec<ClusterPoint> = grid
        .nonzero()
        .map(|(row, col, weight)| ClusterPoint { row, col, weight })
        .collect();
    debug!(
        "clusters: {} components -> {} points (weight {})",
        labels.count,
        points.len(),
        grid.sum()
    );
    ClusterMap {
        grid,
        points,
        components: labels.count,
    }
}
