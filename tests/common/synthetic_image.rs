#![allow(dead_code)]

use perspective_fix::image::{RasterImage, WeightGrid};
use perspective_fix::VanishingPoint;

/// Slopes `step · j` for `j ∈ [-half, half]`.
pub fn symmetric_slopes(half: i32, step: f64) -> Vec<f64> {
    (-half..=half).map(|j| step * j as f64).collect()
}

/// Pixels of the line `row = vp.row + k·(col − vp.col)`, one per column.
pub fn horizontal_line(rows: usize, cols: usize, vp: VanishingPoint, k: f64) -> Vec<(usize, usize)> {
    let b = vp.row - k * vp.col;
    (0..cols)
        .filter_map(|c| {
            let r = (k * c as f64 + b).round();
            (r >= 0.0 && r < rows as f64).then_some((r as usize, c))
        })
        .collect()
}

/// Pixels of the line `col = vp.col + k·(row − vp.row)`, one per row.
pub fn vertical_line(rows: usize, cols: usize, vp: VanishingPoint, k: f64) -> Vec<(usize, usize)> {
    let b = vp.col - k * vp.row;
    (0..rows)
        .filter_map(|r| {
            let c = (k * r as f64 + b).round();
            (c >= 0.0 && c < cols as f64).then_some((r, c as usize))
        })
        .collect()
}

/// Binary edge map of two line families converging on `horizontal` and `vertical`.
pub fn converging_edge_map(
    rows: usize,
    cols: usize,
    horizontal: VanishingPoint,
    vertical: VanishingPoint,
    slopes: &[f64],
) -> WeightGrid {
    let mut edges = WeightGrid::new(rows, cols);
    for &k in slopes {
        for (r, c) in horizontal_line(rows, cols, horizontal, k)
            .into_iter()
            .chain(vertical_line(rows, cols, vertical, k))
        {
            edges.set(r, c, 1);
        }
    }
    edges
}

/// RGB rendering of the same line families: `thickness`-pixel dark strokes on a light background.
pub fn render_converging_lines(
    width: usize,
    height: usize,
    horizontal: VanishingPoint,
    vertical: VanishingPoint,
    slopes: &[f64],
    thickness: usize,
) -> RasterImage {
    let mut img = RasterImage::new(width, height, 3);
    img.data.iter_mut().for_each(|v| *v = 225);
    let mut paint = |r: usize, c: usize| {
        for dr in 0..thickness {
            for dc in 0..thickness {
                let (y, x) = (r + dr, c + dc);
                if y < height && x < width {
                    let i = (y * width + x) * 3;
                    img.data[i..i + 3].copy_from_slice(&[30, 40, 35]);
                }
            }
        }
    };
    for &k in slopes {
        for (r, c) in horizontal_line(height, width, horizontal, k) {
            paint(r, c);
        }
        for (r, c) in vertical_line(height, width, vertical, k) {
            paint(r, c);
        }
    }
    img
}

/// Spread of the coordinate that should be constant along each mapped line.
pub fn max_axis_spread(points: &[[f64; 2]], axis: usize) -> f64 {
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p[axis]), hi.max(p[axis])));
    hi - lo
}
