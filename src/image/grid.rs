//! Dense grid of non-negative integer weights.
//!
//! One type serves as edge map, Hough space, peak map and cluster map. Cells
//! are addressed as `(row, col)`; `rows` is the image height (or the number of
//! slope samples for a Hough space).
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightGrid {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<u64>,
}

impl WeightGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> u64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: u64) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, v: u64) {
        let i = self.idx(row, col);
        self.data[i] += v;
    }

    pub fn sum(&self) -> u64 {
        self.data.iter().sum()
    }

    pub fn max(&self) -> u64 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Position and value of the first maximum in row-major order.
    pub fn argmax(&self) -> Option<(usize, usize, u64)> {
        let mut best: Option<(usize, u64)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            match best {
                Some((_, bv)) if v <= bv => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, v)| (i / self.cols, i % self.cols, v))
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn zero_fraction(&self) -> f64 {
        if self.data.is_empty() {
            return 1.0;
        }
        (self.len() - self.count_nonzero()) as f64 / self.len() as f64
    }

    /// Population mean and standard deviation of all cells.
    pub fn mean_std(&self) -> (f64, f64) {
        if self.data.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.data.len() as f64;
        let mean = self.data.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = self
            .data
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        (mean, var.sqrt())
    }

    /// Iterate over `(row, col, weight)` for every non-zero cell.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }
}

impl ImageView for WeightGrid {
    type Pixel = u64;

    #[inline]
    fn width(&self) -> usize {
        self.cols
    }
    #[inline]
    fn height(&self) -> usize {
        self.rows
    }
    #[inline]
    fn row(&self, y: usize) -> &[u64] {
        let start = y * self.cols;
        &self.data[start..start + self.cols]
    }
}

impl ImageViewMut for WeightGrid {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u64] {
        let start = y * self.cols;
        &mut self.data[start..start + self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::WeightGrid;

    #[test]
    fn argmax_prefers_first_maximum() {
        let g = WeightGrid::from_fn(2, 3, |r, c| if c == 1 { 5 } else { r as u64 });
        assert_eq!(g.argmax(), Some((0, 1, 5)));
    }

    #[test]
    fn mean_std_is_population_statistic() {
        let g = WeightGrid::from_fn(1, 4, |_, c| [2, 4, 4, 6][c]);
        let (mean, std) = g.mean_std();
        assert!((mean - 4.0).abs() < 1e-12);
        assert!((std - 2f64.sqrt()).abs() < 1e-12);
    }
}
