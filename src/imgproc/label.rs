//! 8-connected component labelling.
//!
//! Labels are assigned in raster-scan order of each component's first cell,
//! starting at 1; background cells keep label 0.
use crate::image::WeightGrid;

#[derive(Clone, Debug)]
pub struct Labels {
    pub rows: usize,
    pub cols: usize,
    pub labels: Vec<u32>,
    pub count: usize,
}

impl Labels {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.labels[row * self.cols + col]
    }
}

/// Label the connected regions of non-zero cells of `grid`.
pub fn label_components(grid: &WeightGrid) -> Labels {
    let (rows, cols) = (grid.rows, grid.cols);
    let mut labels = vec![0u32; rows * cols];
    let mut count = 0u32;
    let mut stack: Vec<usize> = Vec::new();

    for start in 0..grid.data.len() {
        if grid.data[start] == 0 || labels[start] != 0 {
            continue;
        }
        count += 1;
        labels[start] = count;
        stack.push(start);
        while let Some(idx) = stack.pop() {
            let r = idx / cols;
            let c = idx % cols;
            for dr in -1isize..=1 {
                for dc in -1isize..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = r as isize + dr;
                    let nc = c as isize + dc;
                    if nr < 0 || nc < 0 || nr >= rows as isize || nc >= cols as isize {
                        continue;
                    }
                    let n = nr as usize * cols + nc as usize;
                    if grid.data[n] != 0 && labels[n] == 0 {
                        labels[n] = count;
                        stack.push(n);
                    }
                }
            }
        }
    }

    Labels {
        rows,
        cols,
        labels,
        count: count as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::label_components;
    use crate::image::WeightGrid;

    #[test]
    fn diagonal_neighbours_join() {
        // x . .
        // . x .
        // . . . x
        let mut g = WeightGrid::new(3, 4);
        g.set(0, 0, 1);
        g.set(1, 1, 1);
        g.set(2, 3, 1);
        let labels = label_components(&g);
        assert_eq!(labels.count, 2);
        assert_eq!(labels.get(0, 0), labels.get(1, 1));
        assert_ne!(labels.get(0, 0), labels.get(2, 3));
        assert_eq!(labels.get(0, 1), 0);
    }
}
