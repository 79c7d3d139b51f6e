//! Grayscale reduction pyramid used to pick the detection resolution.
//!
//! Level 0 is the full-resolution grayscale image. Each further level blurs
//! the previous one with a separable filter ([`Binomial5`] by default) and
//! keeps every other pixel. Border samples clamp to the image extents.
//!
//! Hough accumulators grow with the square of the image side, so detection runs
//! on the first level whose larger side fits `max_dimension`. Only that level is
//! kept; each finer level is released once the next one exists.

use crate::image::{ImageF32, ImageView, ImageViewMut};
use crate::imgproc::{apply_separable, SeparableFilter};
use log::debug;

const BINOMIAL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Binomial approximation of a Gaussian, `[1, 4, 6, 4, 1] / 16`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Binomial5;

impl SeparableFilter for Binomial5 {
    #[inline]
    fn taps(&self) -> &[f32] {
        &BINOMIAL_5
    }
}

/// Coarsest level of a reduction and the number of levels that led to it.
#[derive(Clone, Debug)]
pub struct Pyramid {
    working: ImageF32,
    levels: usize,
}

/// Options controlling pyramid construction.
#[derive(Clone, Copy)]
pub struct PyramidOptions<'a> {
    /// Stop once `max(w, h)` of the last level is at most this (>= 1).
    pub max_dimension: usize,
    /// Filter applied before every decimation.
    pub filter: &'a dyn SeparableFilter,
}

impl<'a> PyramidOptions<'a> {
    pub fn new(max_dimension: usize) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
            filter: &Binomial5,
        }
    }

    pub fn with_filter(mut self, filter: &'a dyn SeparableFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl std::fmt::Debug for PyramidOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyramidOptions")
            .field("max_dimension", &self.max_dimension)
            .field("filter_taps", &self.filter.taps().len())
            .finish()
    }
}

impl Pyramid {
    /// Reduce `gray` until its larger side fits `options.max_dimension`.
    pub fn build(gray: ImageF32, options: PyramidOptions<'_>) -> Self {
        let (full_w, full_h) = (gray.w, gray.h);
        let mut working = gray;
        let mut levels = 1;
        while working.w.max(working.h) > options.max_dimension && (working.w > 1 || working.h > 1) {
            working = downsample(&apply_separable(options.filter, &working));
            levels += 1;
        }
        debug!(
            "pyramid: {} levels, {}x{} -> {}x{}",
            levels, full_w, full_h, working.w, working.h
        );
        Self { working, levels }
    }

    /// Number of levels including the full-resolution one.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Coarsest level, i.e. the detection resolution.
    pub fn working(&self) -> &ImageF32 {
        &self.working
    }

    pub fn into_working(self) -> ImageF32 {
        self.working
    }
}

/// Keep every other pixel of `src` (rounding the size up).
fn downsample(src: &ImageF32) -> ImageF32 {
    let (nw, nh) = (src.w.div_ceil(2), src.h.div_ceil(2));
    let mut down = ImageF32::new(nw, nh);
    for y in 0..nh {
        let sy = (y * 2).min(src.h - 1);
        let src_row = src.row(sy);
        let dst_row = down.row_mut(y);
        for (x, dst_px) in dst_row.iter_mut().enumerate() {
            *dst_px = src_row[(x * 2).min(src.w - 1)];
        }
    }
    down
}
