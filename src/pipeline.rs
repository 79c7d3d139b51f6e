//! End-to-end driver: edge map → vanishing points → rectified image.
//!
//! Typical usage:
//! ```no_run
//! use perspective_fix::image::io::{load_raster, save_raster};
//! use perspective_fix::progress::NoProgress;
//! use perspective_fix::{PerspectiveFixer, RectifyParams};
//! use std::path::Path;
//!
//! # fn main() -> perspective_fix::Result<()> {
//! let src = load_raster(Path::new("facade.jpg"))?;
//! let fixer = PerspectiveFixer::new(RectifyParams::default());
//! let out = fixer.process(&src, &mut NoProgress)?;
//! save_raster(&out.image, Path::new("facade_fixed.png"))?;
//! # Ok(())
//! # }
//! ```
use crate::diagnostics::{InputDescriptor, RectificationReport, RectificationStage, TimingBreakdown};
use crate::edges::edge_map_from_gray;
use crate::error::{RectifyError, Result};
use crate::image::{RasterImage, WeightGrid};
use crate::imgproc::to_grayscale;
use crate::params::RectifyParams;
use crate::progress::ProgressSink;
use crate::pyramid::{Pyramid, PyramidOptions};
use crate::rectify::rectify_image;
use crate::vanishing::detect_vanishing_points;
use log::debug;
use std::time::Instant;

/// Rectified image together with the trace of how it was obtained.
#[derive(Clone, Debug)]
pub struct Rectification {
    pub image: RasterImage,
    pub report: RectificationReport,
}

/// Removes the perspective of photographs of rectilinear structures.
#[derive(Clone, Debug, Default)]
pub struct PerspectiveFixer {
    params: RectifyParams,
}

impl PerspectiveFixer {
    pub fn new(params: RectifyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RectifyParams {
        &self.params
    }

    /// Detect both vanishing points of `src` and rectify it.
    ///
    /// Detection runs on a reduced grayscale copy whose larger side is at most
    /// `max_working_dimension`; the warp always uses the full-resolution input.
    pub fn process(&self, src: &RasterImage, progress: &mut dyn ProgressSink) -> Result<Rectification> {
        self.params.validate()?;
        if src.is_empty() {
            return Err(RectifyError::EmptyImage);
        }
        let total = Instant::now();
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let pyramid = Pyramid::build(
            to_grayscale(src),
            PyramidOptions::new(self.params.max_working_dimension),
        );
        let levels = pyramid.levels();
        let working = pyramid.into_working();
        timings.push_since("pyramid", start);

        let start = Instant::now();
        let edges = edge_map_from_gray(&working, &self.params.edges);
        timings.push_since("edges", start);

        self.rectify_with(src, &edges, levels, timings, total, progress)
    }

    /// Rectify `src` using a caller-supplied edge map.
    ///
    /// `edges` may have a different resolution than `src`; the vanishing points
    /// are rescaled by the size ratio of the two.
    pub fn process_with_edges(
        &self,
        src: &RasterImage,
        edges: &WeightGrid,
        progress: &mut dyn ProgressSink,
    ) -> Result<Rectification> {
        self.params.validate()?;
        if src.is_empty() || edges.is_empty() {
            return Err(RectifyError::EmptyImage);
        }
        self.rectify_with(src, edges, 1, TimingBreakdown::default(), Instant::now(), progress)
    }

    fn rectify_with(
        &self,
        src: &RasterImage,
        edges: &WeightGrid,
        pyramid_levels: usize,
        mut timings: TimingBreakdown,
        total: Instant,
        progress: &mut dyn ProgressSink,
    ) -> Result<Rectification> {
        let start = Instant::now();
        let detection = detect_vanishing_points(edges, &self.params.hough, progress)?;
        timings.push_since("vanishing points", start);

        let row_scale = src.height as f64 / edges.rows as f64;
        let col_scale = src.width as f64 / edges.cols as f64;
        let horizontal_vp = detection.horizontal.point.scaled(row_scale, col_scale);
        let vertical_vp = detection.vertical.point.scaled(row_scale, col_scale);
        debug!(
            "vanishing points at {}x{}: horizontal=({:.1}, {:.1}) vertical=({:.1}, {:.1})",
            src.width, src.height, horizontal_vp.row, horizontal_vp.col, vertical_vp.row, vertical_vp.col
        );

        let start = Instant::now();
        let rectified = rectify_image(
            src,
            horizontal_vp,
            vertical_vp,
            self.params.focal_length,
            progress,
        )?;
        timings.push_since("rectification", start);
        timings.total_ms = crate::diagnostics::elapsed_ms(total);

        let report = RectificationReport {
            input: InputDescriptor {
                width: src.width,
                height: src.height,
                channels: src.channels,
                working_width: edges.cols,
                working_height: edges.rows,
                pyramid_levels,
            },
            detection,
            horizontal_vp,
            vertical_vp,
            rectification: RectificationStage::from_plan(&rectified.plan, self.params.focal_length),
            timings,
        };
        Ok(Rectification {
            image: rectified.image,
            report,
        })
    }
}
