#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod params;
pub mod pipeline;
pub mod progress;
pub mod rectify;
pub mod vanishing;

// Building blocks, public for tools and tests.
pub mod config;
pub mod edges;
pub mod hough;
pub mod imgproc;
pub mod pyramid;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{RectifyError, Result};
pub use crate::params::RectifyParams;
pub use crate::pipeline::{PerspectiveFixer, Rectification};

pub use crate::diagnostics::RectificationReport;
pub use crate::rectify::{apply_homography_points, rectify_image};
pub use crate::vanishing::{detect_vanishing_points, VanishingPoint};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use perspective_fix::prelude::*;
///
/// # fn main() {
/// let img = RasterImage::gray_from_fn(640, 480, |x, y| ((x / 40 + y / 40) % 2 * 255) as u8);
/// let fixer = PerspectiveFixer::new(RectifyParams::default());
/// match fixer.process(&img, &mut NoProgress) {
///     Ok(out) => println!("scale={:.3}", out.report.rectification.scale),
///     Err(err) => println!("failed in {}: {err}", err.stage()),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::RasterImage;
    pub use crate::progress::{ConsoleProgress, NoProgress, ProgressSink};
    pub use crate::{PerspectiveFixer, RectifyError, RectifyParams, VanishingPoint};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::edges::{detect_edge_map, edge_map_from_gray, EdgeParams};
    pub use crate::hough::{
        accumulate, collapse_clusters, extract_peaks, ClusterMap, Family, HoughParams, HoughSpace,
        PeakExtraction, PeakOptions,
    };
    pub use crate::rectify::{
        fit_transform, inscribed_box, plan_rectification, rotation_homography, InscribedBox,
        RectificationPlan, RotationAngles,
    };
    pub use crate::vanishing::{estimate_vanishing_point, MetaBranch, VanishingDetection};
}
