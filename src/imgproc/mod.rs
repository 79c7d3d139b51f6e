//! Image primitives the rectification core builds on.
//!
//! - `color`: raster → grayscale `ImageF32` in `[0, 1]`.
//! - `gaussian`: separable Gaussian smoothing with clamped borders.
//! - `grad`: 3×3 Scharr gradient magnitude.
//! - `threshold`: Otsu threshold selection.
//! - `label`: 8-connected component labelling of non-zero cells.
//! - `warp`: bilinear projective resampling through a homography.
//!
//! Borders replicate the nearest sample everywhere a kernel leaves the image.

pub mod color;
pub mod gaussian;
pub mod grad;
pub mod label;
pub mod threshold;
pub mod warp;

pub use color::to_grayscale;
pub use gaussian::{apply_separable, gaussian_blur, GaussianFilter, SeparableFilter};
pub use grad::scharr_magnitude;
pub use label::{label_components, Labels};
pub use threshold::otsu_threshold;
pub use warp::{projection_from, warp_projective};

#[inline]
pub(crate) fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 || idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}
