//! Binary edge map construction.
//!
//! grayscale → Gaussian smoothing → Scharr magnitude → Otsu threshold. Pixels
//! whose magnitude lies strictly above the threshold get weight 1, all others 0.
use crate::image::{ImageF32, RasterImage, WeightGrid};
use crate::imgproc::{gaussian_blur, otsu_threshold, scharr_magnitude, to_grayscale};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Standard deviation of the pre-smoothing Gaussian (pixels).
    pub gaussian_sigma: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self { gaussian_sigma: 1.0 }
    }
}

/// Build the binary edge-weight map of `raster`.
pub fn detect_edge_map(raster: &RasterImage, params: &EdgeParams) -> WeightGrid {
    edge_map_from_gray(&to_grayscale(raster), params)
}

/// Build the binary edge-weight map of a grayscale image in `[0, 1]`.
pub fn edge_map_from_gray(gray: &ImageF32, params: &EdgeParams) -> WeightGrid {
    let smoothed = gaussian_blur(gray, params.gaussian_sigma);
    let mag = scharr_magnitude(&smoothed);
    binarize_magnitude(&mag)
}

/// Threshold a magnitude image with Otsu's method.
pub fn binarize_magnitude(mag: &ImageF32) -> WeightGrid {
    let mut edges = WeightGrid::new(mag.h, mag.w);
    let Some(threshold) = otsu_threshold(mag) else {
        return edges;
    };
    for (dst, &m) in edges.data.iter_mut().zip(&mag.data) {
        if m > threshold {
            *dst = 1;
        }
    }
    debug!(
        "edge map {}x{}: threshold={:.4} edge_pixels={}",
        mag.w,
        mag.h,
        threshold,
        edges.count_nonzero()
    );
    edges
}
