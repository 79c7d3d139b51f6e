//! Projective resampling of a raster through a homography.
//!
//! Output pixel `(x, y)` takes the bilinear sample of the source at
//! `H⁻¹ · (x, y, 1)`. Samples falling outside the source frame are zero. The
//! output keeps the source's dimensions and channel layout.
use crate::error::{RectifyError, Result};
use crate::image::RasterImage;
use image::{ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use nalgebra::Matrix3;

/// Row-major `f32` projection of the source → output homography `forward`.
pub fn projection_from(forward: &Matrix3<f64>) -> Result<Projection> {
    let mut entries = [0f32; 9];
    for (i, e) in entries.iter_mut().enumerate() {
        *e = forward[(i / 3, i % 3)] as f32;
    }
    if entries.iter().any(|e| !e.is_finite()) {
        return Err(RectifyError::InvalidParameter {
            name: "homography",
            reason: "non-finite entry".into(),
        });
    }
    Projection::from_matrix(entries).ok_or_else(|| RectifyError::InvalidParameter {
        name: "homography",
        reason: "matrix is not invertible".into(),
    })
}

/// Resample `src` through the source → output homography `forward`.
pub fn warp_projective(src: &RasterImage, forward: &Matrix3<f64>) -> Result<RasterImage> {
    if src.is_empty() {
        return Ok(RasterImage::new(src.width, src.height, src.channels));
    }
    let projection = projection_from(forward)?;
    let data = match src.channels {
        1 => warp_layout(src, &projection, Luma([0u8]))?,
        2 => warp_layout(src, &projection, LumaA([0u8; 2]))?,
        3 => warp_layout(src, &projection, Rgb([0u8; 3]))?,
        4 => warp_layout(src, &projection, Rgba([0u8; 4]))?,
        n => {
            return Err(RectifyError::InvalidParameter {
                name: "channels",
                reason: format!("cannot resample a {n}-channel raster"),
            })
        }
    };
    RasterImage::from_raw(src.width, src.height, src.channels, data)
}

fn warp_layout<P>(src: &RasterImage, projection: &Projection, background: P) -> Result<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + Send + Sync + 'static,
{
    let (width, height) = (src.width as u32, src.height as u32);
    let input = ImageBuffer::<P, Vec<u8>>::from_raw(width, height, src.data.clone()).ok_or_else(|| {
        RectifyError::InvalidParameter {
            name: "raster",
            reason: format!("{}x{}x{} buffer is inconsistent", src.width, src.height, src.channels),
        }
    })?;
    let mut output = ImageBuffer::<P, Vec<u8>>::new(width, height);
    warp_into(&input, projection, Interpolation::Bilinear, background, &mut output);
    Ok(output.into_raw())
}
