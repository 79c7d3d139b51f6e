use crate::image::{ImageF32, ImageViewMut, RasterImage};

/// ITU-R BT.709 luma weights.
const LUMA_WEIGHTS: [f32; 3] = [0.2125, 0.7154, 0.0721];

/// Convert a raster to a grayscale float image in `[0, 1]`.
///
/// Single-channel rasters are rescaled as is; colour rasters use the first
/// three channels and ignore alpha.
pub fn to_grayscale(raster: &RasterImage) -> ImageF32 {
    let mut out = ImageF32::new(raster.width, raster.height);
    let ch = raster.channels;
    for y in 0..raster.height {
        let src = raster.row(y);
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let s = &src[x * ch..(x + 1) * ch];
            let v = if ch >= 3 {
                LUMA_WEIGHTS[0] * s[0] as f32
                    + LUMA_WEIGHTS[1] * s[1] as f32
                    + LUMA_WEIGHTS[2] * s[2] as f32
            } else {
                s[0] as f32
            };
            *px = v / 255.0;
        }
    }
    out
}
