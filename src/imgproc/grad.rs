//! Scharr gradient magnitude.
//!
//! Convolves the 3×3 Scharr kernel pair with border clamping and keeps only
//! `sqrt(gx² + gy²)`; orientation is not needed by the Hough stages.
use crate::image::{ImageF32, ImageView, ImageViewMut};

type Kernel3 = [[f32; 3]; 3];

const SCHARR_KERNEL_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_KERNEL_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

/// Per-pixel Scharr gradient magnitude of a single-channel image.
pub fn scharr_magnitude(l: &ImageF32) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let mut mag = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return mag;
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out = mag.row_mut(y);
        for (x, px) in out.iter_mut().enumerate() {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, yy_row) in rows.iter().enumerate() {
                let kx_row = &SCHARR_KERNEL_X[ky];
                let ky_row = &SCHARR_KERNEL_Y[ky];
                sum_x += yy_row[x_idx[0]] * kx_row[0]
                    + yy_row[x_idx[1]] * kx_row[1]
                    + yy_row[x_idx[2]] * kx_row[2];
                sum_y += yy_row[x_idx[0]] * ky_row[0]
                    + yy_row[x_idx[1]] * ky_row[1]
                    + yy_row[x_idx[2]] * ky_row[2];
            }
            *px = (sum_x * sum_x + sum_y * sum_y).sqrt();
        }
    }
    mag
}
