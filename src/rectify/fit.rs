//! Fit of the rectified frame back onto the original canvas.
//!
//! The corners of the frame are pushed through the homography and the largest
//! axis-aligned box inside the resulting quadrilateral (as bounded by the
//! corner coordinates) is scaled up so that it covers the whole canvas.
use super::homography::apply_homography_points;
use crate::error::{RectifyError, Result};
use nalgebra::Matrix3;
use serde::Serialize;

/// Axis-aligned box in pixel coordinates (`x = col`, `y = row`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InscribedBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl InscribedBox {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Corners of a `width × height` frame as `[tl, tr, bl, br]`.
pub fn frame_corners(width: usize, height: usize) -> [[f64; 2]; 4] {
    let x1 = width.saturating_sub(1) as f64;
    let y1 = height.saturating_sub(1) as f64;
    [[0.0, 0.0], [x1, 0.0], [0.0, y1], [x1, y1]]
}

/// Box bounded by the transformed corners of a `width × height` frame.
pub fn inscribed_box(h: &Matrix3<f64>, width: usize, height: usize) -> Result<InscribedBox> {
    let corners = apply_homography_points(h, &frame_corners(width, height)).ok_or(
        RectifyError::DegenerateInscribedBox {
            width: f64::NAN,
            height: f64::NAN,
        },
    )?;
    let [tl, tr, bl, br] = [corners[0], corners[1], corners[2], corners[3]];
    let bbox = InscribedBox {
        left: tl[0].max(bl[0]),
        right: tr[0].min(br[0]),
        top: tl[1].max(tr[1]),
        bottom: bl[1].min(br[1]),
    };
    let (w, hgt) = (bbox.width(), bbox.height());
    if !(w.is_finite() && hgt.is_finite()) || w <= 0.0 || hgt <= 0.0 {
        return Err(RectifyError::DegenerateInscribedBox { width: w, height: hgt });
    }
    Ok(bbox)
}

/// `S(scale)·T(−left, −top)` with `scale = max(width / box width, height / box height)`.
pub fn fit_transform(bbox: &InscribedBox, width: usize, height: usize) -> (Matrix3<f64>, f64) {
    let scale = (width as f64 / bbox.width()).max(height as f64 / bbox.height());
    let fit = Matrix3::new(
        scale, 0.0, -scale * bbox.left, //
        0.0, scale, -scale * bbox.top, //
        0.0, 0.0, 1.0,
    );
    (fit, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_box_is_the_frame() {
        let bbox = inscribed_box(&Matrix3::identity(), 100, 50).unwrap();
        assert_eq!(
            bbox,
            InscribedBox {
                left: 0.0,
                top: 0.0,
                right: 99.0,
                bottom: 49.0
            }
        );
        let (fit, scale) = fit_transform(&bbox, 100, 50);
        assert!((scale - 100.0 / 99.0).abs() < 1e-12);
        assert!((fit[(0, 0)] - scale).abs() < 1e-12 && fit[(0, 2)] == 0.0);
    }

    #[test]
    fn box_takes_inner_corner_coordinates() {
        // Keystone: the bottom edge is stretched outwards.
        let h = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -0.002, 1.0);
        let bbox = inscribed_box(&h, 101, 101).unwrap();
        assert_eq!(bbox.left, 0.0);
        assert_eq!(bbox.top, 0.0);
        assert!((bbox.right - 100.0).abs() < 1e-9);
        assert!((bbox.bottom - 125.0).abs() < 1e-9);
    }

    #[test]
    fn fit_maps_box_onto_canvas() {
        let bbox = InscribedBox {
            left: 10.0,
            top: 5.0,
            right: 60.0,
            bottom: 30.0,
        };
        let (fit, scale) = fit_transform(&bbox, 100, 40);
        assert_eq!(scale, 2.0);
        let mapped = apply_homography_points(&fit, &[[10.0, 5.0], [60.0, 30.0]]).unwrap();
        assert_eq!(mapped[0], [0.0, 0.0]);
        assert_eq!(mapped[1], [100.0, 50.0]);
    }

    #[test]
    fn collapsed_box_is_degenerate() {
        let h = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let err = inscribed_box(&h, 10, 10).unwrap_err();
        assert!(matches!(err, RectifyError::DegenerateInscribedBox { .. }));
        let h = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0);
        assert!(inscribed_box(&h, 10, 10).is_err());
    }
}
