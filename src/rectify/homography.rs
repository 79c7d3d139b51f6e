//! Rotation-derived homography that straightens both line families.
//!
//! Pixels are lifted onto the plane `z = f`, rotated about the x axis by `φx`
//! (levelling the vertical family) and about the y axis by `φy` (levelling the
//! horizontal family), then projected back with a divide by `z / f`. The
//! rotation pivots on an anchor built from both vanishing points.
use crate::error::{RectifyError, Result};
use crate::vanishing::VanishingPoint;
use nalgebra::{Matrix3, Matrix3x4, Matrix4x3, Rotation3, Vector2, Vector3};
use serde::Serialize;

const EPS_W: f64 = 1e-12;

/// Angles and pivot of the rectifying rotation.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationAngles {
    /// Rotation about the x axis (radians).
    pub phi_x: f64,
    /// Rotation about the y axis (radians).
    pub phi_y: f64,
    /// Horizontal shift of the horizontal vanishing direction under `R_y(−φx)`.
    pub coupling: f64,
    /// Pivot `(x, y)` in pixel coordinates.
    pub anchor: [f64; 2],
}

/// Build `H = T(t)·P(f)·R_y(φy)·R_x(φx)·L(f)·T(−t)` acting on `(x = col, y = row, 1)`.
///
/// `φx` is the plain arcsine of the vertical tilt when the vertical vanishing
/// point lies above the horizontal one, and is negated when it lies below, so
/// frames photographed from above are straightened as well.
pub fn rotation_homography(
    horizontal: VanishingPoint,
    vertical: VanishingPoint,
    focal_length: f64,
) -> Result<(Matrix3<f64>, RotationAngles)> {
    if !focal_length.is_finite() || focal_length <= 0.0 {
        return Err(RectifyError::InvalidParameter {
            name: "focal_length",
            reason: format!("must be positive and finite, got {focal_length}"),
        });
    }
    if !horizontal.is_finite() || !vertical.is_finite() {
        return Err(RectifyError::degenerate_lines(
            "perspective removal",
            "vanishing points must be finite",
        ));
    }
    let f = focal_length;

    let dv = Vector3::new(vertical.row - horizontal.row, 0.0, f).normalize();
    let mut phi_x = dv.z.asin();
    if vertical.row > horizontal.row {
        phi_x = -phi_x;
    }

    let dh = Vector3::new(0.0, horizontal.col - vertical.col, f);
    let coupling = (Rotation3::from_axis_angle(&Vector3::y_axis(), -phi_x) * dh).x;
    let anchor = Vector2::new(vertical.col, horizontal.row + coupling);

    let mut phi_y = dh.normalize().z.asin();
    if horizontal.col <= vertical.col {
        phi_y = -phi_y;
    }

    let lift = Matrix4x3::new(
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, f, //
        0.0, 0.0, 1.0,
    );
    let project = Matrix3x4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0 / f, 0.0,
    );
    let rot_x = Rotation3::from_axis_angle(&Vector3::x_axis(), phi_x).to_homogeneous();
    let rot_y = Rotation3::from_axis_angle(&Vector3::y_axis(), phi_y).to_homogeneous();

    let h = Matrix3::new_translation(&anchor)
        * project
        * rot_y
        * rot_x
        * lift
        * Matrix3::new_translation(&-anchor);

    let angles = RotationAngles {
        phi_x,
        phi_y,
        coupling,
        anchor: [anchor.x, anchor.y],
    };
    Ok((h, angles))
}

/// Map `(x, y)` points through `h`; `None` if any lands at infinity.
pub fn apply_homography_points(h: &Matrix3<f64>, pts: &[[f64; 2]]) -> Option<Vec<[f64; 2]>> {
    let mut out = Vec::with_capacity(pts.len());
    for &p in pts {
        let v = h * Vector3::new(p[0], p[1], 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= EPS_W || !v[0].is_finite() || !v[1].is_finite() {
            return None;
        }
        out.push([v[0] / w, v[1] / w]);
    }
    Some(out)
}
