//! Perspective removal from two vanishing points.
//!
//! - `homography`: rotation homography `H` that makes both line families
//!   axis-aligned.
//! - `fit`: inscribed box of the transformed frame and the scale-and-shift that
//!   fills the canvas with it.
//!
//! [`plan_rectification`] computes the composed transform `fit · H` without
//! touching pixels; [`rectify_image`] additionally resamples the source
//! through it. Output keeps the input's dimensions and channels.

pub mod fit;
pub mod homography;

pub use fit::{fit_transform, frame_corners, inscribed_box, InscribedBox};
pub use homography::{apply_homography_points, rotation_homography, RotationAngles};

use crate::error::{RectifyError, Result};
use crate::image::RasterImage;
use crate::imgproc::warp_projective;
use crate::progress::{NoProgress, ProgressSink};
use crate::vanishing::VanishingPoint;
use log::{debug, warn};
use nalgebra::Matrix3;

/// Every transform derived for one frame size and pair of vanishing points.
#[derive(Clone, Debug)]
pub struct RectificationPlan {
    pub angles: RotationAngles,
    /// Rotation homography `H`.
    pub homography: Matrix3<f64>,
    pub inscribed: InscribedBox,
    pub scale: f64,
    /// Scale-and-shift applied after `H`.
    pub fit: Matrix3<f64>,
    /// `fit · H`, source pixel → output pixel.
    pub composed: Matrix3<f64>,
    /// Inverse of `composed`, output pixel → source pixel.
    pub inverse: Matrix3<f64>,
}

/// Rectified raster and the transforms that produced it.
#[derive(Clone, Debug)]
pub struct Rectified {
    pub image: RasterImage,
    pub plan: RectificationPlan,
}

/// Derive the rectifying transform of a `width × height` frame.
pub fn plan_rectification(
    width: usize,
    height: usize,
    horizontal: VanishingPoint,
    vertical: VanishingPoint,
    focal_length: f64,
) -> Result<RectificationPlan> {
    build_plan(width, height, horizontal, vertical, focal_length, &mut NoProgress)
}

fn build_plan(
    width: usize,
    height: usize,
    horizontal: VanishingPoint,
    vertical: VanishingPoint,
    focal_length: f64,
    progress: &mut dyn ProgressSink,
) -> Result<RectificationPlan> {
    if width == 0 || height == 0 {
        return Err(RectifyError::EmptyImage);
    }
    let (homography, angles) = rotation_homography(horizontal, vertical, focal_length)?;
    progress.advance(7);
    let inscribed = inscribed_box(&homography, width, height)?;
    let (fit, scale) = fit_transform(&inscribed, width, height);
    let composed = fit * homography;
    let inverse = composed
        .try_inverse()
        .ok_or(RectifyError::DegenerateInscribedBox {
            width: inscribed.width(),
            height: inscribed.height(),
        })?;
    debug!(
        "rectify {}x{}: phi_x={:.6} phi_y={:.6} box=({:.2},{:.2})-({:.2},{:.2}) scale={:.4}",
        width,
        height,
        angles.phi_x,
        angles.phi_y,
        inscribed.left,
        inscribed.top,
        inscribed.right,
        inscribed.bottom,
        scale
    );
    Ok(RectificationPlan {
        angles,
        homography,
        inscribed,
        scale,
        fit,
        composed,
        inverse,
    })
}

/// Remove the perspective implied by `horizontal` and `vertical` from `src`.
pub fn rectify_image(
    src: &RasterImage,
    horizontal: VanishingPoint,
    vertical: VanishingPoint,
    focal_length: f64,
    progress: &mut dyn ProgressSink,
) -> Result<Rectified> {
    progress.start("Removing perspective");
    let plan = build_plan(src.width, src.height, horizontal, vertical, focal_length, progress)
        .inspect_err(|err| warn!("perspective removal failed: {err}"))?;
    progress.advance(7);
    let image = warp_projective(src, &plan.composed)?;
    progress.advance(6);
    Ok(Rectified { image, plan })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_vanishing_points_keep_the_frame() {
        let plan = plan_rectification(
            100,
            100,
            VanishingPoint::new(50.0, 1e9),
            VanishingPoint::new(-1e9, 50.0),
            1.0,
        )
        .unwrap();
        let expected = Matrix3::new(100.0 / 99.0, 0.0, 0.0, 0.0, 100.0 / 99.0, 0.0, 0.0, 0.0, 1.0);
        assert!((plan.composed - expected).abs().max() < 1e-4);
        assert!((plan.composed - Matrix3::identity()).abs().max() < 0.02);
    }

    #[test]
    fn converging_plan_has_positive_box() {
        let plan = plan_rectification(
            100,
            100,
            VanishingPoint::new(50.0, 1000.0),
            VanishingPoint::new(-1000.0, 50.0),
            1.0,
        )
        .unwrap();
        assert!((plan.inscribed.left - 4.517).abs() < 0.01);
        assert!((plan.inscribed.top - 0.250).abs() < 0.01);
        assert!((plan.inscribed.right - 99.243).abs() < 0.01);
        assert!((plan.inscribed.bottom - 94.573).abs() < 0.01);
        assert!(plan.scale > 1.0 && plan.scale < 1.1);
        let back = plan.composed * plan.inverse;
        assert!((back - Matrix3::identity()).abs().max() < 1e-9);
    }

    #[test]
    fn output_keeps_dimensions_and_channels() {
        let mut src = RasterImage::new(40, 30, 3);
        src.data.iter_mut().for_each(|v| *v = 200);
        let out = rectify_image(
            &src,
            VanishingPoint::new(15.0, 500.0),
            VanishingPoint::new(-400.0, 20.0),
            1.0,
            &mut NoProgress,
        )
        .unwrap();
        assert_eq!((out.image.width, out.image.height, out.image.channels), (40, 30, 3));
        assert_eq!(out.image.pixel(20, 15), &[200, 200, 200]);
    }

    #[derive(Default)]
    struct Recorder {
        steps: Vec<u32>,
    }

    impl ProgressSink for Recorder {
        fn start(&mut self, _label: &str) {}
        fn advance(&mut self, percent: u32) {
            self.steps.push(percent);
        }
    }

    #[test]
    fn progress_follows_homography_fit_and_warp() {
        let horizontal = VanishingPoint::new(15.0, 500.0);
        let vertical = VanishingPoint::new(-400.0, 20.0);
        let mut done = Recorder::default();
        rectify_image(&RasterImage::new(40, 30, 1), horizontal, vertical, 1.0, &mut done).unwrap();
        assert_eq!(done.steps, vec![7, 7, 6]);

        // a raster the warp cannot handle fails after the fit has been reported
        let mut failed = Recorder::default();
        let err = rectify_image(&RasterImage::new(40, 30, 5), horizontal, vertical, 1.0, &mut failed)
            .unwrap_err();
        assert!(matches!(err, RectifyError::InvalidParameter { name: "channels", .. }));
        assert_eq!(failed.steps, vec![7, 7]);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let err = plan_rectification(0, 10, VanishingPoint::new(0.0, 1e6), VanishingPoint::new(-1e6, 0.0), 1.0)
            .unwrap_err();
        assert!(matches!(err, RectifyError::EmptyImage));
    }
}
