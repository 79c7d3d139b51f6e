use super::TimingBreakdown;
use crate::rectify::{InscribedBox, RectificationPlan, RotationAngles};
use crate::vanishing::{VanishingDetection, VanishingPoint};
use nalgebra::Matrix3;
use serde::Serialize;

/// Everything a run derived, serialisable for `--report`-style dumps.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectificationReport {
    pub input: InputDescriptor,
    /// Per-family statistics, in working-resolution pixels.
    pub detection: VanishingDetection,
    /// Horizontal vanishing point in full-resolution pixels.
    pub horizontal_vp: VanishingPoint,
    /// Vertical vanishing point in full-resolution pixels.
    pub vertical_vp: VanishingPoint,
    pub rectification: RectificationStage,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub working_width: usize,
    pub working_height: usize,
    pub pyramid_levels: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectificationStage {
    pub focal_length: f64,
    pub angles: RotationAngles,
    pub homography: Matrix3<f64>,
    pub inscribed: InscribedBox,
    pub scale: f64,
    pub fit: Matrix3<f64>,
    pub composed: Matrix3<f64>,
}

impl RectificationStage {
    pub fn from_plan(plan: &RectificationPlan, focal_length: f64) -> Self {
        Self {
            focal_length,
            angles: plan.angles,
            homography: plan.homography,
            inscribed: plan.inscribed,
            scale: plan.scale,
            fit: plan.fit,
            composed: plan.composed,
        }
    }
}
