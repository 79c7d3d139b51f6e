//! Parameters of the rectification pipeline.
//!
//! Every struct deserialises with `#[serde(default)]`, so a configuration only
//! needs to name the knobs it changes.
use crate::edges::EdgeParams;
use crate::error::{RectifyError, Result};
use crate::hough::HoughParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RectifyParams {
    /// Distance of the virtual image plane used by the rotation homography.
    pub focal_length: f64,
    /// Detection runs on the first pyramid level whose larger side is at most this.
    pub max_working_dimension: usize,
    pub edges: EdgeParams,
    pub hough: HoughParams,
}

impl Default for RectifyParams {
    fn default() -> Self {
        Self {
            focal_length: 1.0,
            max_working_dimension: 512,
            edges: EdgeParams::default(),
            hough: HoughParams::default(),
        }
    }
}

impl RectifyParams {
    /// Reject values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if !self.focal_length.is_finite() || self.focal_length <= 0.0 {
            return Err(RectifyError::InvalidParameter {
                name: "focal_length",
                reason: format!("must be positive and finite, got {}", self.focal_length),
            });
        }
        if self.max_working_dimension == 0 {
            return Err(RectifyError::InvalidParameter {
                name: "max_working_dimension",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
