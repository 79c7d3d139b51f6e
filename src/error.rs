//! Error type shared by every pipeline stage.
//!
//! All failures are local to a single run. The pipeline is deterministic, so a
//! caller that receives an error should report it rather than retry.
use std::path::PathBuf;
use thiserror::Error;

/// Tagged failure returned by the rectification pipeline.
#[derive(Debug, Error)]
pub enum RectifyError {
    /// Source image could not be read or decoded.
    #[error("input image {path} unavailable: {reason}")]
    InputUnavailable { path: PathBuf, reason: String },
    /// Result could not be encoded or written.
    #[error("failed to write {path}: {reason}")]
    OutputFailed { path: PathBuf, reason: String },
    /// Input has zero width or height.
    #[error("input image is empty")]
    EmptyImage,
    /// Requested accumulator would exceed the configured cell budget.
    #[error("hough accumulator of {cells} cells exceeds the limit of {limit}")]
    AccumulatorTooLarge { cells: usize, limit: usize },
    /// Line parameters could not be recovered (flat accumulator, zero slope, ...).
    #[error("degenerate line geometry in {stage}: {reason}")]
    DegenerateLineGeometry { stage: &'static str, reason: String },
    /// A tuning parameter is outside its valid range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// The inscribed box of the transformed frame has no area.
    #[error("degenerate inscribed box ({width:.3} x {height:.3})")]
    DegenerateInscribedBox { width: f64, height: f64 },
}

impl RectifyError {
    pub(crate) fn degenerate_lines(stage: &'static str, reason: impl Into<String>) -> Self {
        RectifyError::DegenerateLineGeometry {
            stage,
            reason: reason.into(),
        }
    }

    /// Short name of the pipeline stage the error originates from.
    pub fn stage(&self) -> &'static str {
        match self {
            RectifyError::InputUnavailable { .. } => "image loading",
            RectifyError::OutputFailed { .. } => "image saving",
            RectifyError::EmptyImage => "input validation",
            RectifyError::AccumulatorTooLarge { .. } => "hough accumulation",
            RectifyError::DegenerateLineGeometry { stage, .. } => stage,
            RectifyError::InvalidParameter { .. } => "configuration",
            RectifyError::DegenerateInscribedBox { .. } => "perspective removal",
        }
    }
}

pub type Result<T> = std::result::Result<T, RectifyError>;
