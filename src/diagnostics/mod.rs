//! Serialisable trace of a rectification run.
//!
//! `RectificationReport` is returned alongside the corrected image and bundles
//! the input geometry, the per-family Hough statistics, the vanishing points,
//! every derived transform and a `TimingBreakdown` of the stages.

pub mod report;
pub mod timing;

pub use report::{InputDescriptor, RectificationReport, RectificationStage};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
