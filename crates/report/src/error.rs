//! Error types for the reporting pipeline

use thiserror::Error;

/// Errors surfaced by report generation.
///
/// Capture-path failures (screenshots, log attachment) never show up here:
/// they are logged and swallowed inside [`crate::FailureCapture`] so the
/// triggering test failure stays the only visible one. What remains is the
/// session-end report generation, where a write failure is allowed to
/// surface because every outcome is already determined by then.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
