//! The page interface scenarios are executed against
//!
//! Element location strategy and browser plumbing belong to the driver;
//! the harness only speaks in these verbs.

use thiserror::Error;

pub use webtest_report::UiContext;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("timed out waiting for {0}")]
    Timeout(String),

    #[error("element not found: {0}")]
    NotFound(String),

    #[error("driver error: {0}")]
    Driver(String),
}

pub type PageResult<T> = Result<T, PageError>;

/// A live browser page the runner can drive.
///
/// Extends [`UiContext`] (URL + screenshot, which the reporting pipeline
/// consumes) with the interaction verbs scenario steps need.
pub trait Page: UiContext {
    /// Navigate to an absolute URL.
    fn goto(&mut self, url: &str) -> PageResult<()>;

    /// Click the element matching `selector`.
    fn click(&mut self, selector: &str) -> PageResult<()>;

    /// Clear and fill the input matching `selector`.
    fn fill(&mut self, selector: &str, value: &str) -> PageResult<()>;

    /// Wait until `selector` is present, up to `timeout_ms`.
    fn wait_for(&mut self, selector: &str, timeout_ms: u64) -> PageResult<()>;

    /// Text content of the element matching `selector`.
    fn text_of(&mut self, selector: &str) -> PageResult<String>;
}
