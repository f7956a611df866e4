//! The narrow UI-context capability the pipeline consumes
//!
//! The browser driver itself lives outside this crate. The pipeline only
//! ever asks a live page two things: where it is, and for a screenshot.

use std::path::Path;

/// Handle to a live browser page.
///
/// Supplied as `Option<&dyn UiContext>` throughout the pipeline; absence
/// means the test ran without a navigable context (e.g. a pure API check)
/// and screenshot capture is skipped.
pub trait UiContext {
    /// Current URL of the page.
    fn current_url(&self) -> String;

    /// Persist a screenshot of the page to `path`.
    ///
    /// `full_page` requests the whole scrollable page rather than the
    /// viewport. Fails with an IO error on write failure.
    fn screenshot(&self, path: &Path, full_page: bool) -> std::io::Result<()>;
}
