//! Failure capture: screenshot, log cross-reference, failure location
//!
//! Everything here is best-effort. A capture failure is logged and
//! swallowed so it can never mask the original test failure.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::artifacts::ArtifactStore;
use crate::logging;
use crate::page::UiContext;
use crate::traceback::{Frame, FrameFilter, Traceback};

/// Diagnostics produced for one failed test. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureArtifact {
    /// Screenshot on disk, when a UI context existed and the write
    /// succeeded.
    pub screenshot: Option<PathBuf>,
    /// The run's text log file, for cross-reference.
    pub log_file: PathBuf,
    /// Resolved failure location: the innermost application-code frame,
    /// or the innermost frame of any kind when none qualifies.
    pub location: Option<Frame>,
    /// Renderable fragment embedding the screenshot, path relative to the
    /// report root. Absent when no screenshot was persisted.
    pub html: Option<String>,
}

/// Captures failure diagnostics on behalf of the outcome recorder.
pub struct FailureCapture {
    store: ArtifactStore,
    filter: FrameFilter,
    log_file: PathBuf,
}

impl FailureCapture {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            filter: FrameFilter::default(),
            log_file: PathBuf::from(logging::DEFAULT_LOG_PATH),
        }
    }

    /// Replace the framework-frame policy.
    pub fn with_filter(mut self, filter: FrameFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Point the artifact at a different run log.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Capture diagnostics for a failed test.
    ///
    /// Logs the resolved failure location, takes a full-page screenshot
    /// when `page` is supplied, and returns the artifact. Never fails:
    /// any error along the way degrades to a log line.
    pub fn capture(
        &self,
        test_id: &str,
        test_name: &str,
        class_name: &str,
        page: Option<&dyn UiContext>,
        traceback: &Traceback,
    ) -> FailureArtifact {
        let location = traceback.resolve_failure_frame(&self.filter).cloned();

        match &location {
            Some(frame) => error!(
                "Assertion failed in test '{}' (class: '{}') at {}:{}. Line: {}",
                test_name, class_name, frame.file, frame.line, frame.source
            ),
            None => error!(
                "Assertion failed in test '{}' (class: '{}')",
                test_name, class_name
            ),
        }

        let screenshot = page.and_then(|page| self.take_screenshot(test_id, page));
        let html = screenshot.as_deref().map(|path| {
            let rel = self.store.relative_to_root(path);
            format!(
                r#"<div style="margin:10px 0;"><img src="{}" alt="screenshot" style="max-width:600px;border:2px solid red;"></div>"#,
                rel.display()
            )
        });

        FailureArtifact {
            screenshot,
            log_file: self.log_file.clone(),
            location,
            html,
        }
    }

    fn take_screenshot(&self, test_id: &str, page: &dyn UiContext) -> Option<PathBuf> {
        if let Err(e) = self.store.ensure_layout() {
            warn!("Failed to create screenshots directory: {}", e);
            return None;
        }
        let path = self.store.screenshot_path(test_id);
        match page.screenshot(&path, true) {
            Ok(()) => {
                debug!("Captured failure screenshot: {}", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Failed to capture screenshot for '{}': {}", test_id, e);
                None
            }
        }
    }
}
