//! Traceback model and failure-frame resolution

use serde::{Deserialize, Serialize};

/// One stack frame of a failing test, as handed over by the execution
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Source file path.
    pub file: String,
    /// Line number within `file`.
    pub line: u32,
    /// Source line text at that location.
    pub source: String,
}

/// Ordered stack frames, outermost first (innermost/most recent last).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Traceback {
    frames: Vec<Frame>,
}

impl Traceback {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame to blame for a failure: scanning innermost-first, the
    /// first frame not classified as framework/library code. When every
    /// frame is library code, falls back to the innermost frame.
    pub fn resolve_failure_frame(&self, filter: &FrameFilter) -> Option<&Frame> {
        self.frames
            .iter()
            .rev()
            .find(|f| !filter.is_framework(&f.file))
            .or_else(|| self.frames.last())
    }
}

/// Policy for which file paths count as framework/library code.
///
/// Injected rather than hard-coded so the policy stays explicit and
/// testable; a path matches when it contains any of the markers.
#[derive(Debug, Clone)]
pub struct FrameFilter {
    markers: Vec<String>,
}

impl FrameFilter {
    pub fn new(markers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Add one more marker to the policy.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn is_framework(&self, path: &str) -> bool {
        self.markers.iter().any(|m| path.contains(m.as_str()))
    }
}

impl Default for FrameFilter {
    fn default() -> Self {
        Self::new([".cargo/", "rustc/"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(file: &str, line: u32) -> Frame {
        Frame {
            file: file.to_string(),
            line,
            source: format!("line {line}"),
        }
    }

    #[test]
    fn picks_innermost_non_library_frame() {
        let tb = Traceback::new(vec![
            frame("specs/admin.yaml", 3),
            frame("/home/u/.cargo/registry/assert/lib.rs", 40),
        ]);
        let resolved = tb.resolve_failure_frame(&FrameFilter::default()).unwrap();
        assert_eq!(resolved.file, "specs/admin.yaml");
        assert_eq!(resolved.line, 3);
    }

    #[test]
    fn falls_back_to_innermost_when_all_frames_are_library() {
        let tb = Traceback::new(vec![
            frame("/home/u/.cargo/registry/outer.rs", 1),
            frame("/home/u/.cargo/registry/inner.rs", 99),
        ]);
        let resolved = tb.resolve_failure_frame(&FrameFilter::default()).unwrap();
        assert_eq!(resolved.file, "/home/u/.cargo/registry/inner.rs");
        assert_eq!(resolved.line, 99);
    }

    #[test]
    fn empty_traceback_resolves_to_none() {
        assert!(Traceback::default()
            .resolve_failure_frame(&FrameFilter::default())
            .is_none());
    }

    #[test]
    fn extra_markers_extend_the_policy() {
        let filter = FrameFilter::default().with_marker("crates/harness/");
        assert!(filter.is_framework("crates/harness/src/runner.rs"));
        assert!(!filter.is_framework("specs/login.yaml"));
    }
}
