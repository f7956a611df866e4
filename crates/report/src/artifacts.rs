//! On-disk layout of diagnostic artifacts under the report root

use std::io;
use std::path::{Path, PathBuf};

/// Manages the report output directory and deterministic artifact naming.
///
/// Layout under the root (default `reports/`):
///
/// ```text
/// reports/
///   screenshots/<sanitized-test-id>.png
///   summary_graph.png
///   summary_report.html
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub const DEFAULT_ROOT: &'static str = "reports";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn screenshots_dir(&self) -> PathBuf {
        self.root.join("screenshots")
    }

    pub fn graph_path(&self) -> PathBuf {
        self.root.join("summary_graph.png")
    }

    pub fn html_path(&self) -> PathBuf {
        self.root.join("summary_report.html")
    }

    /// Create the root and screenshots directories if they do not exist.
    pub fn ensure_layout(&self) -> io::Result<()> {
        std::fs::create_dir_all(self.screenshots_dir())
    }

    /// Map a test identifier to a filesystem-safe name: every `/` and `::`
    /// becomes a single `_`.
    pub fn sanitize_test_id(test_id: &str) -> String {
        test_id.replace("::", "_").replace('/', "_")
    }

    /// Deterministic screenshot path for a test identifier.
    pub fn screenshot_path(&self, test_id: &str) -> PathBuf {
        self.screenshots_dir()
            .join(format!("{}.png", Self::sanitize_test_id(test_id)))
    }

    /// Path relative to the report root, for embedding in the HTML report.
    pub fn relative_to_root<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROOT)
    }
}
