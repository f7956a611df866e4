//! Per-test timing and URL metadata for one session

use std::collections::HashMap;

use chrono::{DateTime, Local};

/// Sentinel for values that were never observed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Metadata looked up for a test: always fully populated, with defaults
/// standing in for anything that was never recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct TestMeta {
    pub start_time: DateTime<Local>,
    pub url: String,
}

#[derive(Debug, Default, Clone)]
struct Entry {
    start_time: Option<DateTime<Local>>,
    url: Option<String>,
}

/// Session-scoped tracker of test start times and last-seen URLs.
///
/// Created empty at session start, populated as tests start, discarded at
/// session end. Written only from hook callbacks, which the execution
/// engine guarantees are invoked non-concurrently, so no synchronization
/// is needed here.
#[derive(Debug, Default)]
pub struct RunMetadataTracker {
    entries: HashMap<String, Entry>,
}

impl RunMetadataTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current wall-clock time as the start of `test_id`.
    /// Re-invocation for the same id overwrites.
    pub fn record_start(&mut self, test_id: &str) {
        self.entries.entry(test_id.to_string()).or_default().start_time = Some(Local::now());
    }

    /// Record the URL of the test's live context.
    pub fn record_url(&mut self, test_id: &str, url: impl Into<String>) {
        self.entries.entry(test_id.to_string()).or_default().url = Some(url.into());
    }

    /// Look up metadata for a test. Never fails: missing values fall back
    /// to `now` for the start time and [`NOT_AVAILABLE`] for the URL.
    pub fn lookup(&self, test_id: &str) -> TestMeta {
        let entry = self.entries.get(test_id).cloned().unwrap_or_default();
        TestMeta {
            start_time: entry.start_time.unwrap_or_else(Local::now),
            url: entry.url.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}
