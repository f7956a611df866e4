//! Outcome recording: lifecycle hooks, tallies, per-test records

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::{FailureArtifact, FailureCapture};
use crate::metadata::{RunMetadataTracker, NOT_AVAILABLE};
use crate::page::UiContext;
use crate::traceback::Traceback;

/// Terminal state of a test. Only the `call` phase determines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

/// Sub-step of a single test's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Call,
    Teardown,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Call => "call",
            Phase::Teardown => "teardown",
        }
    }
}

/// Aggregate pass/fail/skip counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTally {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl RunTally {
    /// Count one completed `call`-phase outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.passed + self.failed + self.skipped
    }
}

/// Everything recorded about one test case.
///
/// Created when the test is registered, filled incrementally as its phases
/// report, read-only once the session ends. Tests that never ran keep their
/// optional fields empty and render as `N/A` in the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// Unique node identifier (file path, class and test name combined).
    pub id: String,
    pub class_name: String,
    pub outcome: Option<Outcome>,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    pub duration_secs: Option<f64>,
    /// Last URL seen on the test's live context, or `"N/A"`.
    pub url: String,
    /// Failure diagnostics, for failed tests only.
    pub failure: Option<FailureArtifact>,
    /// HTML fragments attached for rendering under the test's report row.
    #[serde(default)]
    pub extra: Vec<String>,
}

impl TestRecord {
    fn new(id: &str, class_name: &str) -> Self {
        Self {
            id: id.to_string(),
            class_name: class_name.to_string(),
            outcome: None,
            start_time: None,
            end_time: None,
            duration_secs: None,
            url: NOT_AVAILABLE.to_string(),
            failure: None,
            extra: Vec::new(),
        }
    }
}

/// Session-scoped mutable state: the tally, the metadata tracker, and the
/// per-test records in registration order.
///
/// Passed by value into the recorder at session start and handed back at
/// session end; there are no module-level globals. Single-threaded by
/// contract: hooks are invoked non-concurrently by the execution engine.
#[derive(Debug, Default)]
pub struct SessionState {
    tally: RunTally,
    tracker: RunMetadataTracker,
    records: Vec<TestRecord>,
    index: HashMap<String, usize>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a record exists for `test_id`, creating a placeholder if
    /// needed, and return it mutably.
    fn register(&mut self, test_id: &str, class_name: &str) -> &mut TestRecord {
        let idx = *self.index.entry(test_id.to_string()).or_insert_with(|| {
            self.records.push(TestRecord::new(test_id, class_name));
            self.records.len() - 1
        });
        &mut self.records[idx]
    }

    pub fn tally(&self) -> RunTally {
        self.tally
    }

    /// Records in registration order, including tests that never ran.
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn record(&self, test_id: &str) -> Option<&TestRecord> {
        self.index.get(test_id).map(|&i| &self.records[i])
    }
}

/// One phase's result, as reported by the execution engine.
pub struct PhaseReport<'a> {
    pub test_id: &'a str,
    pub test_name: &'a str,
    pub class_name: &'a str,
    pub phase: Phase,
    pub outcome: Outcome,
    /// Present on failures; frames ordered outermost first.
    pub traceback: Option<&'a Traceback>,
    /// The test's live UI context, when one exists.
    pub page: Option<&'a dyn UiContext>,
}

/// Hooks into the test-execution lifecycle.
///
/// One recorder per session. The engine calls [`register_test`] for every
/// collected test, [`on_test_start`] before a test body runs,
/// [`on_phase_report`] once per phase, and [`into_session`] after the last
/// test.
///
/// [`register_test`]: OutcomeRecorder::register_test
/// [`on_test_start`]: OutcomeRecorder::on_test_start
/// [`on_phase_report`]: OutcomeRecorder::on_phase_report
/// [`into_session`]: OutcomeRecorder::into_session
pub struct OutcomeRecorder {
    state: SessionState,
    capture: FailureCapture,
}

impl OutcomeRecorder {
    pub fn new(capture: FailureCapture) -> Self {
        Self {
            state: SessionState::new(),
            capture,
        }
    }

    /// Register a collected test so it appears in the summary even if it
    /// never runs.
    pub fn register_test(&mut self, test_id: &str, class_name: &str) {
        self.state.register(test_id, class_name);
    }

    /// Protocol-start hook: record the start time and, when a live UI
    /// context is available, its current URL.
    pub fn on_test_start(&mut self, test_id: &str, class_name: &str, page: Option<&dyn UiContext>) {
        debug!("Starting test {}", test_id);
        self.state.register(test_id, class_name);
        self.state.tracker.record_start(test_id);
        if let Some(page) = page {
            self.state.tracker.record_url(test_id, page.current_url());
        }
    }

    /// Phase-result hook.
    ///
    /// Timing and URL metadata are attached on every phase for display;
    /// the tally and the terminal outcome move only on the `call` phase,
    /// and failure capture runs only for `call`-phase failures.
    pub fn on_phase_report(&mut self, report: PhaseReport<'_>) {
        let meta = self.state.tracker.lookup(report.test_id);
        let end_time = Local::now();
        let duration_secs = (end_time - meta.start_time).num_milliseconds() as f64 / 1000.0;

        let is_call = report.phase == Phase::Call;
        let mut failure = None;
        if is_call {
            self.state.tally.record(report.outcome);
            if report.outcome == Outcome::Failed {
                let empty = Traceback::default();
                failure = Some(self.capture.capture(
                    report.test_id,
                    report.test_name,
                    report.class_name,
                    report.page,
                    report.traceback.unwrap_or(&empty),
                ));
            }
        }

        let record = self.state.register(report.test_id, report.class_name);
        record.start_time = Some(meta.start_time);
        record.end_time = Some(end_time);
        record.duration_secs = Some(duration_secs);
        record.url = meta.url;
        if is_call {
            record.outcome = Some(report.outcome);
        }
        if let Some(artifact) = failure {
            if let Some(html) = &artifact.html {
                record.extra.push(html.clone());
            }
            record.failure = Some(artifact);
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.state
    }

    /// Session-end hook: hand the accumulated state to the reporter.
    pub fn into_session(self) -> SessionState {
        self.state
    }
}
