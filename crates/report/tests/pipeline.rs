//! End-to-end pipeline tests: recorder -> capture -> summary

use std::io;
use std::path::Path;

use webtest_report::{
    ArtifactStore, FailureCapture, Frame, Outcome, OutcomeRecorder, Phase, PhaseReport, RunTally,
    SummaryReporter, Traceback, UiContext,
};

struct FakePage {
    url: String,
}

impl FakePage {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl UiContext for FakePage {
    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn screenshot(&self, path: &Path, _full_page: bool) -> io::Result<()> {
        std::fs::write(path, b"\x89PNG fake")
    }
}

fn spec_frame(file: &str, line: u32) -> Traceback {
    Traceback::new(vec![
        Frame {
            file: "/home/user/.cargo/registry/src/harness/runner.rs".to_string(),
            line: 120,
            source: "step.execute(page)".to_string(),
        },
        Frame {
            file: file.to_string(),
            line,
            source: "assert_text:#banner".to_string(),
        },
    ])
}

fn run_test(
    recorder: &mut OutcomeRecorder,
    id: &str,
    outcome: Outcome,
    page: Option<&dyn UiContext>,
    traceback: Option<&Traceback>,
) {
    recorder.on_test_start(id, "TestSuite", page);
    for phase in [Phase::Setup, Phase::Call, Phase::Teardown] {
        let phase_outcome = if phase == Phase::Call {
            outcome
        } else {
            Outcome::Passed
        };
        recorder.on_phase_report(PhaseReport {
            test_id: id,
            test_name: id,
            class_name: "TestSuite",
            phase,
            outcome: phase_outcome,
            traceback: if phase == Phase::Call { traceback } else { None },
            page,
        });
    }
}

/// Two passing tests and one failing test with a live UI context: the tally
/// is {2, 1, 0}, exactly one screenshot lands on disk, and the report shows
/// three rows with the failing one red.
#[test]
fn session_with_two_passes_and_one_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("reports"));
    let mut recorder = OutcomeRecorder::new(FailureCapture::new(store.clone()));

    let page = FakePage::new("http://app/overview");
    run_test(&mut recorder, "tests/a::TestSuite::ok_one", Outcome::Passed, Some(&page), None);
    run_test(&mut recorder, "tests/a::TestSuite::ok_two", Outcome::Passed, Some(&page), None);
    let tb = spec_frame("tests/a.rs", 42);
    run_test(
        &mut recorder,
        "tests/a::TestSuite::broken",
        Outcome::Failed,
        Some(&page),
        Some(&tb),
    );

    let state = recorder.into_session();
    assert_eq!(
        state.tally(),
        RunTally {
            passed: 2,
            failed: 1,
            skipped: 0
        }
    );

    let screenshots: Vec<_> = std::fs::read_dir(store.screenshots_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(screenshots, vec!["tests_a_TestSuite_broken.png"]);

    let paths = SummaryReporter::new(store)
        .render(&state.tally(), state.records())
        .unwrap();
    let html = std::fs::read_to_string(&paths.html).unwrap();
    assert_eq!(html.matches("<tr style=").count(), 3);
    assert_eq!(html.matches("color:red").count(), 1);
    assert_eq!(html.matches("color:green").count(), 2);
    assert!(html.contains("http://app/overview"));
    assert!(paths.graph.is_file());
}

/// A failure with no UI context: no screenshot, no fragment, but the
/// failure location is still resolved and recorded.
#[test]
fn failure_without_ui_context() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("reports"));
    let mut recorder = OutcomeRecorder::new(FailureCapture::new(store.clone()));

    let tb = spec_frame("tests/api.rs", 9);
    run_test(
        &mut recorder,
        "tests/api::TestSuite::no_browser",
        Outcome::Failed,
        None,
        Some(&tb),
    );

    let state = recorder.into_session();
    assert!(!store.screenshots_dir().exists()
        || std::fs::read_dir(store.screenshots_dir()).unwrap().next().is_none());

    let record = state.record("tests/api::TestSuite::no_browser").unwrap();
    assert!(record.extra.is_empty());
    let failure = record.failure.as_ref().unwrap();
    assert!(failure.screenshot.is_none());
    assert_eq!(failure.location.as_ref().unwrap().file, "tests/api.rs");

    let paths = SummaryReporter::new(store)
        .render(&state.tally(), state.records())
        .unwrap();
    let html = std::fs::read_to_string(&paths.html).unwrap();
    assert!(!html.contains("colspan"));
}

/// A traceback made solely of library frames falls back to the innermost
/// frame instead of raising.
#[test]
fn library_only_traceback_falls_back_to_innermost() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("reports"));
    let mut recorder = OutcomeRecorder::new(FailureCapture::new(store));

    let tb = Traceback::new(vec![
        Frame {
            file: "/home/user/.cargo/registry/src/outer.rs".to_string(),
            line: 10,
            source: "outer()".to_string(),
        },
        Frame {
            file: "/home/user/.cargo/registry/src/inner.rs".to_string(),
            line: 77,
            source: "inner()".to_string(),
        },
    ]);
    run_test(
        &mut recorder,
        "tests/lib_only::TestSuite::deep",
        Outcome::Failed,
        None,
        Some(&tb),
    );

    let state = recorder.into_session();
    let failure = state
        .record("tests/lib_only::TestSuite::deep")
        .unwrap()
        .failure
        .as_ref()
        .unwrap()
        .clone();
    let location = failure.location.unwrap();
    assert_eq!(location.file, "/home/user/.cargo/registry/src/inner.rs");
    assert_eq!(location.line, 77);
}

/// The run log receives the literal assertion-failure line with the
/// resolved frame.
#[test]
fn failure_log_line_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs/test_run.log");
    webtest_report::logging::init(&log_path).unwrap();

    let store = ArtifactStore::new(dir.path().join("reports"));
    let mut recorder = OutcomeRecorder::new(
        FailureCapture::new(store).with_log_file(&log_path),
    );

    let tb = spec_frame("specs/login.yaml", 2);
    run_test(
        &mut recorder,
        "specs/login.yaml::TestLogin::bad_password",
        Outcome::Failed,
        None,
        Some(&tb),
    );

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains(
        "Assertion failed in test 'specs/login.yaml::TestLogin::bad_password' \
         (class: 'TestSuite') at specs/login.yaml:2. Line: assert_text:#banner"
    ));
}
