//! Sequential session runner
//!
//! Drives loaded scenarios against a [`Page`] one at a time and feeds the
//! reporting pipeline: every scenario is registered up front (so
//! collection-time casualties still get report rows), each one then fires
//! start/setup/call/teardown hooks in order, and the session-end step
//! writes the JSON export and renders the summary.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use webtest_report::{
    logging, ArtifactStore, FailureCapture, Frame, FrameFilter, Outcome, OutcomeRecorder, Phase,
    PhaseReport, RunTally, SessionExport, SummaryPaths, SummaryReporter, Traceback, UiContext,
};

use crate::config::Config;
use crate::error::HarnessResult;
use crate::page::Page;
use crate::spec::{ScenarioSpec, ScenarioStep};

/// Configuration for a test session.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Application under test
    pub env: Config,

    /// Report root directory (screenshots, chart, HTML report)
    pub report_root: PathBuf,

    /// Where the session export JSON lands
    pub results_path: PathBuf,

    /// Run log file, cross-referenced from failure artifacts
    pub log_file: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            env: Config::default(),
            report_root: PathBuf::from(ArtifactStore::DEFAULT_ROOT),
            results_path: PathBuf::from("test-results/session.json"),
            log_file: PathBuf::from(logging::DEFAULT_LOG_PATH),
        }
    }
}

/// What a finished session produced.
#[derive(Debug)]
pub struct RunReport {
    pub tally: RunTally,
    pub report: SummaryPaths,
    pub results_path: PathBuf,
}

/// Runs scenarios sequentially against one page.
///
/// `page` is optional: without a driver every scenario is reported as
/// skipped, which keeps non-UI sessions (collection checks, report
/// regeneration) flowing through the same pipeline.
pub struct SessionRunner<P> {
    config: RunnerConfig,
    store: ArtifactStore,
    recorder: OutcomeRecorder,
    page: Option<P>,
}

struct StepFailure {
    index: usize,
    summary: String,
    reason: String,
}

impl<P: Page> SessionRunner<P> {
    pub fn new(config: RunnerConfig, page: Option<P>) -> Self {
        let store = ArtifactStore::new(&config.report_root);
        // The harness's own frames never count as the failure location
        let filter = FrameFilter::default().with_marker("crates/harness/");
        let capture = FailureCapture::new(store.clone())
            .with_filter(filter)
            .with_log_file(&config.log_file);
        Self {
            store,
            recorder: OutcomeRecorder::new(capture),
            page,
            config,
        }
    }

    /// Run every scenario, then write the export and render the summary.
    pub fn run(mut self, specs: &[ScenarioSpec]) -> HarnessResult<RunReport> {
        for spec in specs {
            self.recorder.register_test(&spec.node_id(), &spec.suite);
        }

        info!("Running {} scenario(s)...", specs.len());
        for spec in specs {
            self.run_scenario(spec);
        }

        let session = self.recorder.into_session();
        let tally = session.tally();
        info!(
            "Test Results: {} passed, {} failed, {} skipped",
            tally.passed, tally.failed, tally.skipped
        );

        SessionExport::from_session(&session).write(&self.config.results_path)?;
        let report =
            SummaryReporter::new(self.store.clone()).render(&tally, session.records())?;

        Ok(RunReport {
            tally,
            report,
            results_path: self.config.results_path.clone(),
        })
    }

    fn run_scenario(&mut self, spec: &ScenarioSpec) {
        let id = spec.node_id();
        debug!("Running scenario: {}", spec.name);

        let page_ctx = self.page.as_ref().map(|p| p as &dyn UiContext);
        self.recorder.on_test_start(&id, &spec.suite, page_ctx);
        self.phase_report(spec, Phase::Setup, Outcome::Passed, None);

        let (outcome, traceback) = match self.page.as_mut() {
            None => {
                warn!("No page driver available; skipping '{}'", spec.name);
                (Outcome::Skipped, None)
            }
            Some(page) => match execute_steps(page, spec, &self.config.env, &self.store) {
                Ok(()) => {
                    info!("✓ {}", spec.name);
                    (Outcome::Passed, None)
                }
                Err(failure) => {
                    error!("✗ {} - {}: {}", spec.name, failure.summary, failure.reason);
                    (Outcome::Failed, Some(step_traceback(spec, &failure)))
                }
            },
        };

        self.phase_report(spec, Phase::Call, outcome, traceback.as_ref());
        self.phase_report(spec, Phase::Teardown, Outcome::Passed, None);
    }

    fn phase_report(
        &mut self,
        spec: &ScenarioSpec,
        phase: Phase,
        outcome: Outcome,
        traceback: Option<&Traceback>,
    ) {
        let id = spec.node_id();
        self.recorder.on_phase_report(PhaseReport {
            test_id: &id,
            test_name: &spec.name,
            class_name: &spec.suite,
            phase,
            outcome,
            traceback,
            page: self.page.as_ref().map(|p| p as &dyn UiContext),
        });
    }
}

fn execute_steps<P: Page>(
    page: &mut P,
    spec: &ScenarioSpec,
    env: &Config,
    store: &ArtifactStore,
) -> Result<(), StepFailure> {
    for (index, step) in spec.steps.iter().enumerate() {
        debug!("Executing step: {}", step.summary());
        let result = execute_step(page, step, env, store);
        if let Err(reason) = result {
            return Err(StepFailure {
                index,
                summary: step.summary(),
                reason,
            });
        }
    }
    Ok(())
}

fn execute_step<P: Page>(
    page: &mut P,
    step: &ScenarioStep,
    env: &Config,
    store: &ArtifactStore,
) -> Result<(), String> {
    match step {
        ScenarioStep::Navigate { url } => {
            let target = if url.starts_with('/') {
                format!("{}{}", env.base_url, url)
            } else {
                env.expand(url)
            };
            page.goto(&target).map_err(|e| e.to_string())
        }
        ScenarioStep::Click { selector } => page.click(selector).map_err(|e| e.to_string()),
        ScenarioStep::Fill { selector, value } => page
            .fill(selector, &env.expand(value))
            .map_err(|e| e.to_string()),
        ScenarioStep::Wait {
            selector,
            timeout_ms,
        } => page
            .wait_for(selector, *timeout_ms)
            .map_err(|e| e.to_string()),
        ScenarioStep::AssertText {
            selector,
            expected,
            contains,
        } => {
            let text = page.text_of(selector).map_err(|e| e.to_string())?;
            let expected = env.expand(expected);
            let matches = if *contains {
                text.contains(&expected)
            } else {
                text == expected
            };
            if matches {
                Ok(())
            } else {
                Err(format!(
                    "assertion failed: expected {expected:?}, got {text:?}"
                ))
            }
        }
        ScenarioStep::Screenshot { name, full_page } => {
            store.ensure_layout().map_err(|e| e.to_string())?;
            let path = store
                .screenshots_dir()
                .join(format!("{}.png", ArtifactStore::sanitize_test_id(name)));
            page.screenshot(&path, *full_page).map_err(|e| e.to_string())
        }
    }
}

/// Traceback for a failed step: the harness frame outermost, the scenario
/// file's step innermost.
fn step_traceback(spec: &ScenarioSpec, failure: &StepFailure) -> Traceback {
    let mut tb = Traceback::default();
    tb.push(Frame {
        file: file!().to_string(),
        line: line!(),
        source: "execute_steps(page, spec, env, store)".to_string(),
    });
    tb.push(Frame {
        file: spec.source.display().to_string(),
        line: failure.index as u32 + 1,
        source: failure.summary.clone(),
    });
    tb
}
