//! Full harness sessions driven with a scripted page double

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use webtest_harness::{
    Config, Page, PageError, PageResult, RunnerConfig, ScenarioSpec, SessionRunner,
};
use webtest_report::{Outcome, SessionExport, UiContext};

/// In-memory page: canned element text, recorded interactions.
struct ScriptedPage {
    url: String,
    texts: HashMap<String, String>,
    actions: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPage {
    fn new(texts: &[(&str, &str)]) -> (Self, Rc<RefCell<Vec<String>>>) {
        let actions = Rc::new(RefCell::new(Vec::new()));
        let page = Self {
            url: "about:blank".to_string(),
            texts: texts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            actions: Rc::clone(&actions),
        };
        (page, actions)
    }
}

impl UiContext for ScriptedPage {
    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn screenshot(&self, path: &Path, _full_page: bool) -> io::Result<()> {
        std::fs::write(path, b"\x89PNG fake")
    }
}

impl Page for ScriptedPage {
    fn goto(&mut self, url: &str) -> PageResult<()> {
        self.url = url.to_string();
        self.actions.borrow_mut().push(format!("goto {url}"));
        Ok(())
    }

    fn click(&mut self, selector: &str) -> PageResult<()> {
        self.actions.borrow_mut().push(format!("click {selector}"));
        Ok(())
    }

    fn fill(&mut self, selector: &str, value: &str) -> PageResult<()> {
        self.actions
            .borrow_mut()
            .push(format!("fill {selector}={value}"));
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, _timeout_ms: u64) -> PageResult<()> {
        if self.texts.contains_key(selector) {
            Ok(())
        } else {
            Err(PageError::Timeout(selector.to_string()))
        }
    }

    fn text_of(&mut self, selector: &str) -> PageResult<String> {
        self.texts
            .get(selector)
            .cloned()
            .ok_or_else(|| PageError::NotFound(selector.to_string()))
    }
}

fn spec_from(yaml: &str, source: &str) -> ScenarioSpec {
    let mut spec = ScenarioSpec::from_yaml(yaml).unwrap();
    spec.source = PathBuf::from(source);
    spec
}

fn runner_config(root: &Path) -> RunnerConfig {
    RunnerConfig {
        env: Config {
            base_url: "http://app.example".to_string(),
            username: "admin".to_string(),
            password: "s3cret".to_string(),
        },
        report_root: root.join("reports"),
        results_path: root.join("test-results/session.json"),
        log_file: root.join("logs/test_run.log"),
    }
}

#[test]
fn session_reports_two_passes_and_one_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = runner_config(dir.path());

    let specs = vec![
        spec_from(
            r#"
name: open_overview
suite: TestOverview
steps:
  - action: navigate
    url: /overview
  - action: assert_text
    selector: '#title'
    expected: Overview
"#,
            "specs/overview.yaml",
        ),
        spec_from(
            r#"
name: create_user
suite: TestAdmin
steps:
  - action: navigate
    url: /admin
  - action: fill
    selector: '#user-name'
    value: '${username}'
  - action: click
    selector: '#save'
"#,
            "specs/admin.yaml",
        ),
        spec_from(
            r#"
name: broken_banner
suite: TestAdmin
steps:
  - action: navigate
    url: /admin
  - action: assert_text
    selector: '#banner'
    expected: User created
"#,
            "specs/admin.yaml",
        ),
    ];

    let (page, actions) = ScriptedPage::new(&[("#title", "Overview"), ("#banner", "Error: quota")]);
    let report = SessionRunner::new(config.clone(), Some(page))
        .run(&specs)
        .unwrap();

    assert_eq!(report.tally.passed, 2);
    assert_eq!(report.tally.failed, 1);
    assert_eq!(report.tally.skipped, 0);

    // The failing scenario captured exactly one screenshot
    let shots: Vec<_> = std::fs::read_dir(config.report_root.join("screenshots"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(shots, vec!["specs_admin.yaml_TestAdmin_broken_banner.png"]);

    // Credentials were expanded, never taken from the YAML literally
    assert!(actions
        .borrow()
        .iter()
        .any(|a| a == "fill #user-name=admin"));
    // Relative navigation goes through the configured base URL
    assert!(actions
        .borrow()
        .iter()
        .any(|a| a == "goto http://app.example/overview"));

    // Export is on disk and agrees with the returned tally
    let export = SessionExport::read(&report.results_path).unwrap();
    assert_eq!(export.tally, report.tally);
    assert_eq!(export.records.len(), 3);

    let failed = export
        .records
        .iter()
        .find(|r| r.outcome == Some(Outcome::Failed))
        .unwrap();
    assert_eq!(failed.class_name, "TestAdmin");
    assert_eq!(failed.url, "http://app.example/admin");
    let location = failed
        .failure
        .as_ref()
        .unwrap()
        .location
        .as_ref()
        .unwrap();
    // The harness's own frame is filtered out; the scenario file is blamed
    assert_eq!(location.file, "specs/admin.yaml");
    assert_eq!(location.line, 2);
    assert_eq!(location.source, "assert_text:#banner");

    // Summary artifacts rendered
    let html = std::fs::read_to_string(&report.report.html).unwrap();
    assert_eq!(html.matches("<tr style=").count(), 3);
    assert_eq!(html.matches("color:red").count(), 1);
    assert!(html.contains("specs_admin.yaml_TestAdmin_broken_banner.png"));
    assert!(report.report.graph.is_file());
}

#[test]
fn session_without_page_driver_skips_everything() {
    let dir = tempfile::tempdir().unwrap();
    let config = runner_config(dir.path());

    let specs = vec![spec_from(
        "name: t\nsuite: TestX\nsteps:\n  - action: navigate\n    url: /\n",
        "specs/t.yaml",
    )];

    let report = SessionRunner::<ScriptedPage>::new(config.clone(), None)
        .run(&specs)
        .unwrap();

    assert_eq!(report.tally.skipped, 1);
    assert_eq!(report.tally.passed + report.tally.failed, 0);
    assert!(!config.report_root.join("screenshots").exists());

    let html = std::fs::read_to_string(&report.report.html).unwrap();
    assert_eq!(html.matches("color:orange").count(), 1);
}

#[test]
fn empty_session_still_renders_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = runner_config(dir.path());

    let report = SessionRunner::<ScriptedPage>::new(config, None)
        .run(&[])
        .unwrap();

    assert_eq!(report.tally.passed + report.tally.failed + report.tally.skipped, 0);
    assert!(report.report.graph.is_file());
    let html = std::fs::read_to_string(&report.report.html).unwrap();
    assert_eq!(html.matches("<tr").count(), 1);
    assert!(html.contains("</table>"));
}

#[test]
fn wait_step_failure_is_captured_with_its_step_line() {
    let dir = tempfile::tempdir().unwrap();
    let config = runner_config(dir.path());

    let specs = vec![spec_from(
        r#"
name: slow_widget
suite: TestSafety
steps:
  - action: navigate
    url: /safety
  - action: wait
    selector: '#risk-chart'
    timeout_ms: 100
"#,
        "specs/safety.yaml",
    )];

    let (page, _) = ScriptedPage::new(&[]);
    let report = SessionRunner::new(config, Some(page)).run(&specs).unwrap();

    assert_eq!(report.tally.failed, 1);
    let export = SessionExport::read(&report.results_path).unwrap();
    let location = export.records[0]
        .failure
        .as_ref()
        .unwrap()
        .location
        .as_ref()
        .unwrap()
        .clone();
    assert_eq!(location.file, "specs/safety.yaml");
    assert_eq!(location.line, 2);
    assert_eq!(location.source, "wait:#risk-chart");
}
