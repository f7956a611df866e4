//! Declarative YAML scenario specification

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, HarnessResult};

/// A complete scenario parsed from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Suite (class) name the scenario belongs to
    #[serde(default = "default_suite")]
    pub suite: String,

    /// Tags for filtering scenarios
    #[serde(default)]
    pub tags: Vec<String>,

    /// Steps to execute in order
    pub steps: Vec<ScenarioStep>,

    /// The file this scenario was loaded from; filled by the loader
    #[serde(skip)]
    pub source: PathBuf,
}

fn default_suite() -> String {
    "N/A".to_string()
}

/// A single step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Navigate to a URL (relative to the configured base URL)
    Navigate { url: String },

    /// Click an element
    Click { selector: String },

    /// Clear and fill an input field
    Fill { selector: String, value: String },

    /// Wait for an element to appear
    Wait {
        selector: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
    },

    /// Assert the text content of an element
    AssertText {
        selector: String,
        expected: String,
        #[serde(default)]
        contains: bool,
    },

    /// Take a screenshot
    Screenshot {
        name: String,
        #[serde(default)]
        full_page: bool,
    },
}

fn default_wait_timeout() -> u64 {
    5000
}

impl ScenarioStep {
    /// One-line rendering of the step, used for logs and traceback text.
    pub fn summary(&self) -> String {
        match self {
            ScenarioStep::Navigate { url } => format!("navigate:{}", url),
            ScenarioStep::Click { selector } => format!("click:{}", selector),
            ScenarioStep::Fill { selector, .. } => format!("fill:{}", selector),
            ScenarioStep::Wait { selector, .. } => format!("wait:{}", selector),
            ScenarioStep::AssertText { selector, .. } => format!("assert_text:{}", selector),
            ScenarioStep::Screenshot { name, .. } => format!("screenshot:{}", name),
        }
    }
}

impl ScenarioSpec {
    /// Parse a scenario from a YAML string.
    pub fn from_yaml(yaml: &str) -> HarnessResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| HarnessError::SpecParse(e.to_string()))
    }

    /// Parse a scenario from a YAML file, remembering its source path.
    pub fn from_file(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut spec = serde_yaml::from_str::<Self>(&content)
            .map_err(|e| HarnessError::SpecParse(format!("{}: {}", path.display(), e)))?;
        spec.source = path.to_path_buf();
        Ok(spec)
    }

    /// Load every scenario under a directory, in path order.
    pub fn load_all(dir: &Path) -> HarnessResult<Vec<Self>> {
        let mut specs = Vec::new();
        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            specs.push(Self::from_file(entry.path())?);
        }
        Ok(specs)
    }

    /// Filter scenarios by tag.
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs.iter().filter(|s| s.tags.iter().any(|t| t == tag)).collect()
    }

    /// Unique test node identifier: `<source path>::<suite>::<name>`.
    pub fn node_id(&self) -> String {
        format!("{}::{}::{}", self.source.display(), self.suite, self.name)
    }
}
