//! Machine-readable session export

use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReportResult;
use crate::recorder::{RunTally, SessionState, TestRecord};

/// Everything a session produced, in a shape that can be written out as
/// JSON and rendered again later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    pub generated_at: DateTime<Local>,
    pub tally: RunTally,
    pub records: Vec<TestRecord>,
}

impl SessionExport {
    pub fn from_session(state: &SessionState) -> Self {
        Self {
            generated_at: Local::now(),
            tally: state.tally(),
            records: state.records().to_vec(),
        }
    }

    pub fn write(&self, path: &Path) -> ReportResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!("Results written to: {}", path.display());
        Ok(())
    }

    pub fn read(path: &Path) -> ReportResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
