//! Error types for the harness

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Scenario parse error: {0}")]
    SpecParse(String),

    #[error("Environment file '{0}' not found")]
    EnvFileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report error: {0}")]
    Report(#[from] webtest_report::ReportError),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
