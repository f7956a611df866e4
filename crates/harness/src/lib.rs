//! Webtest harness: the execution-engine side of the pipeline
//!
//! Loads declarative YAML scenarios, drives them step-by-step against a
//! [`Page`] implementation, and fires the reporting hooks of
//! `webtest-report` in the guaranteed order: one scenario's hooks complete
//! before the next scenario starts, and the session-end report renders
//! after the last one.
//!
//! The browser driver itself is out of scope here: anything implementing
//! [`Page`] can be plugged in.

pub mod config;
pub mod error;
pub mod page;
pub mod runner;
pub mod spec;

pub use config::Config;
pub use error::{HarnessError, HarnessResult};
pub use page::{Page, PageError, PageResult};
pub use runner::{RunReport, RunnerConfig, SessionRunner};
pub use spec::{ScenarioSpec, ScenarioStep};
