//! Webtest reporting pipeline
//!
//! This crate records test outcomes as an external execution engine drives a
//! browser-based test session, captures diagnostics when a test fails, and
//! renders a summary report once the session is over.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Reporting Pipeline                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  OutcomeRecorder                                            │
//! │    ├── on_test_start(id, class, page?)                      │
//! │    ├── on_phase_report(PhaseReport)                         │
//! │    │       └── FailureCapture (call-phase failures only)    │
//! │    │             ├── resolve failure frame (Traceback)      │
//! │    │             └── screenshot via ArtifactStore           │
//! │    └── into_session() -> SessionState                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SummaryReporter                                            │
//! │    ├── summary_graph.png   (bar chart, one bar per outcome) │
//! │    └── summary_report.html (one row per registered test)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hooks are invoked strictly sequentially by contract; nothing in here is
//! synchronized and nothing here blocks except screenshot I/O. Diagnostic
//! code is best-effort: a capture failure is logged and swallowed so the
//! original test failure stays the only visible one.

pub mod artifacts;
pub mod capture;
pub mod chart;
pub mod error;
pub mod export;
pub mod logging;
pub mod metadata;
pub mod page;
pub mod recorder;
pub mod summary;
pub mod traceback;

pub use artifacts::ArtifactStore;
pub use capture::{FailureArtifact, FailureCapture};
pub use error::{ReportError, ReportResult};
pub use export::SessionExport;
pub use metadata::{RunMetadataTracker, NOT_AVAILABLE};
pub use page::UiContext;
pub use recorder::{Outcome, OutcomeRecorder, Phase, PhaseReport, RunTally, SessionState, TestRecord};
pub use summary::{SummaryPaths, SummaryReporter};
pub use traceback::{Frame, FrameFilter, Traceback};
