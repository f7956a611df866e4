//! Run logging: console output plus an append-mode run log file
//!
//! File lines follow the fixed shape
//! `[timestamp] [level] [target] [file:line] - message` so failure entries
//! can be cross-referenced from the report.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::error::ReportResult;

/// Default run log location, append mode.
pub const DEFAULT_LOG_PATH: &str = "logs/test_run.log";

struct RunLogFormat;

impl<S, N> FormatEvent<S, N> for RunLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let file = meta.file().unwrap_or("unknown");
        let file = file.rsplit('/').next().unwrap_or(file);
        write!(
            writer,
            "[{}] [{}] [{}] [{}:{}] - ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            meta.level(),
            meta.target(),
            file,
            meta.line().unwrap_or(0),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber: a console layer and a file layer
/// appending to `log_path`. Creates the log directory if needed.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init(log_path: &Path) -> ReportResult<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer().with_target(false);
    let file_layer = fmt::layer()
        .event_format(RunLogFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
