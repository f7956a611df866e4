//! Re-render a summary report from an exported session JSON
//!
//! Run with: cargo run --package webtest-report --bin webtest-render

use std::path::PathBuf;

use clap::Parser;

use webtest_report::{logging, ArtifactStore, SessionExport, SummaryReporter};

#[derive(Parser, Debug)]
#[command(name = "webtest-render")]
#[command(about = "Render the summary report from an exported test session")]
struct Args {
    /// Session export JSON produced by a test run
    #[arg(short, long, default_value = "test-results/session.json")]
    input: PathBuf,

    /// Report root directory
    #[arg(short, long, default_value = ArtifactStore::DEFAULT_ROOT)]
    output: PathBuf,

    /// Run log file location
    #[arg(long, default_value = logging::DEFAULT_LOG_PATH)]
    log_file: PathBuf,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(&args.log_file) {
        eprintln!("Warning: could not open log file: {}", e);
    }

    match render(&args) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn render(args: &Args) -> webtest_report::ReportResult<()> {
    let export = SessionExport::read(&args.input)?;
    let reporter = SummaryReporter::new(ArtifactStore::new(&args.output));
    let paths = reporter.render(&export.tally, &export.records)?;
    println!("Summary report saved to {}", paths.html.display());
    Ok(())
}
