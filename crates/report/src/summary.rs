//! Session-end summary: bar chart image plus HTML table report

use std::path::PathBuf;

use tracing::info;

use crate::artifacts::ArtifactStore;
use crate::chart;
use crate::error::ReportResult;
use crate::metadata::NOT_AVAILABLE;
use crate::recorder::{Outcome, RunTally, TestRecord};

/// Where the rendered artifacts ended up.
#[derive(Debug, Clone)]
pub struct SummaryPaths {
    pub graph: PathBuf,
    pub html: PathBuf,
}

/// Renders the final report from the accumulated tally and records.
///
/// Runs once, after all tests complete. Missing optional fields render as
/// `N/A` placeholders; they never fail the report.
pub struct SummaryReporter {
    store: ArtifactStore,
}

impl SummaryReporter {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    pub fn render(&self, tally: &RunTally, records: &[TestRecord]) -> ReportResult<SummaryPaths> {
        std::fs::create_dir_all(self.store.root())?;

        let graph = self.store.graph_path();
        chart::render_tally_chart(tally, &graph)?;

        let html = self.store.html_path();
        std::fs::write(&html, self.render_html(records))?;

        info!("Summary report saved to {}", html.display());
        Ok(SummaryPaths { graph, html })
    }

    fn render_html(&self, records: &[TestRecord]) -> String {
        let mut out = String::new();
        out.push_str("<html><head><title>Test Summary</title></head><body>");
        out.push_str("<h1 style='color:navy;'>Test Summary Report</h1>");
        out.push_str("<img src='summary_graph.png' alt='summary graph'><br>");
        out.push_str(
            "<h2>Individual Test Details</h2><table border='1' cellpadding='5' cellspacing='0'>",
        );
        out.push_str(
            "<tr><th>Test Name</th><th>Class</th><th>Status</th><th>Duration</th>\
             <th>Start Time</th><th>End Time</th><th>URL</th></tr>",
        );

        for record in records {
            out.push_str(&render_row(record));
        }

        out.push_str("</table></body></html>");
        out
    }
}

fn render_row(record: &TestRecord) -> String {
    let status = record
        .outcome
        .map(Outcome::as_str)
        .unwrap_or(NOT_AVAILABLE);
    let color = match record.outcome {
        Some(Outcome::Passed) => "green",
        Some(Outcome::Failed) => "red",
        _ => "orange",
    };
    let duration = record
        .duration_secs
        .map(|d| format!("{d:.2}s"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let start = record
        .start_time
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let end = record
        .end_time
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut row = format!(
        "<tr style='color:{color};'><td>{id}</td><td>{class}</td><td>{status}</td>\
         <td>{duration}</td><td>{start}</td><td>{end}</td><td>{url}</td></tr>",
        id = record.id,
        class = record.class_name,
        url = record.url,
    );

    // Attached fragments (failure screenshots) render right under the row
    if !record.extra.is_empty() {
        row.push_str("<tr><td colspan='7'>");
        for fragment in &record.extra {
            row.push_str(fragment);
        }
        row.push_str("</td></tr>");
    }

    row
}
