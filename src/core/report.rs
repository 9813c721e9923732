//! Plain-text report assembly.
//!
//! A report has a header (date range, generation time, day count, the two
//! primary senders) followed by one dated section per day in ascending
//! order. Failed days get a section too, carrying the failure reason, so
//! the report always accounts for every day in range.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::core::orchestrator::{DayOutcome, DaySummary};
use crate::error::Result;

const SECTION_RULE: &str = "----------------------------------------";

/// Renders the full report as a string.
///
/// `summaries` must be in ascending date order, as produced by
/// `Orchestrator::summarize_range`.
pub fn render_report(
    summaries: &[DaySummary],
    start: NaiveDate,
    end: NaiveDate,
    senders: &[String],
) -> String {
    let mut out = String::new();

    out.push_str("Daily Chat Summaries\n");
    out.push_str("====================\n");
    out.push_str(&format!("Range:     {start} to {end}\n"));
    out.push_str(&format!(
        "Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("Days:      {}\n", summaries.len()));
    out.push_str(&format!("Senders:   {}\n", senders.join(", ")));

    for summary in summaries {
        out.push('\n');
        out.push_str(&format!(
            "=== {} ===\n",
            summary.date.format("%Y-%m-%d (%A)")
        ));
        match &summary.outcome {
            DayOutcome::Done(text) => out.push_str(text),
            DayOutcome::Failed(reason) => {
                out.push_str(&format!("[summarization failed: {reason}]"));
            }
        }
        out.push('\n');
        out.push_str(SECTION_RULE);
        out.push('\n');
    }

    out
}

/// Renders the report and writes it to `path`.
pub fn write_report(
    summaries: &[DaySummary],
    start: NaiveDate,
    end: NaiveDate,
    senders: &[String],
    path: &Path,
) -> Result<()> {
    let report = render_report(summaries, start, end, senders);
    let mut file = File::create(path)?;
    file.write_all(report.as_bytes())?;
    Ok(())
}
