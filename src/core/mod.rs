//! Core pipeline: day grouping, chunking, orchestration, and reporting.

pub mod chunker;
pub mod daily;
pub mod orchestrator;
pub mod report;

pub use chunker::{Chunk, Chunks};
pub use daily::{DailyLog, detect_primary_senders, group_by_day, parse_range_date, restrict_to_range};
pub use orchestrator::{DayOutcome, DayPlan, DaySummary, Orchestrator, plan_day};
pub use report::{render_report, write_report};
