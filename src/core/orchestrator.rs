//! Per-day summarization orchestration.
//!
//! Each day moves through a small state machine:
//!
//! ```text
//! NotStarted -> SingleShot            -> Done | Failed
//!            -> Chunking -> MergePending -> Done | Failed
//! ```
//!
//! A day whose serialized text fits the chunk budget takes the single-shot
//! path: one summarizer call with the whole transcript. Longer days are
//! chunked; every chunk is summarized in order, then the chunk summaries
//! are merged in one final call. Any chunk failure fails the day without a
//! merge call. Days are independent: a failed day is reported and the run
//! continues.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::ChunkConfig;
use crate::core::daily::DailyLog;
use crate::llm::{PromptBuilder, Summarize};

/// The summarization path chosen for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPlan {
    /// Whole day in one summarizer call.
    SingleShot,
    /// Split into windows, summarize each, then merge.
    Chunked,
}

/// Decides single-shot vs chunked for a day under the given budget.
pub fn plan_day(log: &DailyLog, config: ChunkConfig) -> DayPlan {
    if log.serialized_len() <= config.max_chunk_chars {
        DayPlan::SingleShot
    } else {
        DayPlan::Chunked
    }
}

/// Terminal result for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome {
    /// The summary text.
    Done(String),
    /// Why the day could not be summarized.
    Failed(String),
}

/// One day's summary (or failure), produced exactly once per day in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    /// The day this summary covers.
    pub date: NaiveDate,
    /// Summary text or failure reason.
    pub outcome: DayOutcome,
}

impl DaySummary {
    fn done(date: NaiveDate, text: String) -> Self {
        Self {
            date,
            outcome: DayOutcome::Done(text),
        }
    }

    fn failed(date: NaiveDate, reason: String) -> Self {
        Self {
            date,
            outcome: DayOutcome::Failed(reason),
        }
    }

    /// Returns `true` if the day was summarized successfully.
    pub fn is_done(&self) -> bool {
        matches!(self.outcome, DayOutcome::Done(_))
    }

    /// The summary text, if the day succeeded.
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            DayOutcome::Done(text) => Some(text),
            DayOutcome::Failed(_) => None,
        }
    }

    /// The failure reason, if the day failed.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            DayOutcome::Done(_) => None,
            DayOutcome::Failed(reason) => Some(reason),
        }
    }
}

/// Drives summarization across a date-ordered set of days.
///
/// Strictly sequential: days in date order, chunks within a day in chunk
/// order (each window's overlap extends the context gathered so far).
pub struct Orchestrator<'a, S: Summarize> {
    summarizer: &'a S,
    prompts: PromptBuilder,
    chunking: ChunkConfig,
    progress: bool,
}

impl<'a, S: Summarize> Orchestrator<'a, S> {
    /// Creates an orchestrator over the given summarizer and prompts.
    pub fn new(summarizer: &'a S, prompts: PromptBuilder, chunking: ChunkConfig) -> Self {
        Self {
            summarizer,
            prompts,
            chunking,
            progress: false,
        }
    }

    /// Enables progress reporting to stdout.
    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Summarizes one day to a terminal [`DaySummary`].
    pub fn summarize_day(&self, log: &DailyLog) -> DaySummary {
        match plan_day(log, self.chunking) {
            DayPlan::SingleShot => self.single_shot(log),
            DayPlan::Chunked => self.chunked(log),
        }
    }

    fn single_shot(&self, log: &DailyLog) -> DaySummary {
        if self.progress {
            println!(
                "   Direct summary ({} chars, {} messages)",
                log.serialized_len(),
                log.len()
            );
        }
        let prompt = self.prompts.whole_day(log.date(), &log.serialized());
        match self.summarizer.summarize(&prompt) {
            Ok(text) => DaySummary::done(log.date(), text),
            Err(e) => DaySummary::failed(log.date(), e.to_string()),
        }
    }

    fn chunked(&self, log: &DailyLog) -> DaySummary {
        if self.progress {
            println!(
                "   Day too long ({} chars), chunked summarization",
                log.serialized_len()
            );
        }

        let mut chunk_summaries: Vec<String> = Vec::new();

        for (i, chunk) in log.chunks(self.chunking).enumerate() {
            if self.progress {
                println!(
                    "   Summarizing chunk {} ({} chars, {} messages)...",
                    i + 1,
                    chunk.serialized_len(),
                    chunk.messages().len()
                );
            }
            let prompt = self.prompts.chunk(log.date(), &chunk.serialized());
            match self.summarizer.summarize(&prompt) {
                Ok(summary) => chunk_summaries.push(summary),
                Err(e) => {
                    // Day fails here; the merge call is never made
                    return DaySummary::failed(
                        log.date(),
                        format!("chunk {} failed: {e}", i + 1),
                    );
                }
            }
        }

        if self.progress {
            println!(
                "   Merging {} chunk summaries...",
                chunk_summaries.len()
            );
        }
        let prompt = self.prompts.merge(log.date(), &chunk_summaries);
        match self.summarizer.summarize(&prompt) {
            Ok(text) => DaySummary::done(log.date(), text),
            Err(e) => DaySummary::failed(log.date(), format!("merge failed: {e}")),
        }
    }

    /// Summarizes every day in ascending date order.
    ///
    /// Returns exactly one [`DaySummary`] per input day. Per-day failures
    /// are recorded, never propagated.
    pub fn summarize_range(&self, days: &BTreeMap<NaiveDate, DailyLog>) -> Vec<DaySummary> {
        let mut results = Vec::with_capacity(days.len());

        for (date, log) in days {
            if self.progress {
                println!("\n📅 {} ({} messages)", date, log.len());
            }
            let summary = self.summarize_day(log);
            if self.progress {
                match &summary.outcome {
                    DayOutcome::Done(_) => println!("   ✅ Done"),
                    DayOutcome::Failed(reason) => println!("   ❌ Failed: {reason}"),
                }
            }
            results.push(summary);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::daily::group_by_day;
    use crate::error::DaybriefError;
    use crate::llm::{Prompt, PromptKind};
    use crate::{Message, Result};
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;

    /// Scripted summarizer: succeeds with a canned reply unless the call
    /// index appears in `fail_on`, and records every prompt kind.
    struct FakeSummarizer {
        fail_on: Vec<usize>,
        calls: RefCell<Vec<PromptKind>>,
    }

    impl FakeSummarizer {
        fn ok() -> Self {
            Self {
                fail_on: vec![],
                calls: RefCell::new(vec![]),
            }
        }

        fn failing_on(indices: &[usize]) -> Self {
            Self {
                fail_on: indices.to_vec(),
                calls: RefCell::new(vec![]),
            }
        }

        fn kinds(&self) -> Vec<PromptKind> {
            self.calls.borrow().clone()
        }
    }

    impl Summarize for FakeSummarizer {
        fn summarize(&self, prompt: &Prompt) -> Result<String> {
            let index = self.calls.borrow().len();
            self.calls.borrow_mut().push(prompt.kind);
            if self.fail_on.contains(&index) {
                Err(DaybriefError::api("scripted failure"))
            } else {
                Ok(format!("summary #{index}"))
            }
        }
    }

    fn msg(day: u32, minute: u32, content: &str) -> Message {
        Message::new(
            Utc.with_ymd_and_hms(2024, 1, day, 10 + minute / 60, minute % 60, 0)
                .unwrap(),
            if minute % 2 == 0 { "Alice" } else { "Bob" },
            content,
        )
    }

    fn day_log(day: u32, count: usize, content_len: usize) -> BTreeMap<NaiveDate, DailyLog> {
        group_by_day(
            (0..count)
                .map(|i| msg(day, i as u32, &"x".repeat(content_len)))
                .collect(),
        )
    }

    fn orchestrator<'a>(
        fake: &'a FakeSummarizer,
        max_chars: usize,
        overlap: usize,
    ) -> Orchestrator<'a, FakeSummarizer> {
        Orchestrator::new(
            fake,
            PromptBuilder::new("Alice", "Bob"),
            ChunkConfig::new()
                .with_max_chunk_chars(max_chars)
                .with_overlap_messages(overlap),
        )
    }

    #[test]
    fn test_plan_day() {
        let days = day_log(1, 3, 10);
        let log = days.values().next().unwrap();
        assert_eq!(
            plan_day(log, ChunkConfig::new().with_max_chunk_chars(1_000)),
            DayPlan::SingleShot
        );
        assert_eq!(
            plan_day(log, ChunkConfig::new().with_max_chunk_chars(10)),
            DayPlan::Chunked
        );
    }

    #[test]
    fn test_small_day_is_single_shot() {
        // 3 messages, ~50 chars total, budget 1000
        let days = day_log(1, 3, 8);
        let fake = FakeSummarizer::ok();
        let results = orchestrator(&fake, 1_000, 2).summarize_range(&days);

        assert_eq!(results.len(), 1);
        assert!(results[0].is_done());
        // Exactly one call, on the final-summary template
        assert_eq!(fake.kinds(), vec![PromptKind::Merge]);
    }

    #[test]
    fn test_long_day_is_chunked_then_merged() {
        // ~5000 chars, budget 1200: at least 4 chunk calls plus one merge
        let days = day_log(2, 100, 43);
        let fake = FakeSummarizer::ok();
        let results = orchestrator(&fake, 1_200, 2).summarize_range(&days);

        assert!(results[0].is_done());
        let kinds = fake.kinds();
        let chunk_calls = kinds.iter().filter(|k| **k == PromptKind::Chunk).count();
        assert!(chunk_calls >= 4, "expected >=4 chunk calls, got {chunk_calls}");
        assert_eq!(*kinds.last().unwrap(), PromptKind::Merge);
        assert_eq!(
            kinds.iter().filter(|k| **k == PromptKind::Merge).count(),
            1
        );
    }

    #[test]
    fn test_chunk_failure_skips_merge() {
        let days = day_log(2, 100, 43);
        // Fail the third call (chunk 3); calls are zero-indexed
        let fake = FakeSummarizer::failing_on(&[2]);
        let results = orchestrator(&fake, 1_200, 2).summarize_range(&days);

        assert!(!results[0].is_done());
        assert!(results[0].failure_reason().unwrap().contains("chunk 3"));
        // No merge call was ever made
        assert!(fake.kinds().iter().all(|k| *k == PromptKind::Chunk));
        assert_eq!(fake.kinds().len(), 3);
    }

    #[test]
    fn test_merge_failure_fails_day() {
        let days = day_log(2, 100, 43);
        let fake = FakeSummarizer::ok();
        let chunk_count = {
            let results = orchestrator(&fake, 1_200, 2).summarize_range(&days);
            assert!(results[0].is_done());
            fake.kinds().len() - 1
        };

        let fake2 = FakeSummarizer::failing_on(&[chunk_count]);
        let results = orchestrator(&fake2, 1_200, 2).summarize_range(&days);
        assert!(!results[0].is_done());
        assert!(results[0].failure_reason().unwrap().contains("merge failed"));
    }

    #[test]
    fn test_failed_day_does_not_stop_other_days() {
        let mut days = day_log(1, 3, 8);
        days.extend(day_log(2, 3, 8));
        days.extend(day_log(3, 3, 8));

        // Three single-shot days; fail the middle one
        let fake = FakeSummarizer::failing_on(&[1]);
        let results = orchestrator(&fake, 1_000, 2).summarize_range(&days);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_done());
        assert!(!results[1].is_done());
        assert!(results[2].is_done());
    }

    #[test]
    fn test_results_in_date_order() {
        let mut days = day_log(7, 3, 8);
        days.extend(day_log(3, 3, 8));
        days.extend(day_log(5, 3, 8));

        let fake = FakeSummarizer::ok();
        let results = orchestrator(&fake, 1_000, 2).summarize_range(&days);
        let dates: Vec<NaiveDate> = results.iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_one_summary_per_day() {
        let mut days = day_log(1, 3, 8);
        days.extend(day_log(2, 100, 43));

        let fake = FakeSummarizer::ok();
        let results = orchestrator(&fake, 1_200, 2).summarize_range(&days);
        assert_eq!(results.len(), days.len());
    }
}
