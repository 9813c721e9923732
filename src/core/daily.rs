//! Calendar-day grouping of parsed messages.
//!
//! [`group_by_day`] buckets messages into [`DailyLog`]s keyed by date, in
//! ascending date order. [`restrict_to_range`] narrows the grouping to a
//! closed `[start, end]` range. Both are pure functions: the same input
//! always yields the same grouping.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::Message;
use crate::error::DaybriefError;

/// All messages for one calendar date, in transcript order.
///
/// Invariant: never empty, and every message's date equals [`date`](Self::date).
/// Construction goes through [`group_by_day`], which guarantees both.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    date: NaiveDate,
    messages: Vec<Message>,
}

impl DailyLog {
    fn new(date: NaiveDate, messages: Vec<Message>) -> Self {
        debug_assert!(!messages.is_empty());
        debug_assert!(messages.iter().all(|m| m.date() == date));
        Self { date, messages }
    }

    /// The calendar date of this log.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The messages, in transcript order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the day.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The full day rendered as `Sender: content` lines.
    ///
    /// This is the text sent to the LLM on the single-shot path, and the
    /// text whose length decides single-shot vs chunking.
    pub fn serialized(&self) -> String {
        let mut out = String::with_capacity(self.serialized_len());
        for (i, msg) in self.messages.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&msg.serialized());
        }
        out
    }

    /// Character count of [`serialized`](Self::serialized), without
    /// building the string.
    pub fn serialized_len(&self) -> usize {
        let newlines = self.messages.len().saturating_sub(1);
        self.messages
            .iter()
            .map(Message::serialized_len)
            .sum::<usize>()
            + newlines
    }
}

/// Buckets messages by calendar date.
///
/// Returns an ordered mapping; iteration visits days in ascending date
/// order. Message order within a day follows transcript order.
pub fn group_by_day(messages: Vec<Message>) -> BTreeMap<NaiveDate, DailyLog> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Message>> = BTreeMap::new();

    for msg in messages {
        buckets.entry(msg.date()).or_default().push(msg);
    }

    buckets
        .into_iter()
        .map(|(date, msgs)| (date, DailyLog::new(date, msgs)))
        .collect()
}

/// Narrows a grouping to the closed range `[start, end]`.
///
/// Days without messages simply don't appear; an empty result is the
/// caller's signal that nothing falls in range.
pub fn restrict_to_range(
    days: BTreeMap<NaiveDate, DailyLog>,
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<NaiveDate, DailyLog> {
    days.into_iter()
        .filter(|(date, _)| *date >= start && *date <= end)
        .collect()
}

/// Parses a `YYYY-MM-DD` range date.
pub fn parse_range_date(date_str: &str) -> Result<NaiveDate, DaybriefError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| DaybriefError::invalid_date(date_str))
}

/// Identifies the `count` most frequent senders for prompt attribution.
///
/// Ties break toward the sender seen earlier in the transcript, so the
/// result is deterministic. Pads with placeholder names when the chat has
/// fewer distinct senders than requested.
pub fn detect_primary_senders(messages: &[Message], count: usize) -> Vec<String> {
    let mut tallies: HashMap<&str, (usize, usize)> = HashMap::new(); // sender -> (count, first index)

    for (i, msg) in messages.iter().enumerate() {
        let entry = tallies.entry(msg.sender.as_str()).or_insert((0, i));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = tallies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));

    let mut senders: Vec<String> = ranked
        .into_iter()
        .take(count)
        .map(|(name, _)| name.to_string())
        .collect();

    while senders.len() < count {
        senders.push(format!("Sender{}", senders.len() + 1));
    }

    senders
}
