//! The parsed chat message type.
//!
//! [`Message`] is the normalized representation of one transcript entry.
//! The parser merges continuation lines into the preceding message, so a
//! single `Message` may span several lines of the export file.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use daybrief::Message;
//!
//! let msg = Message::new(
//!     Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
//!     "Alice",
//!     "Hello!",
//! );
//! assert_eq!(msg.date().to_string(), "2024-01-15");
//! assert_eq!(msg.serialized(), "Alice: Hello!");
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message, immutable once parsed.
///
/// Unlike raw export lines, the timestamp here is always present: messages
/// whose header cannot be parsed are skipped by the parser, because day
/// bucketing is impossible without a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Display name of the message author.
    pub sender: String,

    /// Text content. May contain newlines when the export had
    /// continuation lines.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Returns the calendar date this message belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Appends a continuation line to the content.
    pub fn push_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }

    /// The `Sender: content` form used in prompts and for size accounting.
    pub fn serialized(&self) -> String {
        format!("{}: {}", self.sender, self.content)
    }

    /// Character count of [`serialized`](Self::serialized), without
    /// allocating.
    pub fn serialized_len(&self) -> usize {
        // sender + ": " + content
        self.sender.chars().count() + 2 + self.content.chars().count()
    }
}
