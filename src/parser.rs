//! WhatsApp TXT transcript parser.
//!
//! Exports vary by locale. The parser auto-detects the format by scoring
//! the first 20 lines against every known pattern, or a specific
//! [`DateFormat`] can be forced for unusual exports.
//!
//! Supported formats:
//! - US: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - EU: `[15.01.24, 10:30:45] Sender: Message`
//! - EU2: `15/01/2024, 10:30 - Sender: Message`
//! - RU: `15.01.2024, 10:30 - Sender: Message`
//!
//! Lines without a timestamp header are continuations of the previous
//! message and are appended to it. Headered lines whose timestamp cannot be
//! parsed are skipped with a warning; a parse anomaly is never fatal.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use crate::Message;
use crate::config::ParserConfig;
use crate::error::DaybriefError;

/// Detected date format variants for WhatsApp exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// US format: M/D/YY or M/D/YYYY with optional AM/PM
    /// Example: [1/15/24, 10:30:45 AM]
    Us,
    /// EU format with dots in brackets: DD.MM.YY or DD.MM.YYYY
    /// Example: [15.01.24, 10:30:45]
    EuDotBracketed,
    /// EU format with dots, no brackets: DD.MM.YYYY
    /// Example: 26.10.2025, 20:40 - Sender: Message
    EuDotNoBracket,
    /// EU format with slashes, no brackets: DD/MM/YYYY
    /// Example: 15/01/2024, 10:30 -
    EuSlash,
    /// Bracketed EU with slashes
    /// Example: [15/01/2024, 10:30:45]
    EuSlashBracketed,
}

impl DateFormat {
    /// Returns the header regex pattern for this date format.
    fn pattern(self) -> &'static str {
        match self {
            // [1/15/24, 10:30:45 AM] Sender: Message
            DateFormat::Us => {
                r"^\[(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]\s([^:]+):\s?(.*)"
            }
            // [15.01.24, 10:30:45] Sender: Message
            DateFormat::EuDotBracketed => {
                r"^\[(\d{2}\.\d{2}\.\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\]\s([^:]+):\s?(.*)"
            }
            // 26.10.2025, 20:40 - Sender: Message
            DateFormat::EuDotNoBracket => {
                r"^(\d{2}\.\d{2}\.\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\s-\s([^:]+):\s?(.*)"
            }
            // 15/01/2024, 10:30 - Sender: Message
            DateFormat::EuSlash => {
                r"^(\d{2}/\d{2}/\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\s-\s([^:]+):\s?(.*)"
            }
            // [15/01/2024, 10:30:45] Sender: Message
            DateFormat::EuSlashBracketed => {
                r"^\[(\d{2}/\d{2}/\d{2,4}),\s(\d{2}:\d{2}(?::\d{2})?)\]\s([^:]+):\s?(.*)"
            }
        }
    }

    /// Returns date parsing format strings for chrono.
    fn date_parse_formats(self) -> &'static [&'static str] {
        match self {
            DateFormat::Us => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            DateFormat::EuDotBracketed | DateFormat::EuDotNoBracket => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
            DateFormat::EuSlash | DateFormat::EuSlashBracketed => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
        }
    }

    /// Returns all format variants.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::Us,
            DateFormat::EuDotBracketed,
            DateFormat::EuDotNoBracket,
            DateFormat::EuSlash,
            DateFormat::EuSlashBracketed,
        ]
    }

    /// Returns all recognized locale names.
    pub fn all_names() -> &'static [&'static str] {
        &["us", "eu-dot", "eu-dot-bracketed", "eu-slash", "eu-slash-bracketed"]
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DateFormat::Us => "us",
            DateFormat::EuDotNoBracket => "eu-dot",
            DateFormat::EuDotBracketed => "eu-dot-bracketed",
            DateFormat::EuSlash => "eu-slash",
            DateFormat::EuSlashBracketed => "eu-slash-bracketed",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us" => Ok(DateFormat::Us),
            "eu-dot" => Ok(DateFormat::EuDotNoBracket),
            "eu-dot-bracketed" => Ok(DateFormat::EuDotBracketed),
            "eu-slash" => Ok(DateFormat::EuSlash),
            "eu-slash-bracketed" => Ok(DateFormat::EuSlashBracketed),
            _ => Err(format!(
                "Unknown locale: '{}'. Expected one of: {}",
                s,
                DateFormat::all_names().join(", ")
            )),
        }
    }
}

/// Detection result for format auto-detection.
struct FormatDetector {
    format: DateFormat,
    regex: Regex,
}

impl FormatDetector {
    fn new(format: DateFormat) -> Self {
        Self {
            format,
            regex: Regex::new(format.pattern()).unwrap(),
        }
    }

    fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// Auto-detect date format by scoring sample lines.
///
/// Returns `None` if no format matches any line.
pub fn detect_format(lines: &[&str]) -> Option<DateFormat> {
    let detectors: Vec<FormatDetector> = DateFormat::all()
        .iter()
        .map(|&f| FormatDetector::new(f))
        .collect();

    let mut scores = vec![0usize; detectors.len()];

    for line in lines {
        for (i, detector) in detectors.iter().enumerate() {
            if detector.matches(line) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(detectors[winner_idx].format)
}

/// Parse timestamp from date and time strings.
fn parse_timestamp(date_str: &str, time_str: &str, format: DateFormat) -> Option<DateTime<Utc>> {
    let datetime_str = format!("{date_str}, {time_str}");

    for parse_format in format.date_parse_formats() {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&datetime_str, parse_format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Check if a line is a system message (no actual sender).
///
/// System messages include: group created, user added/left, encryption
/// notice, etc. They carry no conversational content worth summarizing.
fn is_system_message(sender: &str, content: &str) -> bool {
    let system_indicators = [
        "Messages and calls are end-to-end encrypted",
        "created group",
        "added",
        "removed",
        "left",
        "changed the subject",
        "changed this group's icon",
        "changed the group description",
        "changed their phone number",
        "joined using this group's invite link",
        "security code changed",
        "is now an admin",
        "turned on disappearing messages",
        "turned off disappearing messages",
    ];

    let content_lower = content.to_lowercase();
    let sender_lower = sender.to_lowercase();

    for indicator in &system_indicators {
        if content_lower.contains(&indicator.to_lowercase()) {
            return true;
        }
    }

    sender.trim().is_empty() || sender_lower.contains("whatsapp") || sender_lower.contains("system")
}

/// Parser for WhatsApp TXT transcript exports.
///
/// # Example
///
/// ```rust,no_run
/// use daybrief::parser::TranscriptParser;
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse("whatsapp_chat.txt".as_ref())?;
/// # Ok::<(), daybrief::DaybriefError>(())
/// ```
pub struct TranscriptParser {
    config: ParserConfig,
    locale: Option<DateFormat>,
}

impl TranscriptParser {
    /// Creates a parser with default configuration and locale
    /// auto-detection.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
            locale: None,
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            locale: None,
        }
    }

    /// Forces a specific export locale instead of auto-detecting.
    #[must_use]
    pub fn with_locale(mut self, locale: DateFormat) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a transcript file.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>, DaybriefError> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parses transcript content from a string.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Message>, DaybriefError> {
        let lines: Vec<&str> = content.lines().collect();

        if lines.is_empty() {
            return Ok(vec![]);
        }

        // Auto-detect format from the first 20 lines unless forced
        let format = match self.locale {
            Some(forced) => forced,
            None => {
                let sample_size = std::cmp::min(20, lines.len());
                detect_format(&lines[..sample_size]).ok_or_else(|| {
                    DaybriefError::invalid_format(
                        "Could not detect the export date format. \
                         Make sure the file is a valid WhatsApp chat export, \
                         or force a locale with --locale.",
                    )
                })?
            }
        };

        let regex = Regex::new(format.pattern())
            .map_err(|e| DaybriefError::invalid_format(e.to_string()))?;

        let mut messages: Vec<Message> = Vec::new();

        for line in &lines {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(caps) = regex.captures(line) {
                // New message starts
                let date_str = caps.get(1).map_or("", |m| m.as_str());
                let time_str = caps.get(2).map_or("", |m| m.as_str());
                let sender = caps.get(3).map_or("", |m| m.as_str().trim());
                let msg_content = caps.get(4).map_or("", |m| m.as_str());

                if self.config.skip_system_messages && is_system_message(sender, msg_content) {
                    continue;
                }

                match parse_timestamp(date_str, time_str, format) {
                    Some(timestamp) => {
                        messages.push(Message::new(timestamp, sender, msg_content));
                    }
                    None => {
                        // Headered but unparseable: skip, never fatal
                        if self.config.warn_on_skip {
                            let err = DaybriefError::parse(
                                format!("unparseable timestamp: {date_str}, {time_str}"),
                                None,
                            );
                            eprintln!("⚠️  Skipping line: {err}");
                        }
                    }
                }
            } else if let Some(last_msg) = messages.last_mut() {
                // Continuation of previous message (multiline)
                last_msg.push_line(line);
            }
            // Orphan continuation before any message: skip
        }

        Ok(messages)
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}
