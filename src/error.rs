//! Unified error types for daybrief.
//!
//! This module provides a single [`DaybriefError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! Errors fall into two severities:
//!
//! - **Fatal**: bad configuration, unreadable input, an unrecognized export
//!   format, or a date range containing no messages. These abort the run
//!   before any LLM call is made.
//! - **Per-day**: a failed LLM request marks that day as failed and the run
//!   continues with the next day. Use [`DaybriefError::is_llm`] to detect
//!   these.

use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// A specialized [`Result`] type for daybrief operations.
pub type Result<T> = std::result::Result<T, DaybriefError>;

/// The error type for all daybrief operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DaybriefError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing the report)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A transcript line had a recognizable header but could not be parsed.
    ///
    /// Recoverable: the parser skips the line with a warning.
    #[error("Failed to parse transcript line{}: {message}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// Description of what's wrong with the line
        message: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The transcript matches no known export locale.
    ///
    /// This occurs when the first lines of the file fit none of the
    /// supported date formats.
    #[error("Invalid transcript format: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date supplied for the summary range.
    ///
    /// Range dates expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// No messages fall inside the requested date range.
    ///
    /// Fatal before any LLM call; the process exits with code 1.
    #[error("No messages between {start} and {end}")]
    EmptyRange {
        /// Start of the requested range (inclusive)
        start: NaiveDate,
        /// End of the requested range (inclusive)
        end: NaiveDate,
    },

    /// The HTTP request to the LLM endpoint failed.
    ///
    /// Connection refused, DNS failure, or a timeout. Isolated to the day
    /// or chunk being summarized.
    #[error("LLM request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The LLM endpoint answered, but not with a usable summary.
    ///
    /// Non-success status code or a response body without the expected
    /// generated-text field.
    #[error("LLM endpoint error: {message}")]
    Api {
        /// Status code and/or body excerpt
        message: String,
    },

    /// Missing or inconsistent configuration.
    ///
    /// Fatal at startup, before the transcript is read.
    #[error("Configuration error: {message}")]
    Config {
        /// What's missing or inconsistent
        message: String,
    },

    /// JSON serialization error while building a request body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl DaybriefError {
    /// Creates a recoverable line-parse error.
    pub fn parse(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        DaybriefError::Parse {
            message: message.into(),
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        DaybriefError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        DaybriefError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an empty range error.
    pub fn empty_range(start: NaiveDate, end: NaiveDate) -> Self {
        DaybriefError::EmptyRange { start, end }
    }

    /// Creates an API-level error (bad status or unusable body).
    pub fn api(message: impl Into<String>) -> Self {
        DaybriefError::Api {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        DaybriefError::Config {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, DaybriefError::Io(_))
    }

    /// Returns `true` if this is a recoverable line-parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, DaybriefError::Parse { .. })
    }

    /// Returns `true` if this error came from an LLM call (transport or API).
    ///
    /// These are isolated to a single day; the run continues.
    pub fn is_llm(&self) -> bool {
        matches!(
            self,
            DaybriefError::Transport(_) | DaybriefError::Api { .. }
        )
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, DaybriefError::InvalidDate { .. })
    }

    /// Returns `true` if this is an empty-range error.
    pub fn is_empty_range(&self) -> bool {
        matches!(self, DaybriefError::EmptyRange { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, DaybriefError::Config { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
