//! # Daybrief
//!
//! A Rust library and CLI for turning WhatsApp chat exports into per-day
//! summaries using a local OpenAI-compatible LLM endpoint.
//!
//! ## Overview
//!
//! Daybrief parses a WhatsApp TXT export, groups the messages by calendar
//! day, and summarizes each day independently. Short days go to the model
//! in one call; days longer than the character budget are split into
//! overlapping windows of whole messages, each window is summarized, and
//! the window summaries are merged in a final call. The result is a
//! plain-text report with one dated section per day.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daybrief::config::{ChunkConfig, LlmConfig};
//! use daybrief::core::{Orchestrator, group_by_day, detect_primary_senders, render_report};
//! use daybrief::llm::{LlmClient, PromptBuilder};
//! use daybrief::parser::TranscriptParser;
//!
//! fn main() -> daybrief::Result<()> {
//!     let messages = TranscriptParser::new().parse("whatsapp_chat.txt".as_ref())?;
//!     let senders = detect_primary_senders(&messages, 2);
//!     let days = group_by_day(messages);
//!
//!     let client = LlmClient::new(LlmConfig::new("gemma-3-12b-it-qat"))?;
//!     let prompts = PromptBuilder::new(&senders[0], &senders[1]);
//!     let orchestrator = Orchestrator::new(&client, prompts, ChunkConfig::default());
//!
//!     let summaries = orchestrator.summarize_range(&days);
//!     let start = *days.keys().next().unwrap();
//!     let end = *days.keys().last().unwrap();
//!     println!("{}", render_report(&summaries, start, end, &senders));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — WhatsApp TXT parsing with locale auto-detection
//!   - [`TranscriptParser`](parser::TranscriptParser), [`DateFormat`](parser::DateFormat)
//! - [`config`] — Configuration types
//!   - [`ParserConfig`](config::ParserConfig), [`ChunkConfig`](config::ChunkConfig), [`LlmConfig`](config::LlmConfig)
//! - [`core`] — The summarization pipeline
//!   - [`core::daily`] — [`DailyLog`](core::DailyLog), [`group_by_day`](core::group_by_day), [`restrict_to_range`](core::restrict_to_range)
//!   - [`core::chunker`] — [`Chunks`](core::Chunks), overlapping windows of whole messages
//!   - [`core::orchestrator`] — [`Orchestrator`](core::Orchestrator), per-day state machine
//!   - [`core::report`] — [`render_report`](core::render_report), [`write_report`](core::write_report)
//! - [`llm`] — Prompts and the endpoint client
//!   - [`Summarize`](llm::Summarize), [`LlmClient`](llm::LlmClient), [`PromptBuilder`](llm::PromptBuilder)
//! - [`cli`] — CLI argument types ([`Args`](cli::Args))
//! - [`error`] — Unified error types ([`DaybriefError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod llm;
pub mod message;
pub mod parser;

// Re-export the main types at the crate root for convenience
pub use error::{DaybriefError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use daybrief::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{DaybriefError, Result};

    // Parsing
    pub use crate::parser::{DateFormat, TranscriptParser};

    // Configuration
    pub use crate::config::{ChunkConfig, LlmConfig, ParserConfig};

    // Pipeline
    pub use crate::core::{
        DailyLog, DaySummary, Orchestrator, detect_primary_senders, group_by_day,
        parse_range_date, render_report, restrict_to_range, write_report,
    };

    // Summarization
    pub use crate::llm::{LlmClient, Prompt, PromptBuilder, PromptKind, Summarize};

    // CLI types
    pub use crate::cli::Args;
}
