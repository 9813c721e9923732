//! Configuration types for parsing, chunking, and the LLM endpoint.
//!
//! Plain structs with `Default` + builder methods, usable without the CLI.
//!
//! # Example
//!
//! ```rust
//! use daybrief::config::{ChunkConfig, LlmConfig};
//!
//! let chunking = ChunkConfig::new()
//!     .with_max_chunk_chars(8_000)
//!     .with_overlap_messages(3);
//!
//! let llm = LlmConfig::new("gemma-3-12b-it-qat");
//! assert_eq!(llm.base_url, "http://127.0.0.1:8000/v1");
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for transcript parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Skip system messages (encryption notice, user added/removed, etc.)
    /// so they don't pollute summaries (default: true)
    pub skip_system_messages: bool,

    /// Print a warning for each skipped malformed line (default: true)
    pub warn_on_skip: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            skip_system_messages: true,
            warn_on_skip: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Sets whether to warn on skipped malformed lines.
    #[must_use]
    pub fn with_warn_on_skip(mut self, warn: bool) -> Self {
        self.warn_on_skip = warn;
        self
    }
}

/// Configuration for splitting an oversized day into windows.
///
/// A day whose serialized text fits within `max_chunk_chars` is summarized
/// in one call; longer days are split into windows that overlap by
/// `overlap_messages` trailing messages to preserve cross-window context.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Serialized-character budget per window (default: 10_000)
    pub max_chunk_chars: usize,

    /// Trailing messages carried into the next window (default: 2)
    pub overlap_messages: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 10_000,
            overlap_messages: 2,
        }
    }
}

impl ChunkConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-window character budget.
    #[must_use]
    pub fn with_max_chunk_chars(mut self, chars: usize) -> Self {
        self.max_chunk_chars = chars;
        self
    }

    /// Sets the number of trailing messages carried into the next window.
    #[must_use]
    pub fn with_overlap_messages(mut self, count: usize) -> Self {
        self.overlap_messages = count;
        self
    }
}

/// Configuration for the OpenAI-compatible chat-completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the endpoint (default: `http://127.0.0.1:8000/v1`)
    pub base_url: String,

    /// Model identifier sent in the request body
    pub model_id: String,

    /// Token cap for a per-window summary (default: 250)
    pub max_tokens_chunk: u32,

    /// Token cap for a whole-day or merged summary (default: 400)
    pub max_tokens_final: u32,

    /// Sampling temperature (default: 0.15)
    pub temperature: f32,

    /// Per-request timeout in seconds (default: 240)
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Creates a configuration for the given model with default endpoint
    /// settings.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/v1".to_string(),
            model_id: model_id.into(),
            max_tokens_chunk: 250,
            max_tokens_final: 400,
            temperature: 0.15,
            timeout_secs: 240,
        }
    }

    /// Sets the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-window summary token cap.
    #[must_use]
    pub fn with_max_tokens_chunk(mut self, tokens: u32) -> Self {
        self.max_tokens_chunk = tokens;
        self
    }

    /// Sets the final summary token cap.
    #[must_use]
    pub fn with_max_tokens_final(mut self, tokens: u32) -> Self {
        self.max_tokens_final = tokens;
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
