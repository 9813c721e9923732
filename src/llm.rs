//! Summarizer client for an OpenAI-compatible chat-completion endpoint.
//!
//! The endpoint is treated as an opaque text-in/text-out function: one
//! blocking POST per summary, no retries. A failed call surfaces as an
//! error to the orchestrator, which marks that day as failed and moves on.
//!
//! Prompt construction is driven by [`PromptKind`], a closed enum: `Chunk`
//! prompts summarize one window of a long day, `Merge` prompts produce the
//! final daily summary (either directly from a short day's transcript or
//! from the collected window summaries). Templates name the two primary
//! senders so the model attributes statements to the right person.

use chrono::NaiveDate;
use serde_json::{Value, json};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{DaybriefError, Result};

/// Which stage of summarization a prompt belongs to.
///
/// Selects the prompt template and the output token cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Summarize one window of an oversized day.
    Chunk,
    /// Produce the final daily summary.
    Merge,
}

/// A fully rendered prompt, ready to send.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Stage this prompt belongs to.
    pub kind: PromptKind,
    /// The day being summarized.
    pub date: NaiveDate,
    /// System message (instruction prefix naming the senders).
    pub system: String,
    /// User message (the payload text).
    pub user: String,
}

/// Builds prompts for a chat between two primary senders.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    sender1: String,
    sender2: String,
}

impl PromptBuilder {
    /// Creates a builder attributing statements to the given senders.
    pub fn new(sender1: impl Into<String>, sender2: impl Into<String>) -> Self {
        Self {
            sender1: sender1.into(),
            sender2: sender2.into(),
        }
    }

    fn pretty_date(date: NaiveDate) -> String {
        date.format("%B %d, %Y").to_string()
    }

    /// Prompt for one window of a long day.
    pub fn chunk(&self, date: NaiveDate, segment_text: &str) -> Prompt {
        let system = format!(
            "You are an assistant that summarizes parts of a day's chat conversation. \
             Focus on key information, decisions, and questions in this specific segment. \
             Mention who ('{}' or '{}') said what. This is one part of a larger conversation.",
            self.sender1, self.sender2
        );
        let user = format!(
            "This is a segment of a chat conversation between {s1} and {s2} from {date}. \
             Please summarize the key points discussed in THIS SEGMENT ONLY. Be concise.\n\n\
             Chat Segment:\n\
             ------------\n\
             {segment_text}\n\
             ------------\n\
             Summary of this Segment:",
            s1 = self.sender1,
            s2 = self.sender2,
            date = Self::pretty_date(date),
        );
        Prompt {
            kind: PromptKind::Chunk,
            date,
            system,
            user,
        }
    }

    /// Prompt for a whole short day, summarized in one shot.
    pub fn whole_day(&self, date: NaiveDate, transcript_text: &str) -> Prompt {
        let system = format!(
            "You are an expert assistant that summarizes chat conversations. \
             Pay close attention to attributing statements to the correct speaker, \
             especially distinguishing between '{}' and '{}'. \
             The chat transcript is for a single day.",
            self.sender1, self.sender2
        );
        let user = format!(
            "The following is a transcript of chat messages primarily between {s1} and {s2} \
             from {date}. Please provide a concise summary of the main topics they discussed. \
             It is crucial to correctly attribute statements, questions, or opinions to the \
             specific person ({s1} or {s2}) who expressed them. Focus on key events, \
             decisions, or significant information shared.\n\n\
             Transcript (each line starts with the sender's name followed by a colon):\n\
             ----------\n\
             {transcript_text}\n\
             ----------\n\
             Concise Summary of the Day (strictly attributing actions and words to either \
             {s1} or {s2} based on the transcript):",
            s1 = self.sender1,
            s2 = self.sender2,
            date = Self::pretty_date(date),
        );
        Prompt {
            kind: PromptKind::Merge,
            date,
            system,
            user,
        }
    }

    /// Prompt merging the collected window summaries into one daily summary.
    pub fn merge(&self, date: NaiveDate, segment_summaries: &[String]) -> Prompt {
        let combined = segment_summaries
            .iter()
            .enumerate()
            .map(|(i, s)| format!("Summary of Segment {}:\n{}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n\n");

        let system = format!(
            "You are an expert summarizer. You will be given a series of summaries, each \
             covering a segment of a day's chat conversation between {s1} and {s2}. \
             Your task is to synthesize these segment summaries into a single, coherent, \
             and concise overview of the entire day's discussion. Ensure to attribute key \
             points to {s1} or {s2}. Highlight the most important topics, decisions, and \
             outcomes.",
            s1 = self.sender1,
            s2 = self.sender2,
        );
        let user = format!(
            "The following are summaries of consecutive segments from a chat conversation \
             that occurred on {date} between {s1} and {s2}. Please synthesize these into a \
             single, well-organized, and concise summary for the entire day. Attribute \
             statements to the correct person.\n\n\
             Segment Summaries:\n\
             ------------------\n\
             {combined}\n\
             ------------------\n\
             Overall Concise Summary of the Day:",
            s1 = self.sender1,
            s2 = self.sender2,
            date = Self::pretty_date(date),
        );
        Prompt {
            kind: PromptKind::Merge,
            date,
            system,
            user,
        }
    }
}

/// The summarization seam: anything that can turn a prompt into text.
///
/// The production implementation is [`LlmClient`]; tests drive the
/// orchestrator with scripted fakes.
pub trait Summarize {
    /// Sends one prompt and returns the generated summary text.
    fn summarize(&self, prompt: &Prompt) -> Result<String>;
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::blocking::Client,
}

impl LlmClient {
    /// Builds a client with the configured per-request timeout.
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    /// Returns the endpoint configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn max_tokens_for(&self, kind: PromptKind) -> u32 {
        match kind {
            PromptKind::Chunk => self.config.max_tokens_chunk,
            PromptKind::Merge => self.config.max_tokens_final,
        }
    }
}

impl Summarize for LlmClient {
    fn summarize(&self, prompt: &Prompt) -> Result<String> {
        let request_body = json!({
            "model": self.config.model_id,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user},
            ],
            "max_tokens": self.max_tokens_for(prompt.kind),
            "temperature": self.config.temperature,
        });

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let response = self.http.post(&url).json(&request_body).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|_| "<unreadable body>".to_string());
            let excerpt: String = body.chars().take(300).collect();
            return Err(DaybriefError::api(format!("status {status}: {excerpt}")));
        }

        let text = response.text()?;
        let body: Value = serde_json::from_str(&text)?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(Value::as_str)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| DaybriefError::api("no generated text in response"))
    }
}
