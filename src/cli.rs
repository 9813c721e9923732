//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the CLI argument structure. The input
//! path and model id can also come from the environment (`CHAT_FILE_PATH`
//! and `LM_STUDIO_MODEL_ID`), so a shell profile can pin them once.
//!
//! Dates, locale, and sender overrides arrive as strings, and the input
//! path and model id are optional at the clap level: all of them are
//! validated in `main`, so every bad or missing value reports through the
//! same configuration-error path and exit code.

use clap::Parser;

/// Summarize a WhatsApp chat export day by day with a local
/// OpenAI-compatible LLM endpoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "daybrief")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    daybrief chat.txt --model gemma-3-12b-it-qat
    daybrief chat.txt --model qwen2.5-7b --from 2024-01-01 --to 2024-01-31
    daybrief chat.txt --model m --base-url http://localhost:1234/v1 -o report.txt
    daybrief chat.txt --model m --sender Alice --sender Bob
    daybrief chat.txt --model m --locale eu-dot --max-chunk-chars 8000
    CHAT_FILE_PATH=chat.txt LM_STUDIO_MODEL_ID=m daybrief")]
pub struct Args {
    /// Path to the WhatsApp TXT export
    #[arg(env = "CHAT_FILE_PATH", value_name = "FILE")]
    pub input: Option<String>,

    /// Model identifier sent to the endpoint
    #[arg(short, long, env = "LM_STUDIO_MODEL_ID", value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[arg(long, default_value = "http://127.0.0.1:8000/v1", value_name = "URL")]
    pub base_url: String,

    /// First day to summarize (YYYY-MM-DD, default: earliest in file)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Last day to summarize (YYYY-MM-DD, default: latest in file)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Character budget per summarization window
    #[arg(long, default_value_t = 10_000, value_name = "CHARS")]
    pub max_chunk_chars: usize,

    /// Messages repeated between consecutive windows
    #[arg(long, default_value_t = 2, value_name = "COUNT")]
    pub overlap_messages: usize,

    /// Primary sender for prompt attribution (repeat for the second;
    /// default: the two most frequent senders in the file)
    #[arg(long, value_name = "NAME")]
    pub sender: Vec<String>,

    /// Report file path (the report is always echoed to stdout too)
    #[arg(short, long, default_value = "daybrief_report.txt", value_name = "FILE")]
    pub output: String,

    /// Timestamp format of the export (us, eu-dot, eu-dot-bracketed,
    /// eu-slash, eu-slash-bracketed; default: auto-detect)
    #[arg(long, value_name = "FORMAT")]
    pub locale: Option<String>,

    /// Keep WhatsApp system messages (encryption notice, joins, etc.)
    #[arg(long)]
    pub keep_system_messages: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 240, value_name = "SECS")]
    pub timeout: u64,
}
