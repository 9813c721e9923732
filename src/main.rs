//! # daybrief CLI
//!
//! Command-line interface for the daybrief library.
//!
//! Exit codes:
//! - 0: at least one day was summarized
//! - 1: configuration, parse, or empty-range error
//! - 2: every day in range failed to summarize

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use daybrief::cli::Args;
use daybrief::config::{ChunkConfig, LlmConfig, ParserConfig};
use daybrief::core::{
    Orchestrator, detect_primary_senders, group_by_day, parse_range_date, render_report,
    restrict_to_range, write_report,
};
use daybrief::llm::{LlmClient, PromptBuilder};
use daybrief::parser::{DateFormat, TranscriptParser};
use daybrief::{DaybriefError, Result};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("❌ Error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    // Input and model are optional at the clap level so a missing value
    // reports as a configuration error with exit code 1
    let input = args.input.clone().ok_or_else(|| {
        DaybriefError::config("no input file given (pass a path or set CHAT_FILE_PATH)")
    })?;
    let model = args.model.clone().ok_or_else(|| {
        DaybriefError::config("model id is not set (use --model or LM_STUDIO_MODEL_ID)")
    })?;

    println!("📋 daybrief v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:    {input}");
    println!("🤖 Model:    {model}");
    println!("🔗 Endpoint: {}", args.base_url);

    let locale = parse_locale(args.locale.as_deref())?;
    if let Some(forced) = locale {
        println!("🌍 Locale:   {forced}");
    }

    // Step 1: Parse the transcript
    println!();
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let parser_config =
        ParserConfig::new().with_skip_system_messages(!args.keep_system_messages);
    let mut parser = TranscriptParser::with_config(parser_config);
    if let Some(forced) = locale {
        parser = parser.with_locale(forced);
    }
    let messages = parser.parse(Path::new(&input))?;
    println!(
        "   Found {} messages ({:.2}s)",
        messages.len(),
        parse_start.elapsed().as_secs_f64()
    );

    // Step 2: Resolve primary senders for prompt attribution
    let senders = resolve_senders(&args.sender, &messages)?;
    println!("👥 Senders:  {}", senders.join(", "));

    // Step 3: Group by day and restrict to the requested range
    let days = group_by_day(messages);
    let (start, end) = resolve_range(&args, &days)?;
    let days = restrict_to_range(days, start, end);
    if days.is_empty() {
        return Err(DaybriefError::empty_range(start, end));
    }
    println!("📅 Range:    {start} to {end} ({} days with messages)", days.len());

    // Step 4: Summarize each day
    let chunking = ChunkConfig::new()
        .with_max_chunk_chars(args.max_chunk_chars)
        .with_overlap_messages(args.overlap_messages);
    let llm_config = LlmConfig::new(&model)
        .with_base_url(&args.base_url)
        .with_timeout_secs(args.timeout);
    let client = LlmClient::new(llm_config)?;
    let prompts = PromptBuilder::new(&senders[0], &senders[1]);
    let orchestrator = Orchestrator::new(&client, prompts, chunking).with_progress(true);

    let summaries = orchestrator.summarize_range(&days);
    let done = summaries.iter().filter(|s| s.is_done()).count();
    let failed = summaries.len() - done;

    // Step 5: Render the report
    let report = render_report(&summaries, start, end, &senders);
    println!();
    println!("{report}");

    write_report(&summaries, start, end, &senders, Path::new(&args.output))?;
    println!("💾 Report saved to {}", args.output);

    println!();
    println!("📊 Summary:");
    println!("   Summarized: {done} days");
    if failed > 0 {
        println!("   Failed:     {failed} days");
    }
    println!("   Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(if done == 0 { 2 } else { 0 })
}

/// Validates the `--locale` flag against the known format names.
fn parse_locale(locale: Option<&str>) -> Result<Option<DateFormat>> {
    match locale {
        None => Ok(None),
        Some(name) => name
            .parse::<DateFormat>()
            .map(Some)
            .map_err(DaybriefError::config),
    }
}

/// Resolves the two primary senders: explicit `--sender` flags first,
/// frequency detection fills the rest.
fn resolve_senders(
    overrides: &[String],
    messages: &[daybrief::Message],
) -> Result<Vec<String>> {
    if overrides.len() > 2 {
        return Err(DaybriefError::config(
            "at most two --sender overrides are supported",
        ));
    }

    let mut senders = overrides.to_vec();
    for detected in detect_primary_senders(messages, 2) {
        if senders.len() == 2 {
            break;
        }
        if !senders.contains(&detected) {
            senders.push(detected);
        }
    }
    Ok(senders)
}

/// Resolves the summarization range from `--from`/`--to`, defaulting to
/// the transcript's span.
fn resolve_range(
    args: &Args,
    days: &std::collections::BTreeMap<chrono::NaiveDate, daybrief::core::DailyLog>,
) -> Result<(chrono::NaiveDate, chrono::NaiveDate)> {
    let (earliest, latest) = match (days.keys().next(), days.keys().last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(DaybriefError::config(
                "no messages found in the transcript",
            ));
        }
    };

    let start = match &args.from {
        Some(s) => parse_range_date(s)?,
        None => earliest,
    };
    let end = match &args.to {
        Some(s) => parse_range_date(s)?,
        None => latest,
    };

    if start > end {
        return Err(DaybriefError::empty_range(start, end));
    }
    Ok((start, end))
}
