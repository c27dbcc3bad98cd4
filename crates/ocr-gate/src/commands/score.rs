//! Score command: dictionary-based confidence metrics.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use ocr_gate_core::Engine;

use super::read_input_file;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to score (`-` for stdin).
    pub file: Utf8PathBuf,
}

/// Print the confidence metrics for a file.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    engine: &Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing score command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let metrics = engine.score(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!(
        "{} {:.3}",
        "Confidence:".bold(),
        metrics.overall_confidence
    );
    println!(
        "  {}: {}/{} ({:.3})",
        "Valid words".dimmed(),
        metrics.valid_word_count,
        metrics.total_word_count,
        metrics.word_confidence
    );
    println!(
        "  {}: {:.3}",
        "Sequence".dimmed(),
        metrics.sequence_confidence
    );
    println!("  {}: {:.3}", "Length".dimmed(), metrics.length_confidence);
    println!(
        "  {}: {:.3}",
        "Capitalization".dimmed(),
        metrics.capitalization_confidence
    );

    Ok(())
}
