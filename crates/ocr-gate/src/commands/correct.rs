//! Correct command: edit-distance spelling repair.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use ocr_gate_core::Engine;

use super::read_input_file;

/// Arguments for the `correct` subcommand.
#[derive(Args, Debug)]
pub struct CorrectArgs {
    /// File to correct (`-` for stdin).
    pub file: Utf8PathBuf,

    /// List each replacement on stderr.
    #[arg(long)]
    pub show_changes: bool,
}

/// Print the corrected text of a file.
#[instrument(name = "cmd_correct", skip_all, fields(file = %args.file))]
pub fn cmd_correct(
    args: CorrectArgs,
    global_json: bool,
    engine: &Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, show_changes = args.show_changes, "executing correct command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let result = engine.correct(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.corrected_text);

    if args.show_changes {
        for correction in &result.corrections {
            eprintln!(
                "  {} {} {}",
                correction.original.red(),
                "->".dimmed(),
                correction.replacement.green()
            );
        }
        eprintln!(
            "{} {}/{} eligible words corrected",
            "Corrections:".bold(),
            result.corrections.len(),
            result.eligible_count
        );
    }

    Ok(())
}
