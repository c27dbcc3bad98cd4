//! Dictionary command: size, sample, and source of the loaded word list.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use ocr_gate_core::{DictionaryInfo, DictionarySource, Engine};

/// Arguments for the `dictionary` subcommand.
#[derive(Args, Debug)]
pub struct DictionaryArgs {
    /// Number of sample words to show.
    #[arg(long, default_value_t = 20)]
    pub sample: usize,
}

#[derive(Serialize)]
struct DictionaryReport<'a> {
    source: &'a DictionarySource,
    #[serde(flatten)]
    info: DictionaryInfo,
}

/// Print dictionary information.
#[instrument(name = "cmd_dictionary", skip_all, fields(sample = args.sample))]
pub fn cmd_dictionary(
    args: DictionaryArgs,
    global_json: bool,
    engine: &Engine,
) -> anyhow::Result<()> {
    debug!(sample = args.sample, "executing dictionary command");

    let report = DictionaryReport {
        source: engine.dictionary_source(),
        info: engine.dictionary_info(args.sample),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let source = report.source.to_string();
    if report.source.is_fallback() {
        println!("{}: {}", "Source".dimmed(), source.yellow());
    } else {
        println!("{}: {}", "Source".dimmed(), source.cyan());
    }
    println!("{}: {}", "Words".dimmed(), report.info.total_words);
    println!(
        "{}: {:.2}",
        "Average length".dimmed(),
        report.info.avg_word_length
    );
    if !report.info.sample_words.is_empty() {
        println!(
            "{}: {}",
            "Sample".dimmed(),
            report.info.sample_words.join(", ")
        );
    }

    Ok(())
}
