//! Corpus command: list stored training texts.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use ocr_gate_core::{CorpusLoad, Engine};

/// Arguments for the `corpus` subcommand.
#[derive(Args, Debug, Default)]
pub struct CorpusArgs {
    /// Print only the number of stored texts.
    #[arg(long)]
    pub count: bool,
}

#[derive(Serialize)]
struct CorpusListing<'a> {
    path: &'a str,
    opened: &'a CorpusLoad,
    training_texts: Vec<String>,
}

/// Print the corpus contents.
#[instrument(name = "cmd_corpus", skip_all)]
pub fn cmd_corpus(args: CorpusArgs, global_json: bool, engine: &Engine) -> anyhow::Result<()> {
    debug!(count_only = args.count, "executing corpus command");

    let corpus = engine.corpus();
    let texts = corpus.texts();

    if global_json {
        let listing = CorpusListing {
            path: corpus.path().as_str(),
            opened: corpus.opened(),
            training_texts: texts,
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if args.count {
        println!("{}", texts.len());
        return Ok(());
    }

    println!("{}: {}", "Corpus".dimmed(), corpus.path().cyan());
    if let CorpusLoad::Corrupt { ref error } = *corpus.opened() {
        println!("{} {error}", "warning: unreadable corpus treated as empty:".yellow());
    }
    println!("{}: {}", "Texts".dimmed(), texts.len());
    for (i, text) in texts.iter().enumerate() {
        println!();
        println!("{}", format!("[{}]", i + 1).bold());
        println!("{text}");
    }

    Ok(())
}
