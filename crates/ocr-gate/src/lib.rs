//! Library interface for the `ocr-gate` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                  Log filter (e.g., debug, ocr_gate_core=trace)
    OCR_GATE_LOG_PATH         Explicit log file path
    OCR_GATE_LOG_DIR          Log directory
    OCR_GATE_SAVE_DIR         Directory for word_list.txt and the corpus
    OCR_GATE_MIN_CONFIDENCE   Corpus acceptance threshold
";

/// Command-line interface definition for ocr-gate.
#[derive(Parser)]
#[command(name = "ocr-gate")]
#[command(about = "Confidence scoring, spelling repair, and training-corpus gating for OCR text", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Score OCR text against the dictionary
    Score(commands::score::ScoreArgs),

    /// Repair likely misspellings
    Correct(commands::correct::CorrectArgs),

    /// Run the full evaluation and gate on quality
    Evaluate(commands::evaluate::EvaluateArgs),

    /// Offer text to the training corpus
    Train(commands::train::TrainArgs),

    /// List texts stored in the training corpus
    Corpus(commands::corpus::CorpusArgs),

    /// Show the loaded dictionary
    Dictionary(commands::dictionary::DictionaryArgs),

    /// Print the JSON Schema of `evaluate --json` output
    Schema(commands::schema::SchemaArgs),

    /// Show package information
    Info(commands::info::InfoArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
