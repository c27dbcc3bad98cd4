//! Evaluate command: full report, quality tier, and keep decision.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use ocr_gate_core::{Engine, EvaluationReport, Quality};

use super::read_input_file;

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Files to evaluate (`-` for stdin).
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Fail when any file rates below this tier.
    #[arg(long, value_enum)]
    pub min_quality: Option<Quality>,
}

/// Evaluation of one input file.
#[derive(Debug, Serialize, JsonSchema)]
pub struct FileReport {
    #[schemars(with = "String")]
    pub file: Utf8PathBuf,
    #[serde(flatten)]
    pub report: EvaluationReport,
}

/// What `evaluate --json` prints: one object for a single file, an array
/// otherwise.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum EvaluateOutput {
    Single(FileReport),
    Multiple(Vec<FileReport>),
}

impl EvaluateOutput {
    fn new(mut results: Vec<FileReport>) -> Self {
        if results.len() == 1 {
            Self::Single(results.remove(0))
        } else {
            Self::Multiple(results)
        }
    }
}

impl FileReport {
    fn passes(&self, min_quality: Option<Quality>) -> bool {
        self.report.should_keep && min_quality.is_none_or(|min| self.report.quality >= min)
    }
}

/// Evaluate each file and fail if any should be discarded.
#[instrument(name = "cmd_evaluate", skip_all, fields(files = args.files.len()))]
pub fn cmd_evaluate(
    args: EvaluateArgs,
    global_json: bool,
    engine: &Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(files = args.files.len(), min_quality = ?args.min_quality, "executing evaluate command");

    let progress = (!global_json && args.files.len() > 1).then(|| {
        let bar = ProgressBar::new(args.files.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    });

    let mut results = Vec::with_capacity(args.files.len());
    for file in &args.files {
        if let Some(ref bar) = progress {
            bar.set_message(file.to_string());
        }
        let content = read_input_file(file, max_input_bytes)?;
        results.push(FileReport {
            file: file.clone(),
            report: engine.evaluate(&content),
        });
        if let Some(ref bar) = progress {
            bar.inc(1);
        }
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let total = results.len();
    let mut failing = 0;
    for result in results.iter().filter(|r| !r.passes(args.min_quality)) {
        warn!(file = %result.file, quality = %result.report.quality, "text failed quality gate");
        failing += 1;
    }

    if global_json {
        let output = EvaluateOutput::new(results);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for result in &results {
            print_report(result, args.min_quality);
        }
    }

    if failing > 0 {
        bail!("{failing} of {total} file(s) failed the quality gate");
    }

    Ok(())
}

fn print_report(result: &FileReport, min_quality: Option<Quality>) {
    let report = &result.report;
    let status = if result.passes(min_quality) {
        "PASS:".green().to_string()
    } else {
        "FAIL:".red().to_string()
    };
    let tier = match report.quality {
        Quality::High => report.quality.green().to_string(),
        Quality::Medium => report.quality.cyan().to_string(),
        Quality::Low => report.quality.yellow().to_string(),
        Quality::Poor => report.quality.red().to_string(),
    };

    println!(
        "{status} {} {tier} ({:.3})",
        result.file, report.overall_confidence
    );
    println!(
        "  {}: {:.3}  {}: {:.3}  {}: {:.3}",
        "Metrics".dimmed(),
        report.validation_metrics.overall_confidence,
        "Improvement".dimmed(),
        report.improvement_score,
        "Structure".dimmed(),
        report.structure_score,
    );
    println!(
        "  {}: {}  {}: {}  {}: {}",
        "Words".dimmed(),
        report.word_count,
        "Lines".dimmed(),
        report.line_count,
        "Corrections".dimmed(),
        report.corrections.len(),
    );
}
