//! Train command: offer text to the training corpus.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use ocr_gate_core::{Admission, Engine, Persistence};

use super::read_input_file;

/// Arguments for the `train` subcommand.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Files to add (`-` for stdin).
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Minimum confidence for acceptance (overrides config).
    #[arg(long, value_parser = parse_threshold)]
    pub min_confidence: Option<f64>,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value = s.parse::<f64>().map_err(|e| e.to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("expected a finite number, got {s}"))
    }
}

#[derive(Serialize)]
struct FileAdmission {
    file: Utf8PathBuf,
    #[serde(flatten)]
    admission: Admission,
}

/// Add each file to the corpus when it scores high enough.
///
/// Rejected text is not an error. Failing to write the corpus is, and so
/// is an unreadable file; files added before it are still reported.
#[instrument(name = "cmd_train", skip_all, fields(files = args.files.len()))]
pub fn cmd_train(
    args: TrainArgs,
    global_json: bool,
    engine: &mut Engine,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let threshold = args.min_confidence.unwrap_or_else(|| engine.min_confidence());
    debug!(files = args.files.len(), threshold, "executing train command");

    let mut results = Vec::with_capacity(args.files.len());
    let mut read_error = None;
    for file in &args.files {
        let content = match read_input_file(file, max_input_bytes) {
            Ok(content) => content,
            Err(e) => {
                read_error = Some(e);
                break;
            }
        };
        let admission = engine.add_training_text(&content, Some(threshold));
        results.push(FileAdmission {
            file: file.clone(),
            admission,
        });
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print_admission(result, threshold);
        }
    }

    if let Some(e) = read_error {
        return Err(e);
    }

    let failure = results
        .iter()
        .find_map(|r| match r.admission.persistence {
            Persistence::Failed { ref reason } => Some(reason.as_str()),
            _ => None,
        });
    if let Some(reason) = failure {
        bail!(
            "failed to save training corpus at {}: {reason}",
            engine.corpus().path()
        );
    }

    Ok(())
}

fn print_admission(result: &FileAdmission, threshold: f64) {
    let admission = &result.admission;
    let confidence = admission.report.overall_confidence;
    if admission.accepted {
        let total = match admission.persistence {
            Persistence::Written { total } => total.to_string(),
            _ => "?".to_string(),
        };
        println!(
            "{} {} ({confidence:.3}, corpus now holds {total})",
            "ADDED:".green(),
            result.file
        );
    } else {
        println!(
            "{} {} ({confidence:.3} < {threshold:.3})",
            "SKIPPED:".yellow(),
            result.file
        );
    }
}
