//! Comprehensive evaluation of OCR output.
//!
//! Runs the scorer and the corrector on the same input, adds a structural
//! signal from line lengths, and folds everything into one confidence value,
//! a [`Quality`] tier, and a keep/discard decision.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::correction::{Correction, Corrector};
use crate::dictionary::Dictionary;
use crate::scoring::{self, ValidationMetrics, round3};
use crate::text;
use crate::validator::Validator;

const METRICS_WEIGHT: f64 = 0.6;
const IMPROVEMENT_WEIGHT: f64 = 0.2;
const STRUCTURE_WEIGHT: f64 = 0.2;

/// Mean line length that earns a full structure score.
const FULL_STRUCTURE_LINE_CHARS: f64 = 60.0;

/// Minimum final confidence for `should_keep`.
pub const KEEP_THRESHOLD: f64 = 0.3;

/// Discrete quality tier, ordered from worst to best.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Quality {
    /// Below 0.4.
    Poor,
    /// 0.4 up to 0.6.
    Low,
    /// 0.6 up to 0.8.
    Medium,
    /// 0.8 and above.
    High,
}

impl Quality {
    /// Tier for a final confidence value.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Medium
        } else if confidence >= 0.4 {
            Self::Low
        } else {
            Self::Poor
        }
    }

    /// Upper-case tier name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "POOR",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything known about one piece of OCR text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationReport {
    /// The input, unchanged.
    pub original_text: String,
    /// The input after spelling correction.
    pub corrected_text: String,
    /// Tier derived from `overall_confidence`.
    pub quality: Quality,
    /// Final confidence, rounded to three decimals.
    pub overall_confidence: f64,
    /// Dictionary-based metrics for the original text.
    pub validation_metrics: ValidationMetrics,
    /// Share of eligible words the corrector changed.
    pub improvement_score: f64,
    /// Mean non-blank line length over 60, capped at 1.
    pub structure_score: f64,
    /// Non-blank lines.
    pub line_count: usize,
    /// Tokens scored.
    pub word_count: usize,
    /// Whether the text clears [`KEEP_THRESHOLD`].
    pub should_keep: bool,
    /// Replacements the corrector made.
    pub corrections: Vec<Correction>,
}

/// Line-length structure signal: `(score, non-blank line count)`.
pub fn structure_score(text: &str) -> (f64, usize) {
    let lines = text::nonblank_lines(text);
    if lines.is_empty() {
        return (0.0, 0);
    }
    let total: usize = lines.iter().map(|line| text::char_len(line)).sum();
    let mean = total as f64 / lines.len() as f64;
    ((mean / FULL_STRUCTURE_LINE_CHARS).min(1.0), lines.len())
}

/// Scorer and corrector bound to one dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    validator: Validator<'a>,
    corrector: Corrector<'a>,
}

impl<'a> Evaluator<'a> {
    /// Evaluate against `dictionary`.
    pub const fn new(dictionary: &'a Dictionary) -> Self {
        Self {
            validator: Validator::new(dictionary),
            corrector: Corrector::new(dictionary),
        }
    }

    /// Produce the full report for `text`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn evaluate(&self, text: &str) -> EvaluationReport {
        let metrics = scoring::score(&self.validator, text);
        let correction = self.corrector.correct(text);
        let (structure, line_count) = structure_score(text);

        let confidence = round3(METRICS_WEIGHT.mul_add(
            metrics.overall_confidence,
            IMPROVEMENT_WEIGHT.mul_add(correction.improvement_score, STRUCTURE_WEIGHT * structure),
        ));
        let quality = Quality::from_confidence(confidence);

        tracing::debug!(
            confidence,
            quality = quality.as_str(),
            corrections = correction.corrections.len(),
            "evaluated text"
        );

        EvaluationReport {
            original_text: text.to_string(),
            corrected_text: correction.corrected_text,
            quality,
            overall_confidence: confidence,
            validation_metrics: metrics,
            improvement_score: round3(correction.improvement_score),
            structure_score: round3(structure),
            line_count,
            word_count: metrics.total_word_count,
            should_keep: confidence >= KEEP_THRESHOLD,
            corrections: correction.corrections,
        }
    }
}
