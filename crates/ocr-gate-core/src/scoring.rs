//! Dictionary-based confidence scoring.
//!
//! Combines four independent signals into one confidence value:
//!
//! | signal         | weight | measures                                       |
//! |----------------|--------|------------------------------------------------|
//! | word           | 0.5    | share of tokens that validate                  |
//! | sequence       | 0.3    | mean run of consecutive valid tokens, over 5   |
//! | length         | 0.1    | mean token length near 4–8 characters          |
//! | capitalization | 0.1    | share of sentences starting with a capital     |

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;
use crate::validator::Validator;

const WORD_WEIGHT: f64 = 0.5;
const SEQUENCE_WEIGHT: f64 = 0.3;
const LENGTH_WEIGHT: f64 = 0.1;
const CAPITALIZATION_WEIGHT: f64 = 0.1;

/// Run length at which the sequence signal saturates.
const FULL_CONFIDENCE_RUN: f64 = 5.0;

/// Texts with fewer tokens get a fixed length score.
const MIN_LENGTH_TOKENS: usize = 3;
const SHORT_TEXT_LENGTH_SCORE: f64 = 0.2;

/// Capitalization score when no sentence can be judged.
const NEUTRAL_CAPITALIZATION: f64 = 0.5;

/// Trimmed texts shorter than this score zero across the board.
const MIN_TEXT_CHARS: usize = 3;

/// Round to three decimal places, the precision used in every report.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Per-signal confidence for a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationMetrics {
    /// Weighted combination of the four signals.
    pub overall_confidence: f64,
    /// Share of tokens that validate.
    pub word_confidence: f64,
    /// Mean valid-run length, normalized.
    pub sequence_confidence: f64,
    /// Token length distribution score.
    pub length_confidence: f64,
    /// Sentence capitalization score.
    pub capitalization_confidence: f64,
    /// Tokens that validate.
    pub valid_word_count: usize,
    /// Tokens extracted.
    pub total_word_count: usize,
    /// Same as `word_confidence`.
    pub valid_word_ratio: f64,
}

impl ValidationMetrics {
    /// All-zero metrics for empty or unscorable text.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Score `text` against the validator's dictionary.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn score(validator: &Validator<'_>, text: &str) -> ValidationMetrics {
    if text::char_len(text.trim()) < MIN_TEXT_CHARS {
        return ValidationMetrics::empty();
    }

    let words = text::extract_words(text);
    if words.is_empty() {
        return ValidationMetrics::empty();
    }

    let validity: Vec<bool> = words.iter().map(|w| validator.is_valid(w)).collect();
    let valid_word_count = validity.iter().filter(|&&valid| valid).count();

    let word = valid_word_count as f64 / words.len() as f64;
    let sequence = sequence_confidence(&validity);
    let length = length_confidence(&words);
    let capitalization = capitalization_confidence(text);

    let overall = WORD_WEIGHT.mul_add(
        word,
        SEQUENCE_WEIGHT.mul_add(
            sequence,
            LENGTH_WEIGHT.mul_add(length, CAPITALIZATION_WEIGHT * capitalization),
        ),
    );

    tracing::debug!(
        tokens = words.len(),
        valid = valid_word_count,
        overall,
        "scored text"
    );

    ValidationMetrics {
        overall_confidence: round3(overall),
        word_confidence: round3(word),
        sequence_confidence: round3(sequence),
        length_confidence: round3(length),
        capitalization_confidence: round3(capitalization),
        valid_word_count,
        total_word_count: words.len(),
        valid_word_ratio: round3(word),
    }
}

/// Mean length of runs of consecutive valid tokens, over five, capped at 1.
fn sequence_confidence(validity: &[bool]) -> f64 {
    let mut runs = Vec::new();
    let mut current = 0usize;

    for &valid in validity {
        if valid {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }

    if runs.is_empty() {
        return 0.0;
    }

    let mean = runs.iter().sum::<usize>() as f64 / runs.len() as f64;
    (mean / FULL_CONFIDENCE_RUN).min(1.0)
}

fn length_confidence(words: &[String]) -> f64 {
    if words.len() < MIN_LENGTH_TOKENS {
        return SHORT_TEXT_LENGTH_SCORE;
    }

    let total: usize = words.iter().map(|w| text::char_len(w)).sum();
    let mean = total as f64 / words.len() as f64;

    if (4.0..=8.0).contains(&mean) {
        1.0
    } else {
        (1.0 - (mean - 6.0).abs() / 10.0).max(0.1)
    }
}

fn capitalization_confidence(text: &str) -> f64 {
    let sentences = text::split_sentences(text);
    if sentences.is_empty() {
        return NEUTRAL_CAPITALIZATION;
    }

    let capitalized = sentences
        .iter()
        .filter(|s| s.chars().next().is_some_and(char::is_uppercase))
        .count();
    capitalized as f64 / sentences.len() as f64
}
