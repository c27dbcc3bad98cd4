//! Edit-distance spelling correction.
//!
//! Each whitespace-separated word whose cleaned form is unknown is compared
//! against every dictionary word of similar length. The nearest word within
//! [`MAX_EDIT_DISTANCE`] replaces it. Equal distances resolve alphabetically
//! so results do not depend on hash iteration order.
//!
//! The whole surface word is replaced, so punctuation attached to a corrected
//! word is dropped. Output words are joined with single spaces.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::dictionary::Dictionary;
use crate::distance::levenshtein_within;
use crate::text::{char_len, clean_word};

/// Words made only of decimal digits, in any script.
static DECIMAL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Largest edit distance considered a plausible correction.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Candidates kept per word.
pub const MAX_CANDIDATES: usize = 5;

/// Cleaned words shorter than this are never corrected.
const MIN_CORRECTABLE_LEN: usize = 3;

/// A dictionary word near a misspelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    /// The dictionary word.
    pub word: String,
    /// Its edit distance from the misspelling.
    pub distance: usize,
}

/// One replacement made by [`Corrector::correct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Correction {
    /// The word as it appeared in the input.
    pub original: String,
    /// The word written to the output.
    pub replacement: String,
    /// Edit distance between the cleaned original and the replacement.
    pub distance: usize,
}

/// Output of spelling correction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CorrectionResult {
    /// The input with corrections applied.
    pub corrected_text: String,
    /// Corrected words over eligible words; 0 when nothing was eligible.
    pub improvement_score: f64,
    /// Words that were candidates for correction.
    pub eligible_count: usize,
    /// Replacements in input order.
    pub corrections: Vec<Correction>,
}

/// Spelling corrector over a dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Corrector<'a> {
    dictionary: &'a Dictionary,
    max_distance: usize,
}

impl<'a> Corrector<'a> {
    /// Correct against `dictionary` with the default distance bound.
    pub const fn new(dictionary: &'a Dictionary) -> Self {
        Self {
            dictionary,
            max_distance: MAX_EDIT_DISTANCE,
        }
    }

    /// Override the maximum edit distance.
    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Whether a surface word would be considered for correction.
    pub fn is_correctable(&self, word: &str) -> bool {
        self.is_eligible(&clean_word(word))
    }

    fn is_eligible(&self, cleaned: &str) -> bool {
        char_len(cleaned) >= MIN_CORRECTABLE_LEN
            && !DECIMAL_DIGITS.is_match(cleaned)
            && !self.dictionary.contains(cleaned)
    }

    /// Up to [`MAX_CANDIDATES`] dictionary words within the distance bound,
    /// nearest first, ties alphabetical.
    pub fn suggest(&self, word: &str) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self
            .dictionary
            .iter()
            .filter_map(|entry| {
                levenshtein_within(word, entry, self.max_distance).map(|distance| Candidate {
                    word: entry.to_string(),
                    distance,
                })
            })
            .collect();

        candidates.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.word.cmp(&b.word)));
        candidates.truncate(MAX_CANDIDATES);
        candidates
    }

    /// Correct every eligible word in `text`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn correct(&self, text: &str) -> CorrectionResult {
        let mut output = Vec::new();
        let mut corrections = Vec::new();
        let mut eligible_count = 0usize;

        for word in text.split_whitespace() {
            let cleaned = clean_word(word);
            if !self.is_eligible(&cleaned) {
                output.push(word.to_string());
                continue;
            }
            eligible_count += 1;

            let Some(best) = self.suggest(&cleaned).into_iter().next() else {
                output.push(word.to_string());
                continue;
            };

            let replacement = if word.chars().next().is_some_and(char::is_uppercase) {
                capitalize(&best.word)
            } else {
                best.word
            };
            if replacement != word {
                tracing::trace!(original = word, %replacement, distance = best.distance, "corrected");
                corrections.push(Correction {
                    original: word.to_string(),
                    replacement: replacement.clone(),
                    distance: best.distance,
                });
            }
            output.push(replacement);
        }

        let improvement_score = if eligible_count > 0 {
            corrections.len() as f64 / eligible_count as f64
        } else {
            0.0
        };

        tracing::debug!(
            eligible = eligible_count,
            corrected = corrections.len(),
            "spelling correction finished"
        );

        CorrectionResult {
            corrected_text: output.join(" "),
            improvement_score,
            eligible_count,
            corrections,
        }
    }
}

/// Upper-case the first character.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_words([
            "the", "quick", "brown", "fox", "jumped", "over", "lazy", "dog", "hello", "world",
            "cat", "bat", "hat",
        ])
    }

    #[test]
    fn empty_text() {
        let d = dict();
        let result = Corrector::new(&d).correct("");
        assert_eq!(result.corrected_text, "");
        assert!(result.improvement_score.abs() < f64::EPSILON);
        assert_eq!(result.eligible_count, 0);
    }

    #[test]
    fn known_words_unchanged() {
        let d = dict();
        let result = Corrector::new(&d).correct("the quick brown fox");
        assert_eq!(result.corrected_text, "the quick brown fox");
        assert_eq!(result.eligible_count, 0);
        assert!(result.corrections.is_empty());
        assert!(result.improvement_score.abs() < f64::EPSILON);
    }

    #[test]
    fn corrects_within_distance() {
        let d = dict();
        let result = Corrector::new(&d).correct("the qiuck brwn fox jumpped");
        assert_eq!(result.corrected_text, "the quick brown fox jumped");
        assert_eq!(result.eligible_count, 3);
        assert_eq!(result.corrections.len(), 3);
        assert!((result.improvement_score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn leaves_distant_words() {
        let d = dict();
        let result = Corrector::new(&d).correct("hello xylophone");
        assert_eq!(result.corrected_text, "hello xylophone");
        assert_eq!(result.eligible_count, 1);
        assert!(result.improvement_score.abs() < f64::EPSILON);
    }

    #[test]
    fn partial_improvement_ratio() {
        let d = dict();
        let result = Corrector::new(&d).correct("wrld xylophone");
        assert_eq!(result.corrected_text, "world xylophone");
        assert!((result.improvement_score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn preserves_leading_capital() {
        let d = dict();
        let result = Corrector::new(&d).correct("Helo wrld");
        assert_eq!(result.corrected_text, "Hello world");
    }

    #[test]
    fn replaces_whole_surface_form() {
        let d = dict();
        let result = Corrector::new(&d).correct("Helo, wrld!");
        assert_eq!(result.corrected_text, "Hello world");
        assert_eq!(result.corrections[0].original, "Helo,");
    }

    #[test]
    fn punctuated_known_words_kept_verbatim() {
        let d = dict();
        let result = Corrector::new(&d).correct("Hello,   world!");
        assert_eq!(result.corrected_text, "Hello, world!");
        assert_eq!(result.eligible_count, 0);
    }

    #[test]
    fn skips_short_and_numeric_words() {
        let d = dict();
        let c = Corrector::new(&d);
        assert!(!c.is_correctable("ab"));
        assert!(!c.is_correctable("12345"));
        assert!(!c.is_correctable("Hello!"));
        assert!(c.is_correctable("Helo"));
        assert!(c.is_correctable("h3llo"));
    }

    #[test]
    fn only_decimal_digits_count_as_numeric() {
        let d = dict();
        let c = Corrector::new(&d);
        assert!(!c.is_correctable("٣٤٥"));
        assert!(!c.is_correctable("１２３"));
        assert!(c.is_correctable("½½½"));
        assert!(c.is_correctable("ⅫⅫⅫ"));
    }

    #[test]
    fn ties_break_alphabetically() {
        let d = dict();
        // "zat" is one substitution from bat, cat, and hat.
        let candidates = Corrector::new(&d).suggest("zat");
        let words: Vec<&str> = candidates.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(&words[..3], &["bat", "cat", "hat"]);
        assert!(candidates.iter().all(|c| c.distance <= MAX_EDIT_DISTANCE));

        let result = Corrector::new(&d).correct("zat");
        assert_eq!(result.corrected_text, "bat");
    }

    #[test]
    fn suggestions_sorted_and_capped() {
        let d = dict();
        let candidates = Corrector::new(&d).suggest("zat");
        assert!(candidates.len() <= MAX_CANDIDATES);
        assert!(candidates.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn misspelling_without_target_left_alone() {
        let d = Dictionary::from_words(["the", "quick"]);
        let result = Corrector::new(&d).correct("jumpped");
        assert_eq!(result.corrected_text, "jumpped");
        assert_eq!(result.eligible_count, 1);
    }

    #[test]
    fn zero_distance_bound_never_corrects() {
        let d = dict();
        let result = Corrector::new(&d).with_max_distance(0).correct("wrld");
        assert_eq!(result.corrected_text, "wrld");
    }

    #[test]
    fn collapses_whitespace() {
        let d = dict();
        let result = Corrector::new(&d).correct("  the\n\tfox  ");
        assert_eq!(result.corrected_text, "the fox");
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("word"), "Word");
    }
}
