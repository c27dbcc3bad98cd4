//! Text processing utilities.
//!
//! Provides word extraction, word cleaning, sentence splitting, and line
//! splitting for the scorer, the corrector, and the evaluator.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for runs of sentence terminators.
static SENTENCE_TERMINATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Returns `true` for characters that belong to a word: letters, digits, and `_`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Length of a string in characters rather than bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Extract normalized tokens from raw text.
///
/// Every character that is not a word character, whitespace, or `-` becomes
/// a space. The result is lower-cased, split on whitespace, and tokens of a
/// single character are dropped. Order follows the input.
pub fn extract_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if is_word_char(c) || c.is_whitespace() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| char_len(w) > 1)
        .map(str::to_string)
        .collect()
}

/// Lower-case a surface word and drop everything that is not a word character.
///
/// `"Hello,"` becomes `"hello"`; `"don't"` becomes `"dont"`.
pub fn clean_word(word: &str) -> String {
    word.to_lowercase().chars().filter(|&c| is_word_char(c)).collect()
}

/// Split text into sentences on runs of `.`, `!`, and `?`.
///
/// Fragments are trimmed; fragments of one character or less are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_TERMINATORS
        .split(text)
        .map(str::trim)
        .filter(|s| char_len(s) > 1)
        .collect()
}

/// Trimmed, non-empty lines of `text`.
pub fn nonblank_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
