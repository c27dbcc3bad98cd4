//! Reference vocabulary for OCR word validation.
//!
//! A [`Dictionary`] is a set of lowercase words (two characters or longer)
//! built once at start-up by a [`DictionaryLoader`]. The loader tries a list
//! of candidate word-list files in order and falls back to a small built-in
//! vocabulary when none can be used. Where the words came from is reported
//! as a [`DictionarySource`] so callers can tell a real word list from the
//! fallback.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text::char_len;

/// File name searched for in each candidate directory.
pub const WORD_LIST_FILE: &str = "word_list.txt";

/// Built-in vocabulary used when no word list can be loaded.
///
/// Entries shorter than two characters are dropped during normalization,
/// like any other dictionary entry.
pub const FALLBACK_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when", "make",
    "can", "like", "time", "no", "just", "him", "know", "take", "people", "into", "year", "your",
    "good", "some", "could", "them", "see", "other", "than", "then", "now", "look", "only",
    "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our", "work",
    "first", "well", "way", "even", "new", "want", "because", "any", "these", "give", "day",
    "most", "us",
];

/// Normalize a raw dictionary line: trim, lower-case, and reject entries
/// shorter than two characters.
fn normalize_entry(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    (char_len(&word) > 1).then_some(word)
}

/// An immutable set of known words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build a dictionary from arbitrary words, normalizing each one.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .filter_map(|w| normalize_entry(w.as_ref()))
                .collect(),
        }
    }

    /// Parse a newline-delimited word list.
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    /// The built-in fallback vocabulary.
    pub fn fallback() -> Self {
        Self::from_words(FALLBACK_WORDS)
    }

    /// Add more words, normalized the same way as loaded entries.
    #[must_use]
    pub fn with_extra_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().filter_map(|w| normalize_entry(w.as_ref())));
        self
    }

    /// Exact membership test. Callers lower-case `word` first.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the dictionary holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Summary statistics with up to `sample_size` words, sorted.
    pub fn info(&self, sample_size: usize) -> DictionaryInfo {
        let mut sorted: Vec<&str> = self.iter().collect();
        sorted.sort_unstable();
        let total_chars: usize = sorted.iter().map(|w| char_len(w)).sum();
        let avg_word_length = if sorted.is_empty() {
            0.0
        } else {
            total_chars as f64 / sorted.len() as f64
        };

        DictionaryInfo {
            total_words: sorted.len(),
            sample_words: sorted
                .into_iter()
                .take(sample_size)
                .map(str::to_string)
                .collect(),
            avg_word_length,
        }
    }
}

/// Summary of a loaded dictionary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DictionaryInfo {
    /// Number of distinct words.
    pub total_words: usize,
    /// Alphabetically first words of the dictionary.
    pub sample_words: Vec<String>,
    /// Mean word length in characters.
    pub avg_word_length: f64,
}

/// Why the built-in vocabulary was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No candidate word list exists.
    NotFound,
    /// A word list was read but holds no usable words.
    Empty {
        /// The file that was empty.
        #[schemars(with = "String")]
        path: Utf8PathBuf,
    },
    /// A word list exists but could not be read.
    Unreadable {
        /// The file that failed.
        #[schemars(with = "String")]
        path: Utf8PathBuf,
        /// The read error, rendered.
        error: String,
    },
}

/// Where a dictionary's words came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DictionarySource {
    /// Loaded from a word list file.
    WordList {
        /// The file that was loaded.
        #[schemars(with = "String")]
        path: Utf8PathBuf,
    },
    /// The built-in vocabulary.
    Fallback {
        /// Why no word list was used.
        reason: FallbackReason,
    },
}

impl DictionarySource {
    /// Whether the built-in vocabulary is in use.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl std::fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WordList { path } => write!(f, "{path}"),
            Self::Fallback {
                reason: FallbackReason::NotFound,
            } => f.write_str("built-in fallback (no word list found)"),
            Self::Fallback {
                reason: FallbackReason::Empty { path },
            } => write!(f, "built-in fallback ({path} has no usable words)"),
            Self::Fallback {
                reason: FallbackReason::Unreadable { path, error },
            } => write!(f, "built-in fallback ({path} unreadable: {error})"),
        }
    }
}

/// Builder that locates and loads the dictionary.
///
/// Candidates, first existing file wins:
/// 1. an explicit word list set with [`with_file`](Self::with_file)
/// 2. `<save_dir>/word_list.txt`
/// 3. `<dir>/word_list.txt` for each search directory, in order added
#[derive(Debug, Default, Clone)]
pub struct DictionaryLoader {
    explicit_file: Option<Utf8PathBuf>,
    save_dir: Option<Utf8PathBuf>,
    search_dirs: Vec<Utf8PathBuf>,
    extra_words: Vec<String>,
}

impl DictionaryLoader {
    /// Create a loader with no candidate locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this word list before any other candidate.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Look for `word_list.txt` in the save directory.
    pub fn with_save_dir<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.save_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Look for `word_list.txt` in `dir` after the save directory.
    pub fn with_search_dir<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_dirs.push(dir.as_ref().to_path_buf());
        self
    }

    /// Add the executable's directory, its parent, and the current directory.
    pub fn with_default_search_dirs(mut self) -> Self {
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            .and_then(|p| p.parent().map(Utf8Path::to_path_buf))
        {
            if let Some(parent) = exe_dir.parent() {
                let parent = parent.to_path_buf();
                self.search_dirs.push(exe_dir);
                self.search_dirs.push(parent);
            } else {
                self.search_dirs.push(exe_dir);
            }
        }
        if let Some(cwd) = std::env::current_dir()
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        {
            self.search_dirs.push(cwd);
        }
        self
    }

    /// Merge these words into whatever vocabulary gets loaded.
    pub fn with_extra_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Candidate word list paths in search order.
    pub fn candidates(&self) -> Vec<Utf8PathBuf> {
        self.explicit_file
            .iter()
            .cloned()
            .chain(self.save_dir.iter().map(|d| d.join(WORD_LIST_FILE)))
            .chain(self.search_dirs.iter().map(|d| d.join(WORD_LIST_FILE)))
            .collect()
    }

    /// Load the dictionary. Never fails: problems degrade to the fallback
    /// vocabulary and are recorded in the returned [`DictionarySource`].
    #[tracing::instrument(skip(self), fields(extra_words = self.extra_words.len()))]
    pub fn load(&self) -> (Dictionary, DictionarySource) {
        let found = self.candidates().into_iter().find(|p| p.is_file());

        let (dictionary, source) = match found {
            Some(path) => match std::fs::read_to_string(path.as_std_path()) {
                Ok(content) => {
                    let dictionary = Dictionary::parse(&content);
                    if dictionary.is_empty() {
                        tracing::warn!(%path, "word list contains no usable words, using fallback");
                        let reason = FallbackReason::Empty { path };
                        (Dictionary::fallback(), DictionarySource::Fallback { reason })
                    } else {
                        tracing::info!(%path, words = dictionary.len(), "loaded word list");
                        (dictionary, DictionarySource::WordList { path })
                    }
                }
                Err(e) => {
                    tracing::warn!(%path, error = %e, "failed to read word list, using fallback");
                    let reason = FallbackReason::Unreadable {
                        path,
                        error: e.to_string(),
                    };
                    (Dictionary::fallback(), DictionarySource::Fallback { reason })
                }
            },
            None => {
                tracing::info!("word list not found, using fallback dictionary");
                (
                    Dictionary::fallback(),
                    DictionarySource::Fallback {
                        reason: FallbackReason::NotFound,
                    },
                )
            }
        };

        let dictionary = dictionary.with_extra_words(&self.extra_words);
        tracing::debug!(words = dictionary.len(), source = %source, "dictionary ready");
        (dictionary, source)
    }
}
