//! Persisted training corpus of accepted OCR text.
//!
//! The corpus is a JSON file holding `{"training_texts": [...]}`. Each
//! accepted addition re-reads the file, appends, and rewrites it whole, so
//! there must be a single writer. A missing, empty, or corrupt file reads as
//! an empty corpus. Other top-level fields in the file are carried through
//! rewrites untouched.
//!
//! Accepted text is also handed to a [`LanguageModel`]. Opening a corpus
//! replays every stored text into the model.

use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};
use crate::evaluation::{EvaluationReport, Evaluator};

/// Default corpus file name inside the save directory.
pub const CORPUS_FILE: &str = "ocr_training_data.json";

/// Default minimum confidence for accepting text into the corpus.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.6;

/// Consumer of accepted training text.
pub trait LanguageModel {
    /// Learn from one piece of accepted text.
    fn train_on_text(&mut self, text: &str);
}

/// A model that ignores everything it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLanguageModel;

impl LanguageModel for NoLanguageModel {
    fn train_on_text(&mut self, _text: &str) {}
}

impl<M: LanguageModel + ?Sized> LanguageModel for Box<M> {
    fn train_on_text(&mut self, text: &str) {
        (**self).train_on_text(text);
    }
}

/// On-disk layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    training_texts: Vec<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// How reading the corpus file went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorpusLoad {
    /// No file yet.
    Missing,
    /// The file exists but is blank.
    Empty,
    /// The file could not be read or parsed; treated as empty.
    Corrupt {
        /// What went wrong.
        error: String,
    },
    /// The file was parsed.
    Loaded {
        /// Number of stored texts.
        count: usize,
    },
}

/// What happened to the corpus file during an addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Persistence {
    /// Nothing was written because the text was rejected.
    Skipped,
    /// The file was rewritten.
    Written {
        /// Texts in the corpus after the write.
        total: usize,
    },
    /// The write failed; the text was still accepted.
    Failed {
        /// What went wrong.
        reason: String,
    },
}

/// Result of offering text to the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Admission {
    /// Whether the text met the confidence threshold.
    pub accepted: bool,
    /// The evaluation the decision was based on.
    pub report: EvaluationReport,
    /// Outcome of writing the corpus file.
    pub persistence: Persistence,
}

/// Append-only store of accepted text.
#[derive(Debug)]
pub struct TrainingCorpus<M: LanguageModel = NoLanguageModel> {
    path: Utf8PathBuf,
    model: M,
    opened: CorpusLoad,
}

impl TrainingCorpus<NoLanguageModel> {
    /// Open a corpus with no language model attached.
    pub fn new<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self::open(path, NoLanguageModel)
    }
}

impl<M: LanguageModel> TrainingCorpus<M> {
    /// Open the corpus at `path`, replaying stored texts into `model`.
    #[tracing::instrument(skip(path, model), fields(path = %path.as_ref()))]
    pub fn open<P: AsRef<Utf8Path>>(path: P, mut model: M) -> Self {
        let path = path.as_ref().to_path_buf();
        let (file, opened) = read_corpus(&path);
        for text in &file.training_texts {
            model.train_on_text(text);
        }
        tracing::info!(status = ?opened, "training corpus opened");
        Self {
            path,
            model,
            opened,
        }
    }

    /// The corpus file location.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// How the file looked when the corpus was opened.
    pub const fn opened(&self) -> &CorpusLoad {
        &self.opened
    }

    /// The attached language model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Detach the language model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Stored texts in append order, read fresh from disk.
    pub fn texts(&self) -> Vec<String> {
        read_corpus(&self.path).0.training_texts
    }

    /// Evaluate `text` and store its corrected form when the final
    /// confidence reaches `min_confidence`. A NaN threshold admits nothing.
    ///
    /// Write failures are logged and reported in [`Admission::persistence`];
    /// they do not change `accepted`.
    #[tracing::instrument(skip(self, evaluator, text), fields(text_len = text.len()))]
    pub fn add(&mut self, evaluator: &Evaluator<'_>, text: &str, min_confidence: f64) -> Admission {
        let report = evaluator.evaluate(text);

        let meets_threshold = report.overall_confidence >= min_confidence;
        if !meets_threshold {
            tracing::debug!(
                confidence = report.overall_confidence,
                "text rejected from training corpus"
            );
            return Admission {
                accepted: false,
                report,
                persistence: Persistence::Skipped,
            };
        }

        self.model.train_on_text(&report.corrected_text);

        let persistence = match self.append(&report.corrected_text) {
            Ok(total) => {
                tracing::info!(total, "text added to training corpus");
                Persistence::Written { total }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to save training corpus");
                Persistence::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Admission {
            accepted: true,
            report,
            persistence,
        }
    }

    fn append(&self, text: &str) -> CorpusResult<usize> {
        let (mut file, _) = read_corpus(&self.path);
        file.training_texts.push(text.to_string());
        write_corpus(&self.path, &file)?;
        Ok(file.training_texts.len())
    }
}

fn read_corpus(path: &Utf8Path) -> (CorpusFile, CorpusLoad) {
    let content = match std::fs::read_to_string(path.as_std_path()) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return (CorpusFile::default(), CorpusLoad::Missing);
        }
        Err(e) => {
            tracing::warn!(%path, error = %e, "failed to read training corpus");
            return (
                CorpusFile::default(),
                CorpusLoad::Corrupt {
                    error: e.to_string(),
                },
            );
        }
    };

    if content.trim().is_empty() {
        return (CorpusFile::default(), CorpusLoad::Empty);
    }

    match serde_json::from_str::<CorpusFile>(&content) {
        Ok(file) => {
            let count = file.training_texts.len();
            (file, CorpusLoad::Loaded { count })
        }
        Err(e) => {
            tracing::warn!(%path, error = %e, "training corpus is corrupt, treating as empty");
            (
                CorpusFile::default(),
                CorpusLoad::Corrupt {
                    error: e.to_string(),
                },
            )
        }
    }
}

fn write_corpus(path: &Utf8Path, file: &CorpusFile) -> CorpusResult<()> {
    let io_err = |source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent.as_std_path()).map_err(io_err)?;
    }
    let mut json = serde_json::to_string_pretty(file)?;
    json.push('\n');
    std::fs::write(path.as_std_path(), json).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct RecordingModel {
        seen: Vec<String>,
    }

    impl LanguageModel for RecordingModel {
        fn train_on_text(&mut self, text: &str) {
            self.seen.push(text.to_string());
        }
    }

    fn dict() -> Dictionary {
        Dictionary::from_words([
            "the", "quick", "brown", "fox", "jumped", "over", "lazy", "dog",
        ])
    }

    fn corpus_path(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().join(CORPUS_FILE)).unwrap()
    }

    const GOOD: &str = "The quick brown fox jumped over the lazy dog.";

    #[test]
    fn missing_file_opens_empty() {
        let tmp = TempDir::new().unwrap();
        let corpus = TrainingCorpus::new(corpus_path(&tmp));
        assert_eq!(corpus.opened(), &CorpusLoad::Missing);
        assert!(corpus.texts().is_empty());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        fs::write(&path, "{not json").unwrap();

        let corpus = TrainingCorpus::new(&path);
        assert!(matches!(corpus.opened(), CorpusLoad::Corrupt { .. }));
        assert!(corpus.texts().is_empty());
    }

    #[test]
    fn blank_file_opens_empty() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        fs::write(&path, "  \n").unwrap();

        let corpus = TrainingCorpus::new(&path);
        assert_eq!(corpus.opened(), &CorpusLoad::Empty);
    }

    #[test]
    fn accepted_text_is_persisted_corrected() {
        let tmp = TempDir::new().unwrap();
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::new(corpus_path(&tmp));

        let admission = corpus.add(&evaluator, "The quick brwn fox jumped over the lazy dog.", 0.3);

        assert!(admission.accepted);
        assert_eq!(admission.persistence, Persistence::Written { total: 1 });
        assert_eq!(corpus.texts(), vec![GOOD.to_string()]);
    }

    #[test]
    fn threshold_above_maximum_never_writes() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::new(&path);

        let admission = corpus.add(&evaluator, GOOD, 1.1);

        assert!(!admission.accepted);
        assert_eq!(admission.persistence, Persistence::Skipped);
        assert!(!path.exists());
    }

    #[test]
    fn nan_threshold_rejects_everything() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::open(&path, RecordingModel::default());

        for text in [GOOD, "zzqx"] {
            let admission = corpus.add(&evaluator, text, f64::NAN);
            assert!(!admission.accepted, "{text:?} was admitted");
            assert_eq!(admission.persistence, Persistence::Skipped);
        }
        assert!(!path.exists());
        assert!(corpus.model().seen.is_empty());
    }

    #[test]
    fn rejection_leaves_existing_file_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        let original = "{\n  \"training_texts\": [\"kept\"]\n}\n";
        fs::write(&path, original).unwrap();
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::new(&path);

        let admission = corpus.add(&evaluator, GOOD, 1.1);

        assert!(!admission.accepted);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn appends_keep_order() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::new(&path);

        corpus.add(&evaluator, "the quick brown fox", 0.3);
        let admission = corpus.add(&evaluator, "the lazy dog", 0.0);

        assert_eq!(admission.persistence, Persistence::Written { total: 2 });
        assert_eq!(
            TrainingCorpus::new(&path).texts(),
            vec!["the quick brown fox".to_string(), "the lazy dog".to_string()]
        );
    }

    #[test]
    fn corrupt_file_is_replaced_on_accept() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        fs::write(&path, "[1, 2, 3]").unwrap();
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::new(&path);

        let admission = corpus.add(&evaluator, GOOD, 0.3);

        assert_eq!(admission.persistence, Persistence::Written { total: 1 });
        assert_eq!(corpus.texts(), vec![GOOD.to_string()]);
    }

    #[test]
    fn unknown_fields_survive_rewrite() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        fs::write(&path, r#"{"training_texts": [], "version": 2}"#).unwrap();
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::new(&path);

        corpus.add(&evaluator, GOOD, 0.3);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["training_texts"][0], GOOD);
    }

    #[test]
    fn write_failure_still_accepts() {
        let tmp = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail.
        let path = corpus_path(&tmp);
        fs::create_dir(&path).unwrap();
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::open(&path, RecordingModel::default());

        let admission = corpus.add(&evaluator, GOOD, 0.3);

        assert!(admission.accepted);
        assert!(matches!(admission.persistence, Persistence::Failed { .. }));
        assert_eq!(corpus.model().seen, vec![GOOD.to_string()]);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("nested").join("dir").join(CORPUS_FILE))
            .unwrap();
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::new(&path);

        let admission = corpus.add(&evaluator, GOOD, 0.3);

        assert_eq!(admission.persistence, Persistence::Written { total: 1 });
        assert!(path.exists());
    }

    #[test]
    fn model_receives_accepted_text_only() {
        let tmp = TempDir::new().unwrap();
        let d = dict();
        let evaluator = Evaluator::new(&d);
        let mut corpus = TrainingCorpus::open(corpus_path(&tmp), RecordingModel::default());

        corpus.add(&evaluator, "The quick brwn fox jumped over the lazy dog.", 0.3);
        corpus.add(&evaluator, GOOD, 1.1);

        assert_eq!(corpus.into_model().seen, vec![GOOD.to_string()]);
    }

    #[test]
    fn opening_replays_stored_texts() {
        let tmp = TempDir::new().unwrap();
        let path = corpus_path(&tmp);
        fs::write(&path, r#"{"training_texts": ["one", "two"]}"#).unwrap();

        let corpus = TrainingCorpus::open(&path, RecordingModel::default());

        assert_eq!(corpus.opened(), &CorpusLoad::Loaded { count: 2 });
        assert_eq!(corpus.model().seen, vec!["one", "two"]);
    }

    #[test]
    fn boxed_models_work() {
        let tmp = TempDir::new().unwrap();
        let model: Box<dyn LanguageModel> = Box::new(NoLanguageModel);
        let corpus = TrainingCorpus::open(corpus_path(&tmp), model);
        assert!(corpus.texts().is_empty());
    }
}
