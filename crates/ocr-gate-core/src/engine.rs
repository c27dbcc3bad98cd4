//! The assembled OCR gate: one dictionary, one training corpus.
//!
//! [`Engine`] owns the state every operation needs so callers do not have to
//! thread a dictionary reference through the scorer, corrector, and corpus.

use crate::config::Config;
use crate::corpus::{Admission, LanguageModel, NoLanguageModel, TrainingCorpus};
use crate::correction::{CorrectionResult, Corrector};
use crate::dictionary::{Dictionary, DictionaryInfo, DictionarySource};
use crate::evaluation::{EvaluationReport, Evaluator};
use crate::scoring::{self, ValidationMetrics};
use crate::validator::Validator;

/// Dictionary, training corpus, and acceptance threshold.
#[derive(Debug)]
pub struct Engine<M: LanguageModel = NoLanguageModel> {
    dictionary: Dictionary,
    dictionary_source: DictionarySource,
    corpus: TrainingCorpus<M>,
    min_confidence: f64,
}

impl Engine<NoLanguageModel> {
    /// Build an engine from configuration with no language model.
    pub fn from_config(config: &Config) -> Self {
        Self::with_language_model(config, NoLanguageModel)
    }
}

impl<M: LanguageModel> Engine<M> {
    /// Build an engine from configuration, replaying the stored corpus into
    /// `model`.
    #[tracing::instrument(skip_all)]
    pub fn with_language_model(config: &Config, model: M) -> Self {
        let (dictionary, dictionary_source) = config.dictionary_loader().load();
        tracing::info!(
            words = dictionary.len(),
            source = %dictionary_source,
            "dictionary ready"
        );
        let corpus = TrainingCorpus::open(config.corpus_path(), model);
        Self::from_parts(
            dictionary,
            dictionary_source,
            corpus,
            config.min_confidence(),
        )
    }

    /// Assemble an engine from already-loaded pieces.
    pub const fn from_parts(
        dictionary: Dictionary,
        dictionary_source: DictionarySource,
        corpus: TrainingCorpus<M>,
        min_confidence: f64,
    ) -> Self {
        Self {
            dictionary,
            dictionary_source,
            corpus,
            min_confidence,
        }
    }

    /// The loaded dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Where the dictionary came from.
    pub const fn dictionary_source(&self) -> &DictionarySource {
        &self.dictionary_source
    }

    /// The training corpus.
    pub const fn corpus(&self) -> &TrainingCorpus<M> {
        &self.corpus
    }

    /// Default corpus acceptance threshold.
    pub const fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Dictionary-based confidence metrics for `text`.
    pub fn score(&self, text: &str) -> ValidationMetrics {
        scoring::score(&Validator::new(&self.dictionary), text)
    }

    /// Spelling-corrected `text`.
    pub fn correct(&self, text: &str) -> CorrectionResult {
        Corrector::new(&self.dictionary).correct(text)
    }

    /// Full evaluation report for `text`.
    pub fn evaluate(&self, text: &str) -> EvaluationReport {
        Evaluator::new(&self.dictionary).evaluate(text)
    }

    /// Offer `text` to the training corpus.
    ///
    /// `min_confidence` overrides the configured threshold for this call.
    pub fn add_training_text(&mut self, text: &str, min_confidence: Option<f64>) -> Admission {
        let threshold = min_confidence.unwrap_or(self.min_confidence);
        let evaluator = Evaluator::new(&self.dictionary);
        self.corpus.add(&evaluator, text, threshold)
    }

    /// Summary of the loaded dictionary with `sample_size` example words.
    pub fn dictionary_info(&self, sample_size: usize) -> DictionaryInfo {
        self.dictionary.info(sample_size)
    }
}
