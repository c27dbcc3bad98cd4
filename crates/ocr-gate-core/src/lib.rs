//! Core library for ocr-gate.
//!
//! Scores OCR output against an English dictionary, repairs likely
//! misspellings by edit distance, and gates good text into a persisted
//! training corpus.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`dictionary`] - Word list discovery and the built-in fallback vocabulary
//! - [`validator`] - Word validation with simple suffix stripping
//! - [`scoring`] - Four-signal confidence metrics
//! - [`correction`] - Edit-distance spelling correction
//! - [`evaluation`] - Combined report with quality tier and keep decision
//! - [`corpus`] - The JSON training corpus and language model hook
//! - [`engine`] - All of the above bound to one dictionary
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use ocr_gate_core::{ConfigLoader, Engine};
//!
//! let (config, _sources) = ConfigLoader::new()
//!     .with_user_config(true)
//!     .load()
//!     .expect("Failed to load configuration");
//!
//! let engine = Engine::from_config(&config);
//! let report = engine.evaluate("Tbe quick brown fox jumpcd over the lazy dog.");
//! println!("{} ({})", report.quality, report.overall_confidence);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod corpus;
pub mod correction;
pub mod dictionary;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod scoring;
pub mod text;
pub mod validator;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use corpus::{Admission, CorpusLoad, LanguageModel, NoLanguageModel, Persistence, TrainingCorpus};
pub use correction::{Candidate, Correction, CorrectionResult, Corrector};
pub use dictionary::{Dictionary, DictionaryInfo, DictionaryLoader, DictionarySource, FallbackReason};
pub use engine::Engine;
pub use error::{ConfigError, ConfigResult, CorpusError, CorpusResult};
pub use evaluation::{EvaluationReport, Evaluator, Quality};
pub use scoring::ValidationMetrics;
pub use validator::Validator;

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
