//! Email Triage - Ontopic/Offtopic Email Classifier
//!
//! Decides whether an email concerns one of the recognized document types
//! (distribution notices, statements of account, tax letters, ...) and keeps
//! a log of human feedback on each decision:
//! - Keyword gate over a static document-type lexicon
//! - Text normalization
//! - TF-IDF + linear classifier loaded once from pre-trained artifacts
//! - Append-only CSV feedback log
//!
//! # Architecture
//!
//! - **Lexicon**: document-type synonyms and the keyword gate
//! - **Normalize**: text cleaning before vectorization
//! - **Model**: vectorizer, classifier, label decoder and the cached adapter
//! - **Pipeline**: gate → normalizer → classifier
//! - **Feedback**: the feedback log
//! - **Session**: last prediction and the approve/disapprove handlers
//!
//! # Example
//!
//! ```ignore
//! use email_triage::{ClassifierAdapter, FeedbackLog, Pipeline, Session, TriageConfig, Verdict};
//!
//! fn main() -> email_triage::Result<()> {
//!     let config = TriageConfig::resolve(None)?;
//!     let adapter = ClassifierAdapter::shared(&config.model)?;
//!     let pipeline = Pipeline::new(config.gate, adapter);
//!     let log = FeedbackLog::new(&config.feedback.log_path);
//!
//!     let mut session = Session::new();
//!     session.submit(&pipeline, "Please find attached the Distribution Notice")?;
//!     if let Some(submission) = session.last() {
//!         submission.record(&log, Verdict::Approved)?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod feedback;
pub mod lexicon;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod session;

// Re-export commonly used types
pub use config::{FeedbackConfig, GateMode, ModelConfig, TriageConfig};
pub use error::{Result, TriageError};
pub use feedback::{FeedbackLog, FeedbackRecord, FeedbackSummary, LabelTally, Verdict};
pub use lexicon::contains_document_keywords;
pub use model::{ClassifierAdapter, Classify, LabelDecoder, ModelSummary};
pub use normalize::clean_text;
pub use pipeline::{Decision, Pipeline, Prediction, OFFTOPIC_LABEL};
pub use session::{Session, SubmitOutcome, Submission};
