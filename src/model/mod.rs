//! Classifier adapter over pre-trained model artifacts.
//!
//! # Artifacts
//!
//! - **Vectorizer** (`tfidf_vectorizer.json`): fitted TF-IDF vocabulary and IDF
//!   table
//! - **Classifier** (`logreg_model.json`): linear weights, intercepts and the
//!   class list
//! - **Label decoder** (optional): index → label table for classifiers
//!   trained on encoded targets
//!
//! Artifacts are loaded once per process through [`ClassifierAdapter::shared`]
//! and are read-only afterwards. Any missing or inconsistent artifact is a
//! start-up error.

pub mod adapter;
pub mod classifier;
pub mod label_decoder;
pub mod vectorizer;

pub use adapter::{ClassifierAdapter, ModelSummary};
pub use classifier::{ClassValue, ClassifierArtifact, LinearClassifier};
pub use label_decoder::LabelDecoder;
pub use vectorizer::{Norm, SparseFeatures, TfidfVectorizer, VectorizerArtifact};

use crate::error::Result;

/// Turns normalized email text into a label
#[cfg_attr(test, mockall::automock)]
pub trait Classify {
    fn classify(&self, normalized_text: &str) -> Result<String>;
}
