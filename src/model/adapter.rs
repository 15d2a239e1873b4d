//! Loads the model artifacts and serves predictions.

use crate::config::ModelConfig;
use crate::error::{Result, TriageError};
use crate::model::classifier::{ClassValue, ClassifierArtifact, LinearClassifier};
use crate::model::label_decoder::LabelDecoder;
use crate::model::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use crate::model::Classify;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

static SHARED: OnceCell<ClassifierAdapter> = OnceCell::new();

/// Vectorizer + classifier (+ optional label decoder)
#[derive(Debug)]
pub struct ClassifierAdapter {
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
    decoder: Option<LabelDecoder>,
}

/// Shape of the loaded model, for status output
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub vocabulary_size: usize,
    pub n_features: usize,
    pub classes: Vec<String>,
    pub decoded: bool,
}

impl ClassifierAdapter {
    /// Process-wide adapter, loaded on first call.
    ///
    /// Later calls return the same instance and ignore `config`.
    pub fn shared(config: &ModelConfig) -> Result<&'static ClassifierAdapter> {
        SHARED.get_or_try_init(|| {
            info!("Loading classifier artifacts");
            Self::load(config)
        })
    }

    /// Load all artifacts named in `config`
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let vectorizer = load_artifact::<VectorizerArtifact, _>(&config.vectorizer, |a| {
            TfidfVectorizer::from_artifact(a)
        })?;
        let classifier = load_artifact::<ClassifierArtifact, _>(&config.classifier, |a| {
            LinearClassifier::from_artifact(a)
        })?;
        let decoder_path = config.decoder_path();
        let decoder = match decoder_path {
            Some(ref path) => Some(load_artifact::<LabelDecoder, _>(path, |d| {
                d.validate()?;
                Ok(d)
            })?),
            None => None,
        };

        Self::from_parts(vectorizer, classifier, decoder).map_err(|e| match (e, &decoder_path) {
            (e @ TriageError::UnknownClassIndex { .. }, Some(path)) => {
                TriageError::artifact(path, e.to_string())
            }
            (TriageError::Other(reason), _) => TriageError::artifact(&config.classifier, reason),
            (other, _) => other,
        })
    }

    /// Assemble an adapter from already-built parts, checking they fit together
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        classifier: LinearClassifier,
        decoder: Option<LabelDecoder>,
    ) -> Result<Self> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(TriageError::Other(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }

        if classifier.emits_indices() {
            let Some(ref decoder) = decoder else {
                return Err(TriageError::Other(
                    "classifier emits class indices but no label decoder is configured"
                        .to_string(),
                ));
            };
            for class in classifier.classes() {
                if let ClassValue::Index(i) = class {
                    decoder.decode(*i)?;
                }
            }
        } else if decoder.is_some() {
            warn!("Classifier emits label names; label decoder will not be used");
        }

        debug!(
            "Model ready: {} features, {} classes",
            vectorizer.n_features(),
            classifier.classes().len()
        );

        Ok(Self {
            vectorizer,
            classifier,
            decoder,
        })
    }

    /// Predict the label for one normalized email
    pub fn predict_label(&self, normalized_text: &str) -> Result<String> {
        let features = self.vectorizer.transform(&[normalized_text]);
        let raw = self
            .classifier
            .predict(&features)
            .into_iter()
            .next()
            .ok_or_else(|| TriageError::Other("classifier returned no prediction".to_string()))?;

        match raw {
            ClassValue::Name(label) => Ok(label),
            ClassValue::Index(index) => match self.decoder {
                Some(ref decoder) => decoder.decode(index).map(str::to_string),
                None => Err(TriageError::UnknownClassIndex { index, known: 0 }),
            },
        }
    }

    pub fn summary(&self) -> ModelSummary {
        let classes = self
            .classifier
            .classes()
            .iter()
            .map(|c| match (c, &self.decoder) {
                (ClassValue::Index(i), Some(d)) => d
                    .decode(*i)
                    .map(str::to_string)
                    .unwrap_or_else(|_| i.to_string()),
                _ => c.to_string(),
            })
            .collect();

        ModelSummary {
            vocabulary_size: self.vectorizer.vocabulary_size(),
            n_features: self.vectorizer.n_features(),
            classes,
            decoded: self.classifier.emits_indices(),
        }
    }
}

impl Classify for ClassifierAdapter {
    fn classify(&self, normalized_text: &str) -> Result<String> {
        self.predict_label(normalized_text)
    }
}

/// Read a JSON artifact and convert it, tagging every failure with the path
fn load_artifact<A, T>(path: &Path, build: impl FnOnce(A) -> Result<T>) -> Result<T>
where
    A: DeserializeOwned,
{
    debug!("Reading model artifact {}", path.display());
    let contents = std::fs::read_to_string(path)
        .map_err(|e| TriageError::artifact(path, format!("cannot read: {}", e)))?;
    let artifact: A = serde_json::from_str(&contents)
        .map_err(|e| TriageError::artifact(path, format!("malformed: {}", e)))?;
    build(artifact).map_err(|e| TriageError::artifact(path, e.to_string()))
}
