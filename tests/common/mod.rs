//! Common test utilities and helpers

#![allow(dead_code)]

use email_triage::{ModelConfig, TriageConfig};
use tempfile::TempDir;

/// Vectorizer over a small document vocabulary
pub const VECTORIZER_JSON: &str = r#"{
    "vocabulary": {
        "distribution": 0,
        "notice": 1,
        "attached": 2,
        "statement": 3,
        "account": 4,
        "lunch": 5,
        "tomorrow": 6,
        "newsletter": 7
    },
    "idf": [1.9, 1.4, 1.2, 1.8, 1.8, 2.2, 2.0, 1.7]
}"#;

/// Binary logistic regression with string labels
pub const BINARY_CLASSIFIER_JSON: &str = r#"{
    "classes": ["offtopic", "ontopic"],
    "coef": [[2.5, 1.5, 0.8, 2.0, 2.0, -3.0, -2.0, -2.5]],
    "intercept": [-0.4]
}"#;

/// Multiclass model over encoded targets
pub const MULTICLASS_CLASSIFIER_JSON: &str = r#"{
    "classes": [0, 1, 2, 3],
    "coef": [
        [-1.0, -1.0, 0.0, -1.0, -1.0, 2.0, 2.0, -1.0],
        [3.0, 1.0, 0.2, -1.0, -1.0, -1.0, -1.0, -1.0],
        [-1.0, -0.5, 0.2, 3.0, 3.0, -1.0, -1.0, -1.0],
        [-1.0, -0.5, 0.0, -1.0, -1.0, -1.0, -1.0, 3.0]
    ],
    "intercept": [0.1, 0.0, 0.0, 0.0]
}"#;

pub const LABEL_DECODER_JSON: &str =
    r#"{"classes": ["offtopic", "Distribution_Notice", "SOA", "Newsletter"]}"#;

/// Write the binary model into `dir`
pub fn binary_model(dir: &TempDir) -> ModelConfig {
    write_model(dir, BINARY_CLASSIFIER_JSON, None)
}

/// Write the multiclass model and its label decoder into `dir`
pub fn multiclass_model(dir: &TempDir) -> ModelConfig {
    write_model(dir, MULTICLASS_CLASSIFIER_JSON, Some(LABEL_DECODER_JSON))
}

pub fn write_model(dir: &TempDir, classifier_json: &str, decoder_json: Option<&str>) -> ModelConfig {
    let vectorizer = dir.path().join("tfidf_vectorizer.json");
    let classifier = dir.path().join("logreg_model.json");
    std::fs::write(&vectorizer, VECTORIZER_JSON).expect("Failed to write vectorizer");
    std::fs::write(&classifier, classifier_json).expect("Failed to write classifier");

    let label_decoder = decoder_json.map(|json| {
        let path = dir.path().join("label_encoder.json");
        std::fs::write(&path, json).expect("Failed to write label decoder");
        path
    });

    ModelConfig {
        vectorizer,
        classifier,
        label_decoder,
    }
}

/// Full configuration rooted in `dir`
pub fn test_config(dir: &TempDir, model: ModelConfig) -> TriageConfig {
    let mut config = TriageConfig {
        model,
        ..Default::default()
    };
    config.feedback.log_path = dir.path().join("feedback_log.csv");
    config
}
