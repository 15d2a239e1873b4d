//! Classification pipeline: keyword gate → normalizer → classifier.

use crate::config::GateMode;
use crate::error::Result;
use crate::lexicon::{contains_document_keywords, matching_types};
use crate::model::Classify;
use crate::normalize::clean_text;
use serde::Serialize;
use tracing::debug;

/// Label assigned when the keyword gate finds no document terms
pub const OFFTOPIC_LABEL: &str = "offtopic";

/// How a prediction was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// No lexicon keyword; the model was not consulted
    GateMiss,
    /// Label came from the classifier
    Model,
}

/// Outcome of classifying one email
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub decision: Decision,
    /// Document types whose synonyms appear in the email
    pub matched_types: Vec<&'static str>,
}

/// Gate + normalizer + classifier
pub struct Pipeline<'a> {
    gate: GateMode,
    classifier: &'a dyn Classify,
}

impl<'a> Pipeline<'a> {
    pub fn new(gate: GateMode, classifier: &'a dyn Classify) -> Self {
        Self { gate, classifier }
    }

    pub fn gate(&self) -> GateMode {
        self.gate
    }

    /// Classify raw email text
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let matched_types = matching_types(text);

        if self.gate == GateMode::Keyword && !contains_document_keywords(Some(text)) {
            debug!("No document keywords found, skipping classifier");
            return Ok(Prediction {
                label: OFFTOPIC_LABEL.to_string(),
                decision: Decision::GateMiss,
                matched_types,
            });
        }

        let cleaned = clean_text(Some(text));
        let label = self.classifier.classify(&cleaned)?;
        debug!("Classifier returned '{}'", label);

        Ok(Prediction {
            label,
            decision: Decision::Model,
            matched_types,
        })
    }
}
