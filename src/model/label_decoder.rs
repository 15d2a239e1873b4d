//! Maps classifier class indices back to label strings.

use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};

/// Serialized label decoder: `classes[i]` is the label for index `i`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let decoder = Self { classes };
        decoder.validate()?;
        Ok(decoder)
    }

    /// Reject empty tables and empty or duplicated labels
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(TriageError::Other("label decoder has no classes".to_string()));
        }
        for (i, label) in self.classes.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(TriageError::Other(format!("label {} is empty", i)));
            }
            if self.classes[..i].contains(label) {
                return Err(TriageError::Other(format!("duplicate label '{}'", label)));
            }
        }
        Ok(())
    }

    /// Label for `index`; unknown indices are an error, never a default
    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(TriageError::UnknownClassIndex {
                index,
                known: self.classes.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.classes
    }
}
