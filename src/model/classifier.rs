//! Linear classifier over TF-IDF features (logistic regression weights).

use crate::error::{Result, TriageError};
use crate::model::vectorizer::SparseFeatures;
use serde::{Deserialize, Serialize};

/// One entry of the classifier's class list.
///
/// Models trained on string targets carry the labels directly; models trained
/// on encoded targets carry integer indices that need a label decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassValue {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for ClassValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassValue::Index(i) => write!(f, "{}", i),
            ClassValue::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Serialized classifier artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub classes: Vec<ClassValue>,
    /// One row per decision function (a single row for binary models)
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// Fitted linear classifier
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<ClassValue>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearClassifier {
    /// Build from a deserialized artifact, checking shapes
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self> {
        let n_classes = artifact.classes.len();
        if n_classes < 2 {
            return Err(TriageError::Other(format!(
                "classifier needs at least 2 classes, found {}",
                n_classes
            )));
        }

        let expected_rows = if n_classes == 2 { 1 } else { n_classes };
        if artifact.coef.len() != expected_rows {
            return Err(TriageError::Other(format!(
                "{} classes need {} coefficient rows, found {}",
                n_classes,
                expected_rows,
                artifact.coef.len()
            )));
        }
        if artifact.intercept.len() != expected_rows {
            return Err(TriageError::Other(format!(
                "{} coefficient rows but {} intercepts",
                expected_rows,
                artifact.intercept.len()
            )));
        }

        let width = artifact.coef[0].len();
        if width == 0 || artifact.coef.iter().any(|row| row.len() != width) {
            return Err(TriageError::Other(
                "coefficient rows must be non-empty and equally long".to_string(),
            ));
        }

        let indexed = artifact
            .classes
            .iter()
            .filter(|c| matches!(c, ClassValue::Index(_)))
            .count();
        if indexed != 0 && indexed != n_classes {
            return Err(TriageError::Other(
                "classes mix integer indices and label names".to_string(),
            ));
        }

        Ok(Self {
            classes: artifact.classes,
            coef: artifact.coef,
            intercept: artifact.intercept,
        })
    }

    pub fn classes(&self) -> &[ClassValue] {
        &self.classes
    }

    /// Number of feature columns the weights expect
    pub fn n_features(&self) -> usize {
        self.coef[0].len()
    }

    /// True when the model emits class indices rather than labels
    pub fn emits_indices(&self) -> bool {
        matches!(self.classes[0], ClassValue::Index(_))
    }

    /// Raw decision scores, one per coefficient row
    pub fn decision_function(&self, x: &SparseFeatures) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| x.dot(row) + b)
            .collect()
    }

    /// Predict one class per input row
    pub fn predict(&self, rows: &[SparseFeatures]) -> Vec<ClassValue> {
        rows.iter().map(|x| self.predict_one(x)).collect()
    }

    fn predict_one(&self, x: &SparseFeatures) -> ClassValue {
        let scores = self.decision_function(x);
        let best = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            // First maximum wins ties
            scores
                .iter()
                .enumerate()
                .fold(0, |best, (i, &s)| if s > scores[best] { i } else { best })
        };
        self.classes[best].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(entries: &[(usize, f64)]) -> SparseFeatures {
        SparseFeatures {
            entries: entries.to_vec(),
        }
    }

    fn binary() -> LinearClassifier {
        LinearClassifier::from_artifact(ClassifierArtifact {
            classes: vec![
                ClassValue::Name("offtopic".to_string()),
                ClassValue::Name("ontopic".to_string()),
            ],
            coef: vec![vec![2.0, -1.0]],
            intercept: vec![-0.5],
        })
        .unwrap()
    }

    #[test]
    fn test_binary_decision() {
        let clf = binary();
        let preds = clf.predict(&[features(&[(0, 1.0)]), features(&[(1, 1.0)])]);
        assert_eq!(preds[0], ClassValue::Name("ontopic".to_string()));
        assert_eq!(preds[1], ClassValue::Name("offtopic".to_string()));
    }

    #[test]
    fn test_zero_score_is_negative_class() {
        let clf = LinearClassifier::from_artifact(ClassifierArtifact {
            classes: vec![ClassValue::Index(0), ClassValue::Index(1)],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
        })
        .unwrap();
        assert_eq!(clf.predict(&[SparseFeatures::default()]), vec![ClassValue::Index(0)]);
    }

    #[test]
    fn test_multiclass_argmax_and_ties() {
        let clf = LinearClassifier::from_artifact(ClassifierArtifact {
            classes: vec![ClassValue::Index(0), ClassValue::Index(1), ClassValue::Index(2)],
            coef: vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]],
            intercept: vec![0.0, 0.0, 0.0],
        })
        .unwrap();

        assert_eq!(clf.predict(&[features(&[(1, 0.9)])]), vec![ClassValue::Index(2)]);
        assert_eq!(clf.predict(&[features(&[(0, 0.9)])]), vec![ClassValue::Index(1)]);
        // all scores equal -> lowest index
        assert_eq!(clf.predict(&[SparseFeatures::default()]), vec![ClassValue::Index(0)]);
        assert!(clf.emits_indices());
    }

    #[test]
    fn test_class_values_from_json() {
        let artifact: ClassifierArtifact = serde_json::from_str(
            r#"{"classes": [0, 1, 2], "coef": [[1.0], [2.0], [3.0]], "intercept": [0, 0, 0]}"#,
        )
        .unwrap();
        assert_eq!(artifact.classes[2], ClassValue::Index(2));

        let artifact: ClassifierArtifact = serde_json::from_str(
            r#"{"classes": ["offtopic", "ontopic"], "coef": [[1.0]], "intercept": [0.1]}"#,
        )
        .unwrap();
        assert_eq!(artifact.classes[1], ClassValue::Name("ontopic".to_string()));
    }

    #[test]
    fn test_shape_validation() {
        let bad_rows = ClassifierArtifact {
            classes: vec![ClassValue::Index(0), ClassValue::Index(1), ClassValue::Index(2)],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
        };
        assert!(LinearClassifier::from_artifact(bad_rows).is_err());

        let bad_intercept = ClassifierArtifact {
            classes: vec![ClassValue::Index(0), ClassValue::Index(1)],
            coef: vec![vec![1.0]],
            intercept: vec![],
        };
        assert!(LinearClassifier::from_artifact(bad_intercept).is_err());

        let single_class = ClassifierArtifact {
            classes: vec![ClassValue::Index(0)],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
        };
        assert!(LinearClassifier::from_artifact(single_class).is_err());

        let mixed = ClassifierArtifact {
            classes: vec![ClassValue::Index(0), ClassValue::Name("ontopic".to_string())],
            coef: vec![vec![1.0]],
            intercept: vec![0.0],
        };
        assert!(LinearClassifier::from_artifact(mixed).is_err());
    }
}
