//! TF-IDF feature vectorizer.
//!
//! Rebuilt from a fitted vocabulary and IDF table. Tokenization, n-gram
//! expansion, term weighting and row normalization follow the usual TF-IDF
//! recipe: raw counts (optionally `1 + ln(tf)`), times IDF, then L2 or L1
//! normalized.

use crate::error::{Result, TriageError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sparse feature row: `(column, weight)` pairs sorted by column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseFeatures {
    pub entries: Vec<(usize, f64)>,
}

impl SparseFeatures {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product against a dense weight row
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(col, value)| dense.get(col).copied().unwrap_or(0.0) * value)
            .sum()
    }
}

/// Row normalization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,

    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default)]
    pub sublinear_tf: bool,

    /// `null` disables normalization
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,

    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_lowercase() -> bool {
    true
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Option<Norm>,
    lowercase: bool,
    token_re: Regex,
}

impl TfidfVectorizer {
    /// Build from a deserialized artifact, checking it is self-consistent
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(TriageError::Other(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if artifact.idf.is_empty() {
            return Err(TriageError::Other("empty idf table".to_string()));
        }

        let n_features = artifact.idf.len();
        if let Some((term, &col)) = artifact
            .vocabulary
            .iter()
            .find(|(_, col)| **col >= n_features)
        {
            return Err(TriageError::Other(format!(
                "vocabulary term '{}' maps to column {} but idf has {} entries",
                term, col, n_features
            )));
        }

        let token_re = Regex::new(&artifact.token_pattern)?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
            lowercase: artifact.lowercase,
            token_re,
        })
    }

    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transform a batch of documents into sparse TF-IDF rows
    pub fn transform(&self, docs: &[&str]) -> Vec<SparseFeatures> {
        docs.iter().map(|doc| self.transform_one(doc)).collect()
    }

    fn transform_one(&self, doc: &str) -> SparseFeatures {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(doc) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (col, tf * self.idf[col])
            })
            .collect();
        entries.sort_by_key(|&(col, _)| col);

        let scale = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= scale;
            }
        }

        SparseFeatures { entries }
    }

    /// Tokenize and expand into word n-grams
    fn analyze(&self, doc: &str) -> Vec<String> {
        let doc = if self.lowercase {
            doc.to_lowercase()
        } else {
            doc.to_string()
        };
        let tokens: Vec<&str> = self.token_re.find_iter(&doc).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}
