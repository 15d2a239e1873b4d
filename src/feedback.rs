//! Append-only feedback log.
//!
//! Every approve/disapprove action becomes one CSV row:
//! `timestamp,email_text,prediction,feedback`. The header is written when
//! the file is created and never again. Rows are never rewritten.
//!
//! There is no locking: two processes appending at once can interleave rows
//! or both write a header.

use crate::error::{Result, TriageError};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Local-time timestamp format, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human judgment on a prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approved,
    Disapproved,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Approved => write!(f, "approved"),
            Verdict::Disapproved => write!(f, "disapproved"),
        }
    }
}

/// One row of the feedback log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackRecord {
    pub timestamp: String,
    pub email_text: String,
    pub prediction: String,
    pub feedback: Verdict,
}

impl FeedbackRecord {
    /// Build a record stamped with the current local time
    pub fn new(email_text: &str, prediction: &str, feedback: Verdict) -> Result<Self> {
        if prediction.trim().is_empty() {
            return Err(TriageError::InvalidFeedback(
                "prediction must not be empty".to_string(),
            ));
        }

        Ok(Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            email_text: email_text.trim().to_string(),
            prediction: prediction.to_string(),
            feedback,
        })
    }
}

/// Approve/disapprove counts for one label
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LabelTally {
    pub approved: usize,
    pub disapproved: usize,
}

impl LabelTally {
    pub fn total(&self) -> usize {
        self.approved + self.disapproved
    }

    /// Share of approvals, `None` when there is no feedback yet
    pub fn approval_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.approved as f64 / n as f64),
        }
    }
}

/// Feedback counts per predicted label
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FeedbackSummary {
    pub total: usize,
    pub by_label: BTreeMap<String, LabelTally>,
}

/// Feedback log file
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Record one piece of feedback. Each call appends a new row.
    pub fn log_feedback(
        &self,
        email_text: &str,
        prediction: &str,
        feedback: Verdict,
    ) -> Result<FeedbackRecord> {
        let record = FeedbackRecord::new(email_text, prediction, feedback)?;
        self.append(&record)?;
        info!("Feedback recorded: {} for '{}'", record.feedback, record.prediction);
        Ok(record)
    }

    /// Append a record, writing the header first if the file is new
    pub fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let file_exists = self.path.exists();
        if !file_exists {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            debug!("Creating feedback log {}", self.path.display());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(!file_exists)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// All records in file order
    pub fn records(&self) -> Result<Vec<FeedbackRecord>> {
        if !self.exists() {
            return Err(TriageError::LogNotFound(self.path.clone()));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<FeedbackRecord>() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Tally feedback per predicted label
    pub fn summary(&self) -> Result<FeedbackSummary> {
        let mut summary = FeedbackSummary::default();
        for record in self.records()? {
            let tally = summary.by_label.entry(record.prediction).or_default();
            match record.feedback {
                Verdict::Approved => tally.approved += 1,
                Verdict::Disapproved => tally.disapproved += 1,
            }
            summary.total += 1;
        }
        Ok(summary)
    }

    /// Copy the full log bytes to `writer`, returning the byte count
    pub fn download<W: Write>(&self, writer: &mut W) -> Result<u64> {
        if !self.exists() {
            return Err(TriageError::LogNotFound(self.path.clone()));
        }

        let mut file = File::open(&self.path)?;
        let bytes = std::io::copy(&mut file, writer)?;
        writer.flush()?;
        debug!("Downloaded {} bytes from {}", bytes, self.path.display());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tempfile::TempDir;

    const HEADER: &str = "timestamp,email_text,prediction,feedback";

    fn temp_log() -> (TempDir, FeedbackLog) {
        let dir = TempDir::new().unwrap();
        let log = FeedbackLog::new(dir.path().join("feedback_log.csv"));
        (dir, log)
    }

    #[test]
    fn test_first_write_creates_header_and_row() {
        let (_dir, log) = temp_log();
        assert!(!log.exists());

        log.log_feedback("SOA attached", "ontopic", Verdict::Approved)
            .unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].ends_with(",SOA attached,ontopic,approved"));
    }

    #[test]
    fn test_n_calls_give_n_rows_and_one_header() {
        let (_dir, log) = temp_log();
        for _ in 0..5 {
            log.log_feedback("same email", "ontopic", Verdict::Approved)
                .unwrap();
        }

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.matches(HEADER).count(), 1);
        assert_eq!(contents.lines().count(), 6);
        assert_eq!(log.records().unwrap().len(), 5);
    }

    #[test]
    fn test_timestamp_format() {
        let record = FeedbackRecord::new("x", "offtopic", Verdict::Disapproved).unwrap();
        assert_eq!(record.timestamp.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_email_text_is_trimmed() {
        let record = FeedbackRecord::new("  hello\n", "offtopic", Verdict::Approved).unwrap();
        assert_eq!(record.email_text, "hello");
    }

    #[test]
    fn test_empty_prediction_rejected() {
        let (_dir, log) = temp_log();
        let result = log.log_feedback("text", "  ", Verdict::Approved);
        assert!(matches!(result, Err(TriageError::InvalidFeedback(_))));
        assert!(!log.exists());
    }

    #[test]
    fn test_multiline_and_comma_text_roundtrip() {
        let (_dir, log) = temp_log();
        let email = "Hi team,\nPlease find the \"Dist Notice\" attached.\n\nThanks";
        log.log_feedback(email, "ontopic", Verdict::Disapproved)
            .unwrap();

        let records = log.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email_text, email);
        assert_eq!(records[0].feedback, Verdict::Disapproved);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let log = FeedbackLog::new(dir.path().join("logs").join("nested").join("log.csv"));
        log.log_feedback("x", "offtopic", Verdict::Approved).unwrap();
        assert!(log.exists());
    }

    #[test]
    fn test_summary() {
        let (_dir, log) = temp_log();
        log.log_feedback("a", "ontopic", Verdict::Approved).unwrap();
        log.log_feedback("b", "ontopic", Verdict::Disapproved).unwrap();
        log.log_feedback("c", "ontopic", Verdict::Approved).unwrap();
        log.log_feedback("d", "offtopic", Verdict::Approved).unwrap();

        let summary = log.summary().unwrap();
        assert_eq!(summary.total, 4);
        let ontopic = &summary.by_label["ontopic"];
        assert_eq!(ontopic.approved, 2);
        assert_eq!(ontopic.disapproved, 1);
        assert!((ontopic.approval_rate().unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.by_label["offtopic"].total(), 1);
    }

    #[test]
    fn test_download_copies_all_bytes() {
        let (_dir, log) = temp_log();
        log.log_feedback("a", "ontopic", Verdict::Approved).unwrap();

        let mut out = Vec::new();
        let n = log.download(&mut out).unwrap();
        let on_disk = std::fs::read(log.path()).unwrap();
        assert_eq!(n as usize, on_disk.len());
        assert_eq!(out, on_disk);
    }

    #[test]
    fn test_missing_log() {
        let (_dir, log) = temp_log();
        assert!(matches!(log.records(), Err(TriageError::LogNotFound(_))));
        assert!(matches!(
            log.download(&mut Vec::new()),
            Err(TriageError::LogNotFound(_))
        ));
    }

    #[test]
    fn test_tally_without_feedback() {
        assert_eq!(LabelTally::default().approval_rate(), None);
    }
}
