//! Per-user session state and interaction handlers.
//!
//! A [`Session`] remembers the most recent classification. Feedback is
//! recorded through the [`Submission`] it holds, and a `Submission` can only
//! be created by [`Session::submit`], so there is no way to log feedback
//! without a prior prediction.

use crate::error::Result;
use crate::feedback::{FeedbackLog, FeedbackRecord, Verdict};
use crate::pipeline::{Pipeline, Prediction};
use tracing::{debug, warn};
use uuid::Uuid;

/// A classified email awaiting review
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    email_text: String,
    prediction: Prediction,
}

impl Submission {
    /// Trimmed email text as submitted
    pub fn email_text(&self) -> &str {
        &self.email_text
    }

    pub fn label(&self) -> &str {
        &self.prediction.label
    }

    pub fn prediction(&self) -> &Prediction {
        &self.prediction
    }

    /// Log a judgment on this prediction; every call appends a row
    pub fn record(&self, log: &FeedbackLog, verdict: Verdict) -> Result<FeedbackRecord> {
        log.log_feedback(&self.email_text, &self.prediction.label, verdict)
    }
}

/// Result of a submit action
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome<'s> {
    /// Input was blank; nothing was classified
    EmptyInput,
    Classified(&'s Submission),
}

/// State for one interactive session
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    last: Option<Submission>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            last: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Most recent classification, if any
    pub fn last(&self) -> Option<&Submission> {
        self.last.as_ref()
    }

    /// Classify `input` and remember it as the current submission
    pub fn submit(&mut self, pipeline: &Pipeline<'_>, input: &str) -> Result<SubmitOutcome<'_>> {
        let email_text = input.trim();
        if email_text.is_empty() {
            warn!("Empty email submitted, nothing to classify");
            return Ok(SubmitOutcome::EmptyInput);
        }

        let prediction = pipeline.predict(input)?;
        debug!(session = %self.id, label = %prediction.label, "Email classified");

        let submission = self.last.insert(Submission {
            email_text: email_text.to_string(),
            prediction,
        });
        Ok(SubmitOutcome::Classified(submission))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
