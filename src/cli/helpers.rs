//! Shared helper functions for CLI commands

use email_triage::{
    error::Result, ClassifierAdapter, FeedbackLog, GateMode, Pipeline, TriageConfig,
};
use serde::Serialize;
use tracing::debug;

/// Load the shared classifier and build a pipeline.
///
/// A missing or broken model is fatal here: nothing can be classified
/// without it.
pub fn build_pipeline(config: &TriageConfig, gate: Option<GateMode>) -> Result<Pipeline<'static>> {
    let adapter = ClassifierAdapter::shared(&config.model)?;
    let gate = gate.unwrap_or(config.gate);
    debug!("Pipeline ready (gate: {})", gate);
    Ok(Pipeline::new(gate, adapter))
}

/// Feedback log from configuration
pub fn feedback_log(config: &TriageConfig) -> FeedbackLog {
    FeedbackLog::new(&config.feedback.log_path)
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Collapse an email body to one line and cut it to `max` characters
pub fn preview(text: &str, max: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= max {
        line
    } else {
        let cut: String = line.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
