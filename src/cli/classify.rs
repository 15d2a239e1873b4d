//! One-shot classification command

use email_triage::{error::Result, Decision, GateMode, TriageConfig, TriageError};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::helpers::{build_pipeline, print_json};

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    label: &'a str,
    decision: Decision,
    matched_types: &'a [&'static str],
}

/// Handle classify command
pub fn handle(
    config: &TriageConfig,
    text: Option<String>,
    file: Option<PathBuf>,
    gate: Option<GateMode>,
    json: bool,
) -> Result<()> {
    let email = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            debug!("Reading email from {}", path.display());
            std::fs::read_to_string(&path)?
        }
        (None, None) => {
            debug!("Reading email from stdin");
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if email.trim().is_empty() {
        warn!("Empty email, nothing to classify");
        return Err(TriageError::Other("Please enter an email.".to_string()));
    }

    let pipeline = build_pipeline(config, gate)?;
    let prediction = pipeline.predict(&email)?;

    if json {
        print_json(&ClassifyOutput {
            label: &prediction.label,
            decision: prediction.decision,
            matched_types: &prediction.matched_types,
        })?;
    } else {
        println!("🧠 Prediction: {}", prediction.label.to_uppercase());
        if prediction.decision == Decision::GateMiss {
            println!("   (no document keywords found; model not consulted)");
        } else if !prediction.matched_types.is_empty() {
            println!("   Mentions: {}", prediction.matched_types.join(", "));
        }
    }

    Ok(())
}
