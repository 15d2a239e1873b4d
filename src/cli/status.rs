//! Model and log status command

use email_triage::{error::Result, ClassifierAdapter, ModelSummary, TriageConfig};
use serde::Serialize;
use std::path::Path;

use super::helpers::{feedback_log, print_json};

#[derive(Serialize)]
struct StatusOutput<'a> {
    version: &'static str,
    gate: String,
    model: ModelSummary,
    feedback_log: &'a Path,
    feedback_records: Option<usize>,
}

/// Load the model (fatal if broken) and report its shape
pub fn handle(config: &TriageConfig, json: bool) -> Result<()> {
    let model = ClassifierAdapter::shared(&config.model)?.summary();
    let log = feedback_log(config);
    let feedback_records = if log.exists() {
        Some(log.records()?.len())
    } else {
        None
    };

    if json {
        return print_json(&StatusOutput {
            version: env!("CARGO_PKG_VERSION"),
            gate: config.gate.to_string(),
            model,
            feedback_log: log.path(),
            feedback_records,
        });
    }

    println!("email-triage v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("🧠 Model");
    println!("   Vectorizer: {}", config.model.vectorizer.display());
    println!("   Classifier: {}", config.model.classifier.display());
    if let Some(ref decoder) = config.model.decoder_path() {
        println!("   Decoder:    {}", decoder.display());
    }
    println!("   Vocabulary: {} terms ({} features)", model.vocabulary_size, model.n_features);
    println!("   Classes:    {}", model.classes.join(", "));
    println!("   Gate:       {}", config.gate);
    println!();
    println!("📝 Feedback log");
    println!("   Path:    {}", log.path().display());
    match feedback_records {
        Some(n) => println!("   Records: {}", n),
        None => println!("   Status:  ✗ not created yet"),
    }
    Ok(())
}
