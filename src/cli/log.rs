//! Feedback log commands: show, summary, export (download)

use email_triage::{error::Result, FeedbackLog, FeedbackRecord, TriageConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use super::helpers::{feedback_log, preview, print_json};

/// Print feedback records, oldest first
pub fn show(config: &TriageConfig, limit: Option<usize>, json: bool) -> Result<()> {
    let records = recent_records(&feedback_log(config), limit)?;

    if json {
        return print_json(&records);
    }

    if records.is_empty() {
        println!("No feedback recorded yet");
        return Ok(());
    }

    for record in records {
        println!(
            "{}  {:<11}  {:<12}  {}",
            record.timestamp,
            record.feedback.to_string(),
            record.prediction,
            preview(&record.email_text, 60)
        );
    }
    Ok(())
}

/// Most recent `limit` records, oldest first; none if the log is not created yet
fn recent_records(log: &FeedbackLog, limit: Option<usize>) -> Result<Vec<FeedbackRecord>> {
    if !log.exists() {
        return Ok(Vec::new());
    }

    let mut records = log.records()?;
    let skip = limit.map_or(0, |n| records.len().saturating_sub(n));
    records.drain(..skip);
    Ok(records)
}

/// Print approve/disapprove counts per predicted label
pub fn summary(config: &TriageConfig, json: bool) -> Result<()> {
    let summary = feedback_log(config).summary()?;

    if json {
        return print_json(&summary);
    }

    println!("📊 Feedback ({} records)", summary.total);
    for (label, tally) in &summary.by_label {
        let rate = tally
            .approval_rate()
            .map(|r| format!("{:.0}%", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "   {:<20} ✓ {:<5} ✗ {:<5} approved {}",
            label, tally.approved, tally.disapproved, rate
        );
    }
    Ok(())
}

/// Download the full log to a file or stdout
pub fn export(config: &TriageConfig, output: Option<PathBuf>) -> Result<()> {
    let log = feedback_log(config);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let mut file = std::fs::File::create(&path)?;
            let bytes = log.download(&mut file)?;
            debug!("Exported {} bytes", bytes);
            eprintln!("✓ Feedback log written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            log.download(&mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}
