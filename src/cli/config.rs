//! Configuration display command

use email_triage::{error::Result, TriageConfig, TriageError};

/// Print the resolved configuration as TOML
pub fn show(config: &TriageConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| TriageError::Config(format!("Failed to render config: {}", e)))?;
    print!("{}", rendered);
    Ok(())
}
