use askr_core::error::{Error, Result};
use askr_core::question::Answers;
use clap::ValueEnum;

/// How resolved answers are printed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Serializes the answers, keeping their resolution order.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_answers(answers: &Answers, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(answers)
            .map_err(|e| Error::Misc(format!("Could not write answers as YAML: {e}"))),
        OutputFormat::Json => serde_json::to_string_pretty(answers)
            .map_err(|e| Error::Misc(format!("Could not write answers as JSON: {e}"))),
    }
}
