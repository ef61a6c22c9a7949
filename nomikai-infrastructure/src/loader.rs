use nomikai_domain::{Event, MultiplierConfig};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses an event record (participants and venues).
pub fn parse_event(content: &str) -> Result<Event, LoadError> {
    Ok(serde_json::from_str(content)?)
}

/// Parses a multiplier blob. Either table may be omitted.
pub fn parse_multipliers(content: &str) -> Result<MultiplierConfig, LoadError> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_event(path: impl AsRef<Path>) -> Result<Event, LoadError> {
    let event = parse_event(&read(path.as_ref())?)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        participant_count = event.participants.len(),
        venue_count = event.venues.len(),
        "Loaded event record"
    );
    Ok(event)
}

pub fn load_multipliers(path: impl AsRef<Path>) -> Result<MultiplierConfig, LoadError> {
    let config = parse_multipliers(&read(path.as_ref())?)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        gender_entries = config.gender.len(),
        role_entries = config.role.len(),
        "Loaded multiplier configuration"
    );
    Ok(config)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}
