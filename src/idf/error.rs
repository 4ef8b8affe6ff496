use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DurationError {
    #[error("Malformed duration '{input}': {reason}")]
    MalformedDuration { input: String, reason: String },
}

impl DurationError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        DurationError::MalformedDuration {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdfError {
    #[error("No IDF data found for station '{0}'")]
    StationNotFound(String),
}
