use crate::dataset::loader::KeyStrategy;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read data directory '{0}'")]
    DataDirRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to read data file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse JSON data in '{0}'")]
    JsonParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to build station key pattern for province '{0}'")]
    KeyPattern(String, #[source] regex::Error),

    #[error("Cannot extract a station id from IDF key '{key}' in '{file}' using the {strategy} key strategy")]
    UnparseableKey {
        file: PathBuf,
        key: String,
        strategy: KeyStrategy,
    },

    #[error("No IDF data was loaded from '{0}'")]
    NoIdfData(PathBuf),

    // Covers errors joining tokio blocking tasks
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
