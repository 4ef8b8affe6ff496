use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocateStationError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No nearby station with IDF data found")]
    NoStationWithData,
}
