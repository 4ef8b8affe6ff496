use crate::dataset::error::DataLoadError;
use crate::idf::error::{DurationError, IdfError};
use crate::stations::error::LocateStationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainfallIdfError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    LocateStation(#[from] LocateStationError),

    #[error(transparent)]
    Idf(#[from] IdfError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("HTTP server failed")]
    Server(#[source] std::io::Error),
}
