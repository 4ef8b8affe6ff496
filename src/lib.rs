mod config;
mod dataset;
mod error;
mod idf;
mod idf_service;
pub mod server;
mod stations;
mod types;

#[cfg(test)]
mod test_support;

pub use config::ServerConfig;
pub use error::RainfallIdfError;
pub use idf_service::*;
pub use server::run_server;

pub use types::curve_point::*;
pub use types::idf_record::*;
pub use types::intensity_unit::IntensityUnit;
pub use types::province::*;
pub use types::station::Station;

pub use idf::curves::{build_curves, build_report_curves};
pub use idf::duration::*;
pub use idf::intensity::*;

pub use stations::catalog::StationCatalog;
pub use stations::geodesic::haversine;
pub use stations::resolver::{resolve, NearestStation};

pub use dataset::loader::{
    load_dataset, Dataset, KeyStrategy, LoadOptions, CORRECTED_IDF_FILE_NAME,
    ORIGINAL_IDF_FILE_NAME, STATIONS_FILE_NAME,
};

pub use dataset::error::DataLoadError;
pub use idf::error::{DurationError, IdfError};
pub use stations::error::LocateStationError;
