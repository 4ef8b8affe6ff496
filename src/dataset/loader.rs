//! Loads the station catalog and IDF tables from disk.
//!
//! The data directory holds one sub-directory per province:
//!
//! ```text
//! data/
//!   ON/
//!     master_stations_enriched_validated.json
//!     idf_data_by_station_corrected.json   (station-id keys)
//!     idf_data_by_station.json             (composite keys)
//!   QC/
//!     ...
//! ```
//!
//! Which IDF file is read, and how its keys map to station ids, is fixed up front by the
//! [`KeyStrategy`]. Every key is validated while loading; the first one that does not fit
//! the strategy aborts the load.

use crate::dataset::error::DataLoadError;
use crate::types::idf_record::{IdfIndex, IdfRecord};
use crate::types::station::Station;
use bon::Builder;
use log::{debug, info, warn};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

pub const STATIONS_FILE_NAME: &str = "master_stations_enriched_validated.json";
pub const CORRECTED_IDF_FILE_NAME: &str = "idf_data_by_station_corrected.json";
pub const ORIGINAL_IDF_FILE_NAME: &str = "idf_data_by_station.json";

/// How the keys of the IDF files identify stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum KeyStrategy {
    /// Keys are plain alphanumeric station ids. Read from `idf_data_by_station_corrected.json`.
    #[default]
    StationId,
    /// Keys embed the province and station id, e.g. `2022_10_31_614_ON_6144478_LONDON_CS`.
    /// Read from `idf_data_by_station.json`.
    Composite,
}

impl KeyStrategy {
    pub fn file_name(&self) -> &'static str {
        match self {
            KeyStrategy::StationId => CORRECTED_IDF_FILE_NAME,
            KeyStrategy::Composite => ORIGINAL_IDF_FILE_NAME,
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::StationId => f.write_str("station-id"),
            KeyStrategy::Composite => f.write_str("composite"),
        }
    }
}

/// Maps IDF file keys to station ids for one province.
enum KeyExtractor {
    StationId,
    Composite(Regex),
}

impl KeyExtractor {
    fn for_province(strategy: KeyStrategy, province: &str) -> Result<Self, DataLoadError> {
        match strategy {
            KeyStrategy::StationId => Ok(KeyExtractor::StationId),
            KeyStrategy::Composite => {
                let pattern = format!(r"_{}_([0-9A-Z]+)", regex::escape(province));
                Regex::new(&pattern)
                    .map(KeyExtractor::Composite)
                    .map_err(|e| DataLoadError::KeyPattern(province.to_string(), e))
            }
        }
    }

    fn station_id(&self, key: &str) -> Option<String> {
        match self {
            KeyExtractor::StationId => {
                let plain = !key.is_empty() && key.chars().all(char::is_alphanumeric);
                plain.then(|| key.to_string())
            }
            KeyExtractor::Composite(pattern) => pattern
                .captures(key)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }
}

/// Where and how to load the dataset from.
#[derive(Debug, Clone, Builder)]
pub struct LoadOptions {
    #[builder(into)]
    data_dir: PathBuf,
    #[builder(default)]
    key_strategy: KeyStrategy,
}

impl LoadOptions {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn key_strategy(&self) -> KeyStrategy {
        self.key_strategy
    }
}

/// Everything read from the data directory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Stations of every loaded province, provinces in directory-name order and stations in
    /// file order within each.
    pub stations: Vec<Station>,
    pub idf_index: IdfIndex,
    /// Provinces for which both stations and IDF tables were loaded.
    pub provinces: Vec<String>,
}

/// Reads all province sub-directories of the data directory.
///
/// A province without a station file is skipped entirely. A province without the IDF file
/// for the configured strategy contributes its stations but no IDF data.
///
/// # Errors
///
/// Returns [`DataLoadError::UnparseableKey`] on the first IDF key that does not fit the
/// strategy, [`DataLoadError::JsonParse`] for malformed files, and
/// [`DataLoadError::NoIdfData`] when nothing usable was found.
pub async fn load_dataset(options: &LoadOptions) -> Result<Dataset, DataLoadError> {
    let data_dir = options.data_dir();
    let strategy = options.key_strategy();
    let mut dataset = Dataset::default();

    for (province, province_dir) in list_province_dirs(data_dir).await? {
        let stations_path = province_dir.join(STATIONS_FILE_NAME);
        if !file_exists(&stations_path).await? {
            warn!(
                "Station data file not found for {} at {}",
                province,
                stations_path.display()
            );
            continue;
        }
        let stations: Vec<Station> = read_json(&stations_path).await?;
        info!("Loaded {} stations for {}", stations.len(), province);
        dataset.stations.extend(stations);

        let idf_path = province_dir.join(strategy.file_name());
        if !file_exists(&idf_path).await? {
            warn!(
                "No IDF data file for {} (expected {} for the {} key strategy)",
                province,
                strategy.file_name(),
                strategy
            );
            continue;
        }
        // Keys are visited in file order, so a later key for the same station wins.
        let raw: Map<String, Value> = read_json(&idf_path).await?;
        let extractor = KeyExtractor::for_province(strategy, &province)?;
        for (key, value) in raw {
            let record = IdfRecord::deserialize(value)
                .map_err(|e| DataLoadError::JsonParse(idf_path.clone(), e))?;
            let Some(station_id) = extractor.station_id(&key) else {
                return Err(DataLoadError::UnparseableKey {
                    file: idf_path,
                    key,
                    strategy,
                });
            };
            if dataset.idf_index.insert(station_id.clone(), record).is_some() {
                debug!("IDF data for station {} replaced by key '{}'", station_id, key);
            }
        }
        info!(
            "Loaded IDF data for {}. Current total keys: {}",
            province,
            dataset.idf_index.len()
        );
        dataset.provinces.push(province);
    }

    if dataset.provinces.is_empty() {
        warn!("No valid provincial data found in {}", data_dir.display());
    } else {
        info!(
            "Data loading complete for {}: {} stations, {} IDF data sets",
            dataset.provinces.join(", "),
            dataset.stations.len(),
            dataset.idf_index.len()
        );
    }

    if dataset.idf_index.is_empty() {
        return Err(DataLoadError::NoIdfData(data_dir.to_path_buf()));
    }
    Ok(dataset)
}

/// Sub-directories of the data directory as `(name, path)`, sorted by name so the catalog
/// order does not depend on the file system.
async fn list_province_dirs(data_dir: &Path) -> Result<Vec<(String, PathBuf)>, DataLoadError> {
    let dir_error = |e| DataLoadError::DataDirRead(data_dir.to_path_buf(), e);
    let mut entries = fs::read_dir(data_dir).await.map_err(dir_error)?;
    let mut dirs = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(dir_error)? {
        let path = entry.path();
        let metadata = fs::metadata(&path).await.map_err(dir_error)?;
        if metadata.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    dirs.sort();
    Ok(dirs)
}

async fn file_exists(path: &Path) -> Result<bool, DataLoadError> {
    fs::try_exists(path)
        .await
        .map_err(|e| DataLoadError::FileRead(path.to_path_buf(), e))
}

async fn read_json<T>(path: &Path) -> Result<T, DataLoadError>
where
    T: DeserializeOwned + Send + 'static,
{
    let bytes = fs::read(path)
        .await
        .map_err(|e| DataLoadError::FileRead(path.to_path_buf(), e))?;
    let path_buf = path.to_path_buf();
    let value = task::spawn_blocking(move || {
        serde_json::from_slice::<T>(&bytes).map_err(|e| DataLoadError::JsonParse(path_buf, e))
    })
    .await??;
    Ok(value)
}
