//! The main entry point: an immutable context holding the station catalog and the IDF
//! tables, answering nearest-station and curve queries.

use crate::dataset::loader::{load_dataset, LoadOptions};
use crate::error::RainfallIdfError;
use crate::idf::curves::{build_curves, build_report_curves};
use crate::idf::error::IdfError;
use crate::stations::catalog::StationCatalog;
use crate::stations::error::LocateStationError;
use crate::stations::geodesic::validate_coordinates;
use crate::stations::resolver::{resolve, NearestStation};
use crate::types::curve_point::{CurvePoint, ReportPoint};
use crate::types::idf_record::{IdfIndex, IdfRecord};
use crate::types::intensity_unit::IntensityUnit;
use crate::types::station::Station;
use bon::bon;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use rainfall_idf::LatLon;
///
/// let london_on = LatLon(42.9849, -81.2453);
/// assert_eq!(london_on.0, 42.9849); // Latitude
/// assert_eq!(london_on.1, -81.2453); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// Station catalog plus IDF tables, loaded once and never mutated.
///
/// Every query is a synchronous, lock-free read, so one instance can be shared between any
/// number of request handlers (e.g. behind an `Arc`).
///
/// # Examples
///
/// ```
/// use rainfall_idf::{IdfService, IntensityUnit, LatLon, Station};
/// use rainfall_idf::{DurationEntry, IdfIndex, IdfRecord, ReturnPeriod};
///
/// let stations = vec![Station::new("6144478", "LONDON CS", "ON", 43.011, -81.153)];
/// let mut index = IdfIndex::new();
/// index.insert(
///     "6144478".to_string(),
///     IdfRecord::new(vec![DurationEntry::new("1 h", [(ReturnPeriod::TwoYear, 20.0)])]),
/// );
/// let service = IdfService::new(stations, index);
///
/// let nearest = service
///     .find_nearest()
///     .location(LatLon(42.98, -81.25))
///     .province("ON")
///     .call()
///     .unwrap();
/// assert_eq!(nearest.station.station_id, "6144478");
///
/// let curves = service.curves("6144478", IntensityUnit::MillimetersPerHour).unwrap();
/// assert_eq!(curves[0].duration, 60);
/// ```
#[derive(Debug, Clone)]
pub struct IdfService {
    catalog: StationCatalog,
    idf_index: IdfIndex,
}

#[bon]
impl IdfService {
    pub fn new(stations: Vec<Station>, idf_index: IdfIndex) -> Self {
        Self {
            catalog: StationCatalog::new(stations),
            idf_index,
        }
    }

    /// Loads the dataset described by `options` from disk.
    ///
    /// # Errors
    ///
    /// Returns [`RainfallIdfError::DataLoad`] if the data directory cannot be read, a file is
    /// malformed, an IDF key does not fit the configured key strategy, or no IDF data at all
    /// was found.
    pub async fn load(options: &LoadOptions) -> Result<Self, RainfallIdfError> {
        let dataset = load_dataset(options).await?;
        Ok(Self::new(dataset.stations, dataset.idf_index))
    }

    /// All stations in load order.
    pub fn stations(&self) -> &[Station] {
        self.catalog.stations()
    }

    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    pub fn idf_index(&self) -> &IdfIndex {
        &self.idf_index
    }

    pub fn idf_record(&self, station_id: &str) -> Option<&IdfRecord> {
        self.idf_index.get(station_id)
    }

    pub fn has_idf_data(&self, station_id: &str) -> bool {
        self.idf_index.contains_key(station_id)
    }

    /// Finds the best station with IDF data for a location.
    ///
    /// * `.location(LatLon)`: **Required.** The query point.
    /// * `.province(&str)`: Optional province code hint, e.g. `"ON"`.
    /// * `.city(&str)`: Optional city name hint. Together with the province it overrides
    ///   distance when a station name contains the city.
    ///
    /// # Errors
    ///
    /// Returns [`LocateStationError::InvalidQuery`] for out-of-range coordinates and
    /// [`LocateStationError::NoStationWithData`] when no candidate station has IDF data.
    #[builder]
    pub fn find_nearest(
        &self,
        location: LatLon,
        province: Option<&str>,
        city: Option<&str>,
    ) -> Result<NearestStation, LocateStationError> {
        resolve(
            location.0,
            location.1,
            province,
            city,
            &self.catalog,
            &self.idf_index,
        )
    }

    /// Lists stations near a location, closest first.
    ///
    /// * `.location(LatLon)`: **Required.** The query point.
    /// * `.station_limit(usize)`: Optional. Defaults to `5`.
    /// * `.max_distance_km(f64)`: Optional. Defaults to `100.0`.
    /// * `.with_idf_only(bool)`: Optional. Only list stations that have IDF data. Defaults to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateStationError::InvalidQuery`] for out-of-range coordinates.
    #[builder]
    pub fn nearby_stations(
        &self,
        location: LatLon,
        station_limit: Option<usize>,
        max_distance_km: Option<f64>,
        with_idf_only: Option<bool>,
    ) -> Result<Vec<NearestStation>, LocateStationError> {
        validate_coordinates(location.0, location.1)?;
        let station_limit = station_limit.unwrap_or(5);
        let max_distance_km = max_distance_km.unwrap_or(100.0);
        let with_idf_only = with_idf_only.unwrap_or(false);

        Ok(self
            .catalog
            .nearby(
                location.0,
                location.1,
                station_limit,
                max_distance_km,
                |station| !with_idf_only || self.has_idf_data(&station.station_id),
            )
            .into_iter()
            .map(|(station, distance_km)| NearestStation {
                station: station.clone(),
                distance_km,
            })
            .collect())
    }

    /// Intensity curves of a station for the live API.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::StationNotFound`] if the station has no IDF data.
    pub fn curves(&self, station_id: &str, unit: IntensityUnit) -> Result<Vec<CurvePoint>, IdfError> {
        self.record_or_not_found(station_id)
            .map(|record| build_curves(record, unit))
    }

    /// Intensity curves of a station for reports, merging duplicate durations.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::StationNotFound`] if the station has no IDF data.
    pub fn report_curves(
        &self,
        station_id: &str,
        unit: IntensityUnit,
    ) -> Result<Vec<ReportPoint>, IdfError> {
        self.record_or_not_found(station_id)
            .map(|record| build_report_curves(record, unit))
    }

    fn record_or_not_found(&self, station_id: &str) -> Result<&IdfRecord, IdfError> {
        self.idf_index
            .get(station_id)
            .ok_or_else(|| IdfError::StationNotFound(station_id.to_string()))
    }
}
