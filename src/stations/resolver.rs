//! Picks the single best station with IDF data for a query point.
//!
//! Policy, first match wins:
//!
//! 1. **City override.** With a non-empty city hint, the first catalog station whose
//!    normalized name contains the normalized city and whose province equals the province
//!    hint is returned when it has IDF data, however far away it is.
//! 2. **Province-filtered nearest.** Otherwise the candidates are the stations whose
//!    province field carries the hinted province code, or the whole catalog when there are
//!    none. Candidates are stable-sorted by haversine distance, so equal distances keep
//!    load order, and the first one with IDF data is returned.

use crate::stations::catalog::StationCatalog;
use crate::stations::error::LocateStationError;
use crate::stations::geodesic::{haversine, validate_coordinates};
use crate::types::idf_record::IdfIndex;
use crate::types::province::{extract_province_code, ProvinceCode};
use crate::types::station::Station;
use log::debug;
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};

/// A resolved station together with its distance from the query point.
///
/// Serializes as the station's own fields plus `distance_km`, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestStation {
    #[serde(flatten)]
    pub station: Station,
    #[serde(serialize_with = "round_to_two_decimals")]
    pub distance_km: f64,
}

fn round_to_two_decimals<S: Serializer>(distance_km: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((distance_km * 100.0).round() / 100.0)
}

/// Lowercases and strips spaces so "Thunder Bay" matches "THUNDERBAY A".
fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

fn find_by_city_and_province<'a>(
    city: &str,
    province: &str,
    stations: &'a [Station],
) -> Option<&'a Station> {
    let city = normalize_name(city);
    if city.is_empty() {
        return None;
    }
    stations.iter().find(|station| {
        normalize_name(station.display_name()).contains(&city)
            && station.province.eq_ignore_ascii_case(province)
    })
}

/// Resolves the best station with IDF data for a query point.
///
/// # Errors
///
/// * [`LocateStationError::InvalidQuery`] if the coordinates are not finite or out of range.
/// * [`LocateStationError::NoStationWithData`] if no candidate has IDF data, including when
///   the catalog is empty.
pub fn resolve(
    lat: f64,
    lon: f64,
    province_hint: Option<&str>,
    city_hint: Option<&str>,
    catalog: &StationCatalog,
    idf_index: &IdfIndex,
) -> Result<NearestStation, LocateStationError> {
    validate_coordinates(lat, lon)?;
    let province_hint = province_hint.map(str::trim).filter(|p| !p.is_empty());
    let stations = catalog.stations();

    if let (Some(city), Some(province)) = (city_hint, province_hint) {
        if let Some(station) = find_by_city_and_province(city, province, stations) {
            if idf_index.contains_key(&station.station_id) {
                debug!(
                    "Preferred station match by city '{}': {} ({})",
                    city,
                    station.station_id,
                    station.display_name()
                );
                return Ok(NearestStation {
                    station: station.clone(),
                    distance_km: haversine(lat, lon, station.lat, station.lon),
                });
            }
            debug!(
                "City match {} for '{}' has no IDF data, falling back to distance",
                station.station_id, city
            );
        }
    }

    let province_code = province_hint.and_then(|p| p.parse::<ProvinceCode>().ok());
    let mut candidates: Vec<&Station> = match province_code {
        Some(code) => stations
            .iter()
            .filter(|s| extract_province_code(&s.province) == Some(code))
            .collect(),
        None => Vec::new(),
    };
    if candidates.is_empty() {
        debug!(
            "No stations match province {:?}, falling back to all {} stations",
            province_hint,
            stations.len()
        );
        candidates = stations.iter().collect();
    }

    let mut by_distance: Vec<(&Station, f64)> = candidates
        .into_iter()
        .map(|s| (s, haversine(lat, lon, s.lat, s.lon)))
        .collect();
    // Stable: equal distances keep catalog order.
    by_distance.sort_by_key(|(_, dist)| OrderedFloat(*dist));

    by_distance
        .into_iter()
        .find(|(station, _)| {
            let has_data = idf_index.contains_key(&station.station_id);
            if !has_data {
                debug!("Station {} is nearby but has no IDF data", station.station_id);
            }
            has_data
        })
        .map(|(station, distance_km)| NearestStation {
            station: station.clone(),
            distance_km,
        })
        .ok_or(LocateStationError::NoStationWithData)
}
