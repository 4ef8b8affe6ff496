use crate::stations::error::LocateStationError;
use haversine::{distance, Location as HaversineLocation, Units};

/// Great-circle distance in kilometres between two points given in decimal degrees,
/// on a sphere of radius 6371 km.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lon1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}

/// Checks that a query coordinate is a finite, in-range latitude/longitude pair.
pub(crate) fn validate_coordinates(lat: f64, lon: f64) -> Result<(), LocateStationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(LocateStationError::InvalidQuery(format!(
            "latitude {lat} is outside [-90, 90]"
        )));
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(LocateStationError::InvalidQuery(format!(
            "longitude {lon} is outside [-180, 180]"
        )));
    }
    Ok(())
}
