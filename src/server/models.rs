//! Query parameters and response bodies of the HTTP API.

use crate::types::intensity_unit::IntensityUnit;
use serde::{Deserialize, Serialize};

/// Coordinates arrive as raw strings so that a non-numeric value becomes an
/// `InvalidQuery` response instead of a generic extractor error.
#[derive(Debug, Deserialize)]
pub struct NearestStationParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub province: Option<String>,
    pub city_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStationsParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub limit: Option<usize>,
    pub max_distance_km: Option<f64>,
    pub with_idf: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvesParams {
    pub station_id: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
    pub stations: usize,
    pub idf_stations: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvesResponse<'a, T> {
    pub station_id: &'a str,
    pub unit: IntensityUnit,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}
