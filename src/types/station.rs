//! Defines the weather station record as loaded from the per-province station catalogs,
//! plus the implementations necessary for spatial indexing using the `rstar` crate.

use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// --- Data Structures ---

/// A single climate station from the station catalog.
///
/// The `station_id` is the join key into the IDF dataset: a station is only usable for
/// IDF queries when its identifier is present there.
///
/// Catalog files are produced by several enrichment scripts, so deserialization is lenient:
/// numeric station identifiers are stringified and coordinates may be given as strings.
/// Fields not modelled here (e.g. `provinceCode`, `elevation`) are kept in `extra` and written
/// back unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// The climate identifier of the station (e.g., "6144478").
    #[serde(deserialize_with = "string_or_number")]
    pub station_id: String,
    /// Display name, e.g. "LONDON CS".
    #[serde(default)]
    pub name: String,
    /// Alternative display name written by older catalog versions. Preferred over `name` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,
    /// Free-text province field. Usually a two-letter code, but may be longer (e.g. "ON (Ontario)").
    #[serde(default)]
    pub province: String,
    /// Latitude in decimal degrees.
    #[serde(deserialize_with = "coordinate")]
    pub lat: f64,
    /// Longitude in decimal degrees.
    #[serde(deserialize_with = "coordinate")]
    pub lon: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Station {
    /// Creates a station with only the catalog fields the resolver needs.
    pub fn new(
        station_id: impl Into<String>,
        name: impl Into<String>,
        province: impl Into<String>,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            station_id: station_id.into(),
            name: name.into(),
            station_name: None,
            province: province.into(),
            lat,
            lon,
            extra: Map::new(),
        }
    }

    /// The name used for display and for city matching.
    pub fn display_name(&self) -> &str {
        self.station_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}

fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Coordinate::deserialize(deserializer)? {
        Coordinate::Number(value) => Ok(value),
        Coordinate::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid coordinate '{text}': {e}"))),
    }
}

// --- R-Tree Implementations ---

/// Lets a `Station` live in an R-Tree as a degenerate (point) bounding box at `[lat, lon]`.
impl RTreeObject for Station {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lat, self.lon])
    }
}

/// Squared Euclidean distance in degree space.
///
/// Only used to order R-Tree candidates; real distances are computed with the haversine
/// formula afterwards.
impl PointDistance for Station {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.lat - point[0];
        let dy = self.lon - point[1];
        dx * dx + dy * dy
    }
}
