use crate::stations::geodesic::haversine;
use crate::types::station::Station;
use ordered_float::OrderedFloat;
use rstar::RTree;
use std::collections::HashMap;

/// The station catalog, in load order, with an R-Tree for proximity listings.
///
/// Immutable after construction, so it can be shared freely between request handlers.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<Station>,
    by_id: HashMap<String, usize>,
    rtree: RTree<Station>,
}

impl StationCatalog {
    pub fn new(stations: Vec<Station>) -> Self {
        let mut by_id = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            // First occurrence wins, matching the order-based resolution policy.
            by_id.entry(station.station_id.clone()).or_insert(i);
        }
        let rtree = RTree::bulk_load(stations.clone());
        StationCatalog {
            stations,
            by_id,
            rtree,
        }
    }

    /// All stations in load order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, station_id: &str) -> Option<&Station> {
        self.by_id.get(station_id).map(|&i| &self.stations[i])
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Lists up to `n_results` stations within `max_distance_km` of a point, closest first,
    /// considering only stations accepted by `filter`.
    ///
    /// The R-Tree orders candidates by degree-space distance, which only approximates the
    /// haversine order, so a few more candidates than needed are inspected before sorting.
    pub fn nearby<F>(
        &self,
        latitude: f64,
        longitude: f64,
        n_results: usize,
        max_distance_km: f64,
        filter: F,
    ) -> Vec<(&Station, f64)>
    where
        F: Fn(&Station) -> bool,
    {
        if n_results == 0 {
            return vec![];
        }

        let candidate_limit = n_results.saturating_mul(2).max(20);

        let mut stations_with_dist: Vec<(&Station, f64)> = self
            .rtree
            .nearest_neighbor_iter(&[latitude, longitude])
            .filter(|station| filter(station))
            .take(candidate_limit)
            .filter_map(|station| {
                let dist_km = haversine(latitude, longitude, station.lat, station.lon);
                (dist_km <= max_distance_km).then_some((station, dist_km))
            })
            .collect();

        stations_with_dist.sort_by_key(|(_, dist)| OrderedFloat(*dist));
        stations_with_dist.truncate(n_results);
        stations_with_dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_stations;

    #[test]
    fn looks_up_stations_by_id() {
        let catalog = StationCatalog::new(fixture_stations());
        assert_eq!(catalog.get("6158355").unwrap().name, "TORONTO CITY");
        assert!(catalog.get("0000000").is_none());
        assert_eq!(catalog.len(), fixture_stations().len());
    }

    #[test]
    fn nearby_is_sorted_and_bounded() {
        let catalog = StationCatalog::new(fixture_stations());
        let results = catalog.nearby(43.0, -81.2, 3, 500.0, |_| true);
        assert!(results.len() <= 3);
        assert!(!results.is_empty());
        assert!(results.windows(2).all(|w| w[0].1 <= w[1].1));
        assert!(results.iter().all(|(_, d)| *d <= 500.0));
        assert_eq!(results[0].0.province, "ON");
    }

    #[test]
    fn nearby_applies_filter_and_radius() {
        let catalog = StationCatalog::new(fixture_stations());
        let results = catalog.nearby(49.2, -123.1, 10, 50.0, |s| s.station_id != "1108447");
        assert!(results.iter().all(|(s, _)| s.station_id != "1108447"));
        assert!(results.iter().all(|(s, _)| s.province == "BC"));
        assert!(catalog.nearby(0.0, 0.0, 5, 1.0, |_| true).is_empty());
        assert!(catalog.nearby(43.0, -81.2, 0, 500.0, |_| true).is_empty());
    }

    #[test]
    fn nearby_accepts_unbounded_result_count() {
        let catalog = StationCatalog::new(fixture_stations());
        let results = catalog.nearby(43.0, -81.2, usize::MAX, 20_000.0, |_| true);
        assert_eq!(results.len(), catalog.len());
    }
}
