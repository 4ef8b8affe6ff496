//! HTTP handler functions for the IDF API.

use crate::idf::error::IdfError;
use crate::idf_service::{IdfService, LatLon};
use crate::server::models::{
    ApiError, ApiHealth, CurvesParams, CurvesResponse, NearbyStationsParams, NearestStationParams,
};
use crate::stations::error::LocateStationError;
use crate::types::intensity_unit::IntensityUnit;
use actix_web::{web, HttpResponse, HttpResponseBuilder};

/// Upper bound for the `limit` parameter of the nearby listing.
const MAX_NEARBY_LIMIT: usize = 100;

fn error_response(mut builder: HttpResponseBuilder, message: impl Into<String>) -> HttpResponse {
    builder.json(ApiError {
        error: message.into(),
    })
}

fn locate_error_response(e: &LocateStationError) -> HttpResponse {
    match e {
        LocateStationError::InvalidQuery(_) => {
            error_response(HttpResponse::BadRequest(), e.to_string())
        }
        LocateStationError::NoStationWithData => {
            error_response(HttpResponse::NotFound(), e.to_string())
        }
    }
}

fn parse_coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<LatLon, LocateStationError> {
    let parse = |value: Option<&str>, name: &str| {
        value
            .and_then(|v| v.trim().parse::<f64>().ok())
            .ok_or_else(|| {
                LocateStationError::InvalidQuery(format!("missing or non-numeric {name}"))
            })
    };
    Ok(LatLon(parse(lat, "latitude")?, parse(lon, "longitude")?))
}

fn parse_unit(unit: Option<&str>) -> Result<IntensityUnit, String> {
    unit.map_or(Ok(IntensityUnit::default()), str::parse)
}

/// `GET /api/health`
pub async fn health(service: web::Data<IdfService>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        stations: service.stations().len(),
        idf_stations: service.idf_index().len(),
    })
}

/// `GET /api/stations`
///
/// Returns the whole station catalog in load order.
pub async fn stations(service: web::Data<IdfService>) -> HttpResponse {
    HttpResponse::Ok().json(service.stations())
}

/// `GET /api/stations/nearby`
///
/// Lists stations around a point, closest first.
pub async fn nearby_stations(
    service: web::Data<IdfService>,
    params: web::Query<NearbyStationsParams>,
) -> HttpResponse {
    let location = match parse_coordinates(params.lat.as_deref(), params.lon.as_deref()) {
        Ok(location) => location,
        Err(e) => return locate_error_response(&e),
    };

    match service
        .nearby_stations()
        .location(location)
        .maybe_station_limit(params.limit.map(|limit| limit.min(MAX_NEARBY_LIMIT)))
        .maybe_max_distance_km(params.max_distance_km)
        .maybe_with_idf_only(params.with_idf)
        .call()
    {
        Ok(stations) => HttpResponse::Ok().json(stations),
        Err(e) => locate_error_response(&e),
    }
}

/// `GET /api/nearest-station`
///
/// Resolves the best station with IDF data for `lat`/`lon`, honouring the optional
/// `province` and `city_name` hints.
pub async fn nearest_station(
    service: web::Data<IdfService>,
    params: web::Query<NearestStationParams>,
) -> HttpResponse {
    let location = match parse_coordinates(params.lat.as_deref(), params.lon.as_deref()) {
        Ok(location) => location,
        Err(e) => {
            log::warn!("Rejected nearest-station query {params:?}: {e}");
            return locate_error_response(&e);
        }
    };
    log::info!(
        "Nearest station request for lat {}, lon {}, province {:?}, city {:?}",
        location.0,
        location.1,
        params.province,
        params.city_name
    );

    match service
        .find_nearest()
        .location(location)
        .maybe_province(params.province.as_deref())
        .maybe_city(params.city_name.as_deref().map(str::trim))
        .call()
    {
        Ok(nearest) => {
            log::info!(
                "Nearest station with IDF data: {} ({}), {:.2} km",
                nearest.station.station_id,
                nearest.station.display_name(),
                nearest.distance_km
            );
            HttpResponse::Ok().json(nearest)
        }
        Err(e) => locate_error_response(&e),
    }
}

/// `GET /api/idf/curves`
///
/// Intensity curves of one station, sorted by duration in minutes.
pub async fn idf_curves(
    service: web::Data<IdfService>,
    params: web::Query<CurvesParams>,
) -> HttpResponse {
    let Some(station_id) = params.station_id.as_deref().filter(|id| !id.is_empty()) else {
        return error_response(HttpResponse::BadRequest(), "Missing 'stationId' parameter");
    };
    let unit = match parse_unit(params.unit.as_deref()) {
        Ok(unit) => unit,
        Err(message) => return error_response(HttpResponse::BadRequest(), message),
    };

    match service.curves(station_id, unit) {
        Ok(data) => HttpResponse::Ok().json(CurvesResponse {
            station_id,
            unit,
            data,
        }),
        Err(e @ IdfError::StationNotFound(_)) => {
            log::info!("{e}");
            error_response(HttpResponse::NotFound(), e.to_string())
        }
    }
}

/// `GET /api/idf/report`
///
/// Report variant of the curves: fractional durations, identical durations merged.
pub async fn idf_report(
    service: web::Data<IdfService>,
    params: web::Query<CurvesParams>,
) -> HttpResponse {
    let Some(station_id) = params.station_id.as_deref().filter(|id| !id.is_empty()) else {
        return error_response(HttpResponse::BadRequest(), "Missing 'stationId' parameter");
    };
    let unit = match parse_unit(params.unit.as_deref()) {
        Ok(unit) => unit,
        Err(message) => return error_response(HttpResponse::BadRequest(), message),
    };

    match service.report_curves(station_id, unit) {
        Ok(data) => HttpResponse::Ok().json(CurvesResponse {
            station_id,
            unit,
            data,
        }),
        Err(e @ IdfError::StationNotFound(_)) => {
            error_response(HttpResponse::NotFound(), e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::server::configure;
    use crate::test_support::fixture_service;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::Value;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(fixture_service()))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn nearest_station_returns_station_with_distance() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/nearest-station?lat=43.033&lon=-81.151&province=ON")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["stationId"], "6144478");
        assert_eq!(body["name"], "LONDON CS");
        assert!(body["distance_km"].as_f64().unwrap() > 0.0);
    }

    #[actix_web::test]
    async fn nearest_station_honours_city_hint() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/nearest-station?lat=43.65&lon=-79.38&province=ON&city_name=Springfield")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["stationId"], "6000001");
    }

    #[actix_web::test]
    async fn nearest_station_rejects_bad_coordinates() {
        let app = app!();
        for uri in [
            "/api/nearest-station?lat=abc&lon=-81.0",
            "/api/nearest-station?lon=-81.0",
            "/api/nearest-station?lat=95&lon=-81.0",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn curves_are_wrapped_in_data() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/idf/curves?stationId=6144478")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["stationId"], "6144478");
        assert_eq!(body["unit"], "mm/hr");
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data[0]["duration"], 5);
        assert_eq!(data[3]["duration"], 1440);
        assert_eq!(data[3]["100"], 5.0);
    }

    #[actix_web::test]
    async fn curves_error_statuses() {
        let app = app!();
        for (uri, status) in [
            ("/api/idf/curves", StatusCode::BAD_REQUEST),
            ("/api/idf/curves?stationId=6144478&unit=furlongs", StatusCode::BAD_REQUEST),
            ("/api/idf/curves?stationId=6144475", StatusCode::NOT_FOUND),
            ("/api/idf/report?stationId=0000000", StatusCode::NOT_FOUND),
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{uri}");
        }
    }

    #[actix_web::test]
    async fn report_uses_requested_unit() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/idf/report?stationId=6158355&unit=in/hr")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["unit"], "in/hr");
        assert_eq!(body["data"][0]["durationMinutes"], 5.0);
    }

    #[actix_web::test]
    async fn stations_and_health() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/stations").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 9);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
        assert_eq!(body["idfStations"], 7);
    }

    #[actix_web::test]
    async fn nearby_lists_closest_first() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/stations/nearby?lat=49.2&lon=-123.15&limit=2&maxDistanceKm=50")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let stations = body.as_array().unwrap();
        assert_eq!(stations.len(), 2);
        assert!(stations[0]["distance_km"].as_f64() <= stations[1]["distance_km"].as_f64());
    }

    #[actix_web::test]
    async fn nearby_clamps_oversized_limit() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/stations/nearby?lat=43&lon=-81&limit=18446744073709551615&maxDistanceKm=20000")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 9);
    }
}
