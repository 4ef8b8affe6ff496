//! Actix-Web API server exposing the station catalog and IDF curves.

pub mod handlers;
pub mod models;

use crate::config::ServerConfig;
use crate::error::RainfallIdfError;
use crate::idf_service::IdfService;
use actix_cors::Cors;
use actix_web::{http::Method, middleware, web, App, HttpServer};

/// Registers the `/api` routes. The app must carry a `web::Data<IdfService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/stations", web::get().to(handlers::stations))
            .route("/stations/nearby", web::get().to(handlers::nearby_stations))
            .route("/nearest-station", web::get().to(handlers::nearest_station))
            .route("/idf/curves", web::get().to(handlers::idf_curves))
            .route("/idf/report", web::get().to(handlers::idf_report)),
    );
}

fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods([Method::GET, Method::OPTIONS])
        .allow_any_header()
        .max_age(3600)
}

/// Loads the dataset and serves it until the server is stopped.
///
/// # Errors
///
/// Returns [`RainfallIdfError::DataLoad`] if the dataset cannot be loaded and
/// [`RainfallIdfError::Server`] if binding or running the HTTP server fails.
pub async fn run_server(config: ServerConfig) -> Result<(), RainfallIdfError> {
    log::info!(
        "Loading IDF data from {} ({} keys)...",
        config.data_dir.display(),
        config.idf_keys
    );
    let service = IdfService::load(&config.load_options()).await?;
    log::info!(
        "Loaded {} stations, {} with IDF data",
        service.stations().len(),
        service.idf_index().len()
    );

    let state = web::Data::new(service);
    let allowed_origins = config.allowed_origins.clone();

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))
    .map_err(RainfallIdfError::Server)?
    .run()
    .await
    .map_err(RainfallIdfError::Server)
}
