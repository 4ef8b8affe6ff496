//! Finds the IDF station for a location and prints its curves.
//!
//! Usage: `cargo run --example nearest_station -- <data-dir> [lat lon province city]`

use rainfall_idf::{IdfService, IntensityUnit, LatLon, LoadOptions, RainfallIdfError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), RainfallIdfError> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let args: Vec<String> = env::args().skip(1).collect();

    let data_dir = args.first().map_or("data", String::as_str);
    let lat = args.get(1).and_then(|v| v.parse().ok()).unwrap_or(42.9849);
    let lon = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(-81.2453);
    let province = args.get(3).map(String::as_str).or(Some("ON"));
    let city = args.get(4).map(String::as_str);

    let service = IdfService::load(&LoadOptions::builder().data_dir(data_dir).build()).await?;

    let nearest = service
        .find_nearest()
        .location(LatLon(lat, lon))
        .maybe_province(province)
        .maybe_city(city)
        .call()?;
    println!(
        "Nearest station with IDF data: {} ({}) at {:.2} km",
        nearest.station.display_name(),
        nearest.station.station_id,
        nearest.distance_km
    );

    let curves = service.curves(&nearest.station.station_id, IntensityUnit::MillimetersPerHour)?;
    for point in curves {
        println!("{:>5} min  {:?}", point.duration, point.intensities);
    }

    Ok(())
}
