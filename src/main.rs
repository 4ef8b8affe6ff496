use clap::Parser;
use rainfall_idf::{run_server, ServerConfig};
use std::error::Error;

#[actix_web::main]
async fn main() {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::parse();
    if let Err(e) = run_server(config).await {
        log::error!("{e}");
        let mut source = e.source();
        while let Some(cause) = source {
            log::error!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
