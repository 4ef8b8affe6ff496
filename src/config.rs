//! Server configuration, from command line flags or environment variables.

use crate::dataset::loader::{KeyStrategy, LoadOptions};
use clap::{Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serve rainfall IDF station data over HTTP", long_about = None)]
pub struct ServerConfig {
    /// Directory with one sub-directory of station and IDF JSON files per province
    #[arg(long, env = "IDF_DATA_DIR", default_value = "data", value_hint = ValueHint::DirPath)]
    pub data_dir: PathBuf,

    /// How keys of the IDF files map to station ids
    #[arg(long, env = "IDF_KEYS", value_enum, default_value_t = KeyStrategy::StationId)]
    pub idf_keys: KeyStrategy,

    /// Address to bind the HTTP server to
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1")]
    pub bind_addr: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Origins allowed by CORS. Any origin is allowed when none are given
    #[arg(long = "allowed-origin", env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::builder()
            .data_dir(self.data_dir.clone())
            .key_strategy(self.idf_keys)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let config = ServerConfig::try_parse_from([
            "rainfall_idf_server",
            "--data-dir",
            "/srv/idf",
            "--idf-keys",
            "composite",
            "--port",
            "8080",
            "--allowed-origin",
            "https://civispec.com,http://localhost:3000",
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/idf"));
        assert_eq!(config.idf_keys, KeyStrategy::Composite);
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.allowed_origins,
            vec!["https://civispec.com", "http://localhost:3000"]
        );

        let options = config.load_options();
        assert_eq!(options.data_dir(), PathBuf::from("/srv/idf").as_path());
        assert_eq!(options.key_strategy(), KeyStrategy::Composite);
    }

    #[test]
    fn rejects_unknown_key_strategy() {
        let result = ServerConfig::try_parse_from(["rainfall_idf_server", "--idf-keys", "guess"]);
        assert!(result.is_err());
    }
}
