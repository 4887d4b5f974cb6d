//! Application configuration

use std::path::PathBuf;

use dukaan_client::ClientConfig;

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the shop API
    pub api_url: String,
    /// Directory holding the session file
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from `.env` / the process environment.
    ///
    /// `DUKAAN_API_URL` and `DUKAAN_DATA_DIR` override the defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let api_url =
            std::env::var("DUKAAN_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        let data_dir = std::env::var("DUKAAN_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".dukaan"));
        Self { api_url, data_dir }
    }

    /// Client configuration pointing at the configured API
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url)
    }
}
