use std::env;

use crate::topology::RefreshStrategy;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub network_api_url: String,
    pub listen_addr: String,
    pub request_timeout_secs: u64,
    pub refresh_strategy: RefreshStrategy,
    /// Directory of the dashboard bundle; empty disables static serving
    pub frontend_dir: String,
}

impl Config {
    /// Load configuration from environment variables (and `.env`) with defaults
    pub fn load() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!("Loaded environment from {}", path.display());
        }

        Self {
            network_api_url: get_env("NETWORK_API_URL", "http://localhost:3000"),
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            request_timeout_secs: get_env("REQUEST_TIMEOUT_SECS", "30")
                .parse()
                .unwrap_or_else(|_| {
                    tracing::warn!("Invalid REQUEST_TIMEOUT_SECS, using 30");
                    30
                }),
            refresh_strategy: get_env("REFRESH_STRATEGY", "flat")
                .parse()
                .unwrap_or_else(|e| {
                    tracing::warn!("{}, using flat", e);
                    RefreshStrategy::Flat
                }),
            frontend_dir: get_env("FRONTEND_DIR", ""),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
