//! Gateway configuration from the environment, with local defaults.

use std::net::SocketAddr;

use quote_engine::provider::{dummy_json, zen_quotes};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub dummy_json_base_url: String,
    pub zen_quotes_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("GATEWAY_BIND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        Self {
            bind_addr,
            dummy_json_base_url: std::env::var("DUMMYJSON_BASE_URL")
                .unwrap_or_else(|_| dummy_json::DEFAULT_BASE_URL.to_string()),
            zen_quotes_base_url: std::env::var("ZENQUOTES_BASE_URL")
                .unwrap_or_else(|_| zen_quotes::DEFAULT_BASE_URL.to_string()),
        }
    }
}
