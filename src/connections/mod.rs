//! Connections module - commerce platform client factory
//!
//! Process-level glue for callers wiring cached data to a shop admin API.
//! The cache itself never calls this.

use reqwest::blocking::Client;
use serde::Deserialize;

/// Credentials for one shop admin API connection
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    pub shop_name: String,
    pub api_key: String,
    pub password: String,
}

/// A configured handle to a shop's admin API
#[derive(Debug, Clone)]
pub struct ShopClient {
    http: Client,
    base_url: String,
    config: ShopConfig,
}

impl ShopClient {
    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an authenticated GET request against an admin API path.
    #[allow(dead_code)]
    pub fn get(&self, path: &str) -> reqwest::blocking::RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .basic_auth(&self.config.api_key, Some(&self.config.password))
    }
}

/// Connect to the platform with the given credentials.
#[allow(dead_code)]
pub fn connect(config: ShopConfig) -> ShopClient {
    let base_url = format!("https://{}.myshopify.com/admin", config.shop_name);
    ShopClient {
        http: Client::new(),
        base_url,
        config,
    }
}
