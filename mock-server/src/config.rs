//! Server configuration, from defaults overridden by `PAYMENTS_*` variables.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Page size applied when a request does not name one.
    pub page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 3000,
            page_size: 5,
        }
    }
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("address", defaults.address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("page_size", i64::from(defaults.page_size))?
            .add_source(Environment::with_prefix("PAYMENTS"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}
