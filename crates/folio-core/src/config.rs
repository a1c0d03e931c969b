//! Engine/gateway configuration. Load from TOML file and environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global application configuration. The bridge credential is deliberately
/// not part of this struct; it is read from the environment only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Application identity shown on the status endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Model requested from the external text-generation backend.
    pub bridge_model: String,
    /// Base URL of the backend API.
    pub bridge_base_url: String,
}

impl EngineConfig {
    /// Load config from file and environment. Precedence: env `FOLIO_CONFIG`
    /// path > `config/gateway.toml` > defaults, with `FOLIO_*` env overrides
    /// applied last.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("FOLIO_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Portfolio Chat Gateway")?
            .set_default("port", 8001_i64)?
            .set_default("bridge_model", "gpt-3.5-turbo")?
            .set_default("bridge_base_url", "https://api.openai.com/v1")?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
