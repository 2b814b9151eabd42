//! Configuration management for the PageTurner client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Identity-provider settings handed to the external login flow.
/// The client reads tokens produced by that flow but never manages them.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityProviderConfig {
    pub issuer: String,
    pub client_id: String,
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub identity_provider: IdentityProviderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix PAGETURNER_)
            .add_source(
                Environment::with_prefix("PAGETURNER")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override backend URL from API_BASE_URL env var if present
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            issuer: "https://dev-12345.okta.com/oauth2/default".to_string(),
            client_id: "pageturner-web".to_string(),
            redirect_uri: "http://localhost:3000/login/callback".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
