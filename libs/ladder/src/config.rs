//! Startup configuration
//!
//! Credentials are read from the environment exactly once, in
//! [`AppConfig::from_env`]. A `.env` file in the working directory is honored.

use crate::calculator::OrderLadder;
use crate::params::LadderPlan;
use max_client::{MaxAuth, MaxRestClient, RestError, DEFAULT_MAX_URL};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const API_KEY_VAR: &str = "MAX_API_KEY";
pub const API_SECRET_VAR: &str = "MAX_API_SECRET";
pub const API_URL_VAR: &str = "MAX_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Environment variable '{0}' not set")]
    EnvVarMissing(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Exchange credentials and endpoint
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AppConfig {
    /// Load from the process environment (after `.env`)
    ///
    /// Required: `MAX_API_KEY`, `MAX_API_SECRET`.
    /// Optional: `MAX_API_URL` (defaults to the production endpoint).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::EnvVarMissing(name.to_string()))
        };

        let api_key = required(API_KEY_VAR)?;
        let api_secret = required(API_SECRET_VAR)?;
        let base_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MAX_URL.to_string());

        Ok(Self {
            api_key,
            api_secret,
            base_url,
        })
    }

    /// REST client for the configured endpoint and credentials
    pub fn rest_client(&self) -> std::result::Result<MaxRestClient, RestError> {
        let auth = MaxAuth::new(self.api_key.clone(), self.api_secret.clone());
        MaxRestClient::new(self.base_url.clone(), auth)
    }
}

impl LadderPlan {
    /// Load and validate a plan from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml_content = std::fs::read_to_string(path)?;
        let plan: LadderPlan = serde_yaml::from_str(&yaml_content)?;

        let params = plan
            .parameters()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        OrderLadder::build(&params).map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        plan.validated_pair()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        info!("Loaded ladder plan from {}", path.display());
        Ok(plan)
    }
}
