use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

use crate::mango_query::DEFAULT_MAX_SELECTOR_DEPTH;
use crate::n1ql_query_generator::OutputCompat;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Service configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server host address
    #[validate(length(min = 1, message = "HTTP host cannot be empty"))]
    pub http_host: String,

    /// HTTP server port (1-65535)
    #[validate(range(
        min = 1,
        max = 65535,
        message = "HTTP port must be between 1 and 65535"
    ))]
    pub http_port: u16,

    /// Output compatibility mode for generated statements
    pub compat: OutputCompat,

    /// Maximum nesting depth accepted in a selector
    #[validate(range(
        min = 1,
        max = 1024,
        message = "Max selector depth must be between 1 and 1024"
    ))]
    pub max_selector_depth: usize,

    /// Maximum accepted HTTP request body size
    #[validate(range(
        min = 1024,
        max = 16777216,
        message = "Max body size must be between 1 KiB and 16 MiB"
    ))]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 8091,
            compat: OutputCompat::Legacy,
            max_selector_depth: DEFAULT_MAX_SELECTOR_DEPTH,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            http_host: env::var("MANGO_N1QL_HOST").unwrap_or(defaults.http_host),
            http_port: parse_env_var("MANGO_N1QL_PORT", "8091")?,
            compat: parse_env_var("MANGO_N1QL_COMPAT", "legacy")?,
            max_selector_depth: parse_env_var(
                "MANGO_N1QL_MAX_SELECTOR_DEPTH",
                &defaults.max_selector_depth.to_string(),
            )?,
            max_body_bytes: parse_env_var(
                "MANGO_N1QL_MAX_BODY_BYTES",
                &defaults.max_body_bytes.to_string(),
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides on top of this configuration
    pub fn with_cli(mut self, cli: CliConfig) -> Result<Self, ConfigError> {
        if let Some(host) = cli.http_host {
            self.http_host = host;
        }
        if let Some(port) = cli.http_port {
            self.http_port = port;
        }
        if let Some(compat) = cli.compat {
            self.compat = compat;
        }
        if let Some(depth) = cli.max_selector_depth {
            self.max_selector_depth = depth;
        }

        self.validate()?;
        Ok(self)
    }
}

/// CLI configuration (parsed from command line arguments); unset values keep
/// the environment or file configuration
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub http_host: Option<String>,
    pub http_port: Option<u16>,
    pub compat: Option<OutputCompat>,
    pub max_selector_depth: Option<usize>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
