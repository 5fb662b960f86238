//! Configuration loading for the credential resolver.
//!
//! ```rust,no_run
//! use ads_credentials::config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // ~/google-ads.yaml, or the file named by GOOGLE_ADS_CONFIGURATION_FILE_PATH
//! let from_file = config::load_from_storage(None).await?;
//!
//! // GOOGLE_ADS_CLIENT_ID, GOOGLE_ADS_REFRESH_TOKEN, ...
//! let from_env = config::load_from_env()?;
//! # Ok(())
//! # }
//! ```

pub mod env;
pub mod file;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub use env::{ENV_PREFIX, load_from_env};
pub use file::{
    CONFIG_PATH_ENV_VAR, DEFAULT_CONFIG_FILE, default_config_path, load_from_file,
    load_from_storage, parse_yaml,
};

/// Configuration key to value mapping consumed by the resolver.
pub type ConfigMap = HashMap<String, String>;

/// Every key the loaders pick up.
pub const KNOWN_KEYS: &[&str] = &[
    "developer_token",
    "login_customer_id",
    "client_id",
    "client_secret",
    "refresh_token",
    "token_uri",
    "path_to_private_key_file",
    "delegated_account",
];

const LOGIN_CUSTOMER_ID_KEY: &str = "login_customer_id";

/// Errors that can occur in configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {}", path.display())]
    NotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// Invalid configuration value
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The key with invalid value
        key: String,
        /// Error message
        message: String,
    },

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Check values whose format the Ads API constrains.
pub fn validate(config: &ConfigMap) -> ConfigResult<()> {
    if let Some(id) = config.get(LOGIN_CUSTOMER_ID_KEY) {
        validate_login_customer_id(id)?;
    }
    Ok(())
}

/// A login customer ID is ten digits with no dashes.
pub fn validate_login_customer_id(id: &str) -> ConfigResult<()> {
    if id.len() == 10 && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: LOGIN_CUSTOMER_ID_KEY.to_string(),
            message: format!(
                "'{}' must be a string of 10 digits without dashes \
                 (quote it in YAML to keep leading zeros)",
                id
            ),
        })
    }
}
