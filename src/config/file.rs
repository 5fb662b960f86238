//! YAML file configuration loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{ConfigError, ConfigMap, ConfigResult, KNOWN_KEYS, validate};

/// File name looked up in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = "google-ads.yaml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV_VAR: &str = "GOOGLE_ADS_CONFIGURATION_FILE_PATH";

/// Scalar YAML values; everything ends up as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Nested(serde::de::IgnoredAny),
}

/// Parse a YAML mapping into a [`ConfigMap`].
///
/// Null values are skipped. Nested values are rejected for known keys and
/// ignored for anything else (e.g. a `logging:` section).
pub fn parse_yaml(content: &str) -> ConfigResult<ConfigMap> {
    let mut config = ConfigMap::new();
    if content.trim().is_empty() {
        return Ok(config);
    }

    let raw: HashMap<String, Option<Scalar>> = serde_yaml_bw::from_str(content)?;
    for (key, value) in raw {
        let value = match value {
            None => continue,
            Some(Scalar::Text(s)) => s,
            Some(Scalar::Integer(i)) => i.to_string(),
            Some(Scalar::Float(f)) => f.to_string(),
            Some(Scalar::Flag(b)) => b.to_string(),
            Some(Scalar::Nested(_)) if !KNOWN_KEYS.contains(&key.as_str()) => continue,
            Some(Scalar::Nested(_)) => {
                return Err(ConfigError::InvalidValue {
                    key,
                    message: "expected a scalar value".into(),
                });
            }
        };
        config.insert(key, value);
    }

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a YAML file.
pub async fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<ConfigMap> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config = parse_yaml(&content)?;
    tracing::debug!(path = %path.display(), keys = config.len(), "configuration loaded");
    Ok(config)
}

/// `$GOOGLE_ADS_CONFIGURATION_FILE_PATH`, else `$HOME/google-ads.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR)
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }

    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_CONFIG_FILE))
}

/// Load from `path`, or from [`default_config_path`] when `path` is `None`.
pub async fn load_from_storage(path: Option<&Path>) -> ConfigResult<ConfigMap> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().ok_or_else(|| ConfigError::NotFound {
            path: PathBuf::from("~").join(DEFAULT_CONFIG_FILE),
        })?,
    };
    load_from_file(path).await
}
