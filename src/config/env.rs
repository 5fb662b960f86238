//! Environment variable configuration loading.

use super::{ConfigError, ConfigMap, ConfigResult, KNOWN_KEYS, validate};

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "GOOGLE_ADS_";

/// Get the environment variable name for a configuration key.
fn env_key(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_uppercase())
}

/// Load every known key from `GOOGLE_ADS_<KEY>` variables.
pub fn load_from_env() -> ConfigResult<ConfigMap> {
    let mut config = ConfigMap::new();
    for key in KNOWN_KEYS {
        match std::env::var(env_key(key)) {
            Ok(value) => {
                config.insert(key.to_string(), value);
            }
            Err(std::env::VarError::NotPresent) => {}
            Err(e) => return Err(ConfigError::Env(e)),
        }
    }

    validate(&config)?;
    tracing::debug!(keys = config.len(), "configuration loaded from environment");
    Ok(config)
}
