//! OAuth2 flow selection.

use crate::config::ConfigMap;
use crate::{Error, Result};

/// Keys the installed application flow needs.
pub const INSTALLED_APP_KEYS: &[&str] = &["client_id", "client_secret", "refresh_token"];

/// Keys the service account flow needs.
pub const SERVICE_ACCOUNT_KEYS: &[&str] = &["path_to_private_key_file", "delegated_account"];

/// Token endpoint for the installed application flow when `token_uri` is absent.
pub const DEFAULT_TOKEN_URI: &str = "https://accounts.google.com/o/oauth2/token";

/// Scopes requested by service account credentials.
pub const DEFAULT_SCOPES: &[&str] = &["https://www.googleapis.com/auth/adwords"];

const TOKEN_URI_KEY: &str = "token_uri";

/// The flow a configuration mapping selects, with the values it was selected from.
#[derive(Clone, PartialEq, Eq)]
pub enum OAuthFlow {
    InstalledApp {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        token_uri: String,
    },
    ServiceAccount {
        path_to_private_key_file: String,
        delegated_account: String,
    },
}

impl OAuthFlow {
    /// Pick a flow from the configuration.
    ///
    /// The installed application flow wins when both key sets are complete.
    /// Only key presence is checked; values are taken verbatim.
    pub fn select(config: &ConfigMap) -> Result<Self> {
        if let [client_id, client_secret, refresh_token] =
            lookup(config, INSTALLED_APP_KEYS).as_slice()
        {
            return Ok(Self::InstalledApp {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
                refresh_token: refresh_token.to_string(),
                token_uri: config
                    .get(TOKEN_URI_KEY)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
            });
        }

        if let [path, subject] = lookup(config, SERVICE_ACCOUNT_KEYS).as_slice() {
            return Ok(Self::ServiceAccount {
                path_to_private_key_file: path.to_string(),
                delegated_account: subject.to_string(),
            });
        }

        Err(Error::Configuration {
            installed_app: INSTALLED_APP_KEYS,
            service_account: SERVICE_ACCOUNT_KEYS,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            OAuthFlow::InstalledApp { .. } => "installed_app",
            OAuthFlow::ServiceAccount { .. } => "service_account",
        }
    }
}

impl std::fmt::Debug for OAuthFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OAuthFlow::InstalledApp {
                client_id,
                token_uri,
                ..
            } => f
                .debug_struct("InstalledApp")
                .field("client_id", client_id)
                .field("client_secret", &"[redacted]")
                .field("refresh_token", &"[redacted]")
                .field("token_uri", token_uri)
                .finish(),
            OAuthFlow::ServiceAccount {
                path_to_private_key_file,
                delegated_account,
            } => f
                .debug_struct("ServiceAccount")
                .field("path_to_private_key_file", path_to_private_key_file)
                .field("delegated_account", delegated_account)
                .finish(),
        }
    }
}

/// Values for every key, or an empty vec if any key is missing.
fn lookup<'a>(config: &'a ConfigMap, keys: &[&str]) -> Vec<&'a str> {
    keys.iter()
        .map(|key| config.get(*key).map(String::as_str))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}
