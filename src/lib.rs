//! # ads-credentials
//!
//! OAuth2 credential resolution for the Google Ads API.
//!
//! Given a configuration mapping (usually loaded from `google-ads.yaml` or the
//! environment), the resolver picks one of two supported flows, builds the
//! matching credential and refreshes it once before handing it back:
//!
//! - **Installed application**: `client_id`, `client_secret`, `refresh_token`
//!   (and optionally `token_uri`)
//! - **Service account**: `path_to_private_key_file`, `delegated_account`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ads_credentials::{CredentialResolver, config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ads_credentials::Error> {
//!     let config = config::load_from_storage(None).await?;
//!     let credential = CredentialResolver::new().resolve(&config).await?;
//!
//!     let (name, value) = credential.authorization_header()?;
//!     println!("{name}: {value}");
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod config;

use std::path::PathBuf;

pub use auth::{
    AccessToken, Credential, CredentialResolver, HttpTokenRefresher, InstalledAppCredential,
    OAuthFlow, RefreshOptions, ServiceAccountCredential, ServiceAccountKey, TokenRefresher,
    resolve_credentials,
};
pub use config::{ConfigError, ConfigMap};

/// Error type for credential resolution.
///
/// The resolver raises [`Error::Configuration`] itself; every other variant
/// comes from building or refreshing a credential and reaches the caller as-is.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Neither OAuth2 flow has all of its required keys.
    #[error(
        "Configuration is incorrectly set up for OAuth2. Define credentials for either the \
         installed application flow ({installed}) or the service account flow ({service})",
        installed = installed_app.join(", "),
        service = service_account.join(", ")
    )]
    Configuration {
        installed_app: &'static [&'static str],
        service_account: &'static [&'static str],
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The service account private key file could not be read.
    #[error("Failed to read private key file {}: {source}", path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The JWT assertion could not be signed.
    #[error("JWT signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint answered with an error.
    #[error("Token endpoint error (HTTP {status}): {error}{}", description.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    TokenEndpoint {
        status: u16,
        error: String,
        description: Option<String>,
    },

    /// Network connectivity or request failed.
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Credential used in a way its state does not allow.
    #[error("Authentication failed: {message}")]
    Auth { message: String },
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid configuration, fixable by the caller
    Configuration,
    /// Key file, signing or token endpoint failures
    Provider,
    /// Network errors that may succeed on retry
    Transient,
}

impl Error {
    pub fn auth(message: impl Into<String>) -> Self {
        Error::Auth {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Configuration { .. } | Error::Config(_) => ErrorCategory::Configuration,
            Error::Network(_) => ErrorCategory::Transient,
            Error::TokenEndpoint {
                status: 500..=599, ..
            } => ErrorCategory::Transient,
            Error::KeyFile { .. }
            | Error::Json(_)
            | Error::Signing(_)
            | Error::TokenEndpoint { .. }
            | Error::Auth { .. } => ErrorCategory::Provider,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }
}

/// Result type alias for ads-credentials operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{INSTALLED_APP_KEYS, SERVICE_ACCOUNT_KEYS};

    #[test]
    fn test_configuration_error_lists_both_key_sets() {
        let err = Error::Configuration {
            installed_app: INSTALLED_APP_KEYS,
            service_account: SERVICE_ACCOUNT_KEYS,
        };
        let message = err.to_string();
        for key in INSTALLED_APP_KEYS.iter().chain(SERVICE_ACCOUNT_KEYS) {
            assert!(message.contains(key), "missing {key} in: {message}");
        }
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_token_endpoint_error_display() {
        let err = Error::TokenEndpoint {
            status: 400,
            error: "invalid_grant".into(),
            description: Some("Token has been expired or revoked.".into()),
        };
        assert_eq!(
            err.to_string(),
            "Token endpoint error (HTTP 400): invalid_grant - Token has been expired or revoked."
        );
        assert_eq!(err.category(), ErrorCategory::Provider);

        let err = Error::TokenEndpoint {
            status: 503,
            error: "temporarily_unavailable".into(),
            description: None,
        };
        assert!(err.is_retryable());
    }
}
