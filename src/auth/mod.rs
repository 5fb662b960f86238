//! OAuth2 credentials for the Google Ads API.
//!
//! Two flows are supported:
//! - **Installed application**: a long-lived refresh token exchanged for access tokens
//! - **Service account**: a private key signing JWT assertions, impersonating a delegated user

mod credential;
mod flow;
mod refresh;
mod resolver;
mod service_account;

pub use credential::{AccessToken, Credential, InstalledAppCredential, ServiceAccountCredential};
pub use flow::{
    DEFAULT_SCOPES, DEFAULT_TOKEN_URI, INSTALLED_APP_KEYS, OAuthFlow, SERVICE_ACCOUNT_KEYS,
};
pub use refresh::{HttpTokenRefresher, RefreshOptions, TokenRefresher};
pub use resolver::{CredentialResolver, resolve_credentials};
pub use service_account::{DEFAULT_KEY_TOKEN_URI, ServiceAccountKey};
