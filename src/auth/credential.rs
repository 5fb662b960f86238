//! Credential types.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};

use super::service_account::ServiceAccountKey;
use crate::{Error, Result};

/// An access token issued by the token endpoint.
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub secret: SecretString,
    /// `None` when the endpoint did not report a lifetime.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            secret: SecretString::from(secret.into()),
            expires_at,
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|exp| Utc::now() >= exp)
            .unwrap_or(false)
    }

    /// Check if token needs refresh (within 5 minutes of expiry).
    pub fn needs_refresh(&self) -> bool {
        self.expires_at
            .map(|exp| Utc::now() >= exp - Duration::minutes(5))
            .unwrap_or(false)
    }
}

/// Installed application flow credential.
#[derive(Clone, Debug)]
pub struct InstalledAppCredential {
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
    pub token_uri: String,
    pub token: Option<AccessToken>,
}

impl InstalledAppCredential {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        token_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            refresh_token: SecretString::from(refresh_token.into()),
            token_uri: token_uri.into(),
            token: None,
        }
    }
}

/// Service account flow credential, impersonating `subject`.
#[derive(Clone, Debug)]
pub struct ServiceAccountCredential {
    pub key: ServiceAccountKey,
    pub subject: String,
    pub scopes: Vec<String>,
    pub token: Option<AccessToken>,
}

impl ServiceAccountCredential {
    pub fn new(key: ServiceAccountKey, subject: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            key,
            subject: subject.into(),
            scopes,
            token: None,
        }
    }

    pub fn token_uri(&self) -> &str {
        &self.key.token_uri
    }
}

/// OAuth2 credential for the Google Ads API.
#[derive(Clone, Debug)]
pub enum Credential {
    InstalledApp(InstalledAppCredential),
    ServiceAccount(ServiceAccountCredential),
}

impl Credential {
    /// The current access token, if the credential has been refreshed.
    pub fn token(&self) -> Option<&AccessToken> {
        match self {
            Credential::InstalledApp(c) => c.token.as_ref(),
            Credential::ServiceAccount(c) => c.token.as_ref(),
        }
    }

    pub fn access_token(&self) -> Option<&SecretString> {
        self.token().map(|t| &t.secret)
    }

    pub(crate) fn set_token(&mut self, token: AccessToken) {
        match self {
            Credential::InstalledApp(c) => c.token = Some(token),
            Credential::ServiceAccount(c) => c.token = Some(token),
        }
    }

    /// Endpoint the credential exchanges its grant at.
    pub fn token_uri(&self) -> &str {
        match self {
            Credential::InstalledApp(c) => &c.token_uri,
            Credential::ServiceAccount(c) => c.token_uri(),
        }
    }

    /// Check if credential is expired. A credential without a token counts as expired.
    pub fn is_expired(&self) -> bool {
        self.token().map(AccessToken::is_expired).unwrap_or(true)
    }

    /// Check if credential needs refresh.
    pub fn needs_refresh(&self) -> bool {
        self.token().map(AccessToken::needs_refresh).unwrap_or(true)
    }

    /// Get credential type name.
    pub fn credential_type(&self) -> &'static str {
        match self {
            Credential::InstalledApp(_) => "installed_app",
            Credential::ServiceAccount(_) => "service_account",
        }
    }

    /// Returns the authorization header (name, value).
    pub fn authorization_header(&self) -> Result<(&'static str, String)> {
        let secret = self
            .access_token()
            .ok_or_else(|| Error::auth("credential has no access token; refresh it first"))?;
        Ok((
            "Authorization",
            format!("Bearer {}", secret.expose_secret()),
        ))
    }

    /// Attach the bearer token to an outgoing request.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let (name, value) = self.authorization_header()?;
        Ok(request.header(name, value))
    }
}
