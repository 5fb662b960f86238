//! Token refresh against the OAuth2 token endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use secrecy::ExposeSecret;
use serde::Deserialize;
use url::form_urlencoded;

use super::service_account::JWT_BEARER_GRANT_TYPE;
use super::{AccessToken, Credential};
use crate::{Error, Result};

/// Per-call refresh options, passed through untouched by the resolver.
#[derive(Clone, Debug, Default)]
pub struct RefreshOptions {
    /// Request timeout for the token endpoint round trip.
    pub timeout: Option<Duration>,
}

impl RefreshOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Trait for exchanging a credential's grant for a fresh access token.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Refresher name for debugging.
    fn name(&self) -> &str;

    /// Obtain a new access token and store it on the credential.
    async fn refresh(&self, credential: &mut Credential, options: &RefreshOptions) -> Result<()>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Refresher that talks to the token endpoint over HTTP.
#[derive(Clone, Debug, Default)]
pub struct HttpTokenRefresher {
    http: reqwest::Client,
}

impl HttpTokenRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured HTTP client (proxies, TLS settings).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn grant_body(credential: &Credential) -> Result<String> {
        let mut form = form_urlencoded::Serializer::new(String::new());
        match credential {
            Credential::InstalledApp(c) => {
                form.append_pair("grant_type", "refresh_token")
                    .append_pair("client_id", &c.client_id)
                    .append_pair("client_secret", c.client_secret.expose_secret())
                    .append_pair("refresh_token", c.refresh_token.expose_secret());
            }
            Credential::ServiceAccount(c) => {
                let assertion = c.key.assertion(&c.subject, &c.scopes)?;
                form.append_pair("grant_type", JWT_BEARER_GRANT_TYPE)
                    .append_pair("assertion", &assertion);
            }
        }
        Ok(form.finish())
    }

    async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Error::Network(e),
        };

        match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(parsed) => Error::TokenEndpoint {
                status,
                error: parsed.error,
                description: parsed.error_description,
            },
            Err(_) => Error::TokenEndpoint {
                status,
                error: "unexpected_response".into(),
                description: (!body.is_empty()).then_some(body),
            },
        }
    }
}

/// Out-of-range lifetimes leave the expiry unknown.
fn expiry_from_now(secs: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(secs).and_then(|delta| Utc::now().checked_add_signed(delta))
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    fn name(&self) -> &str {
        "http"
    }

    async fn refresh(&self, credential: &mut Credential, options: &RefreshOptions) -> Result<()> {
        let body = Self::grant_body(credential)?;

        let mut request = self
            .http
            .post(credential.token_uri())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let status = response.status().as_u16();
        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::TokenEndpoint {
                status,
                error: "invalid_response".into(),
                description: Some(e.to_string()),
            })?;
        let expires_at = token.expires_in.and_then(expiry_from_now);

        tracing::debug!(
            credential_type = credential.credential_type(),
            token_uri = credential.token_uri(),
            ?expires_at,
            "access token refreshed"
        );

        credential.set_token(AccessToken::new(token.access_token, expires_at));
        Ok(())
    }
}
