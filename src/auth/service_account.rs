//! Service account key files and JWT bearer assertions.

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Token endpoint used when the key file does not name one.
pub const DEFAULT_KEY_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

pub(crate) const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Contents of a service account private key JSON file.
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// PEM-encoded RSA private key.
    pub private_key: SecretString,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_KEY_TOKEN_URI.to_string()
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    sub: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl ServiceAccountKey {
    /// Read and parse a key file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::KeyFile {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sign a JWT assertion for the token endpoint, acting as `subject`.
    pub fn assertion(&self, subject: &str, scopes: &[String]) -> Result<String> {
        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let iat = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.client_email,
            sub: subject,
            scope: scopes.join(" "),
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}
