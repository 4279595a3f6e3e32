use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub(crate) const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";

/// Tokens this close to expiry are treated as expired
pub(crate) const EXPIRY_SKEW_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

/// Service account key file as downloaded from the cloud console
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

/// Persisted user authorization, compatible with the `authorized_user`
/// layout written by Google's client libraries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AuthorizedUserToken {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl AuthorizedUserToken {
    /// Access token usable at `now`. A token without expiry is trusted.
    pub fn valid_access_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        match self.expiry {
            Some(expiry) if expiry <= now + Duration::seconds(EXPIRY_SKEW_SECS) => None,
            _ => Some(token),
        }
    }
}

/// OAuth client secrets file (`installed` or `web` application)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ClientSecrets {
    #[serde(default)]
    installed: Option<OAuthClient>,
    #[serde(default)]
    web: Option<OAuthClient>,
}

impl ClientSecrets {
    pub fn into_client(self) -> Option<OAuthClient> {
        self.installed.or(self.web)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}
