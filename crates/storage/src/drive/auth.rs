use super::credentials::{AuthorizedUserToken, ClientSecrets, ServiceAccountKey};
use super::flow;
use super::token::request_token;
use crate::StorageError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use qrshare_config::DriveSettings;
use serde::Serialize;
use std::path::Path;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Resolves a Drive access token from whichever credential material exists
pub struct Authenticator {
    settings: DriveSettings,
    http: reqwest::Client,
    service_token: Mutex<Option<CachedToken>>,
    // One consent flow at a time
    flow_lock: tokio::sync::Mutex<()>,
}

impl Authenticator {
    pub fn new(settings: DriveSettings, http: reqwest::Client) -> Self {
        Self {
            settings,
            http,
            service_token: Mutex::new(None),
            flow_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// True when any service account, token or client secrets file exists
    pub fn credentials_available(&self) -> bool {
        self.uses_service_account()
            || self.settings.token_file.exists()
            || self.settings.credentials_file.exists()
    }

    pub fn uses_service_account(&self) -> bool {
        self.settings.service_account_file.exists()
    }

    pub async fn access_token(&self) -> Result<String, StorageError> {
        if self.uses_service_account() {
            tracing::debug!("Using service account authentication");
            return self.service_account_token().await;
        }

        if self.settings.token_file.exists() {
            tracing::debug!("Using persisted user token");
            return self.user_token().await;
        }

        if self.settings.credentials_file.exists() {
            tracing::warn!("No persisted token found, starting interactive authorization");
            return self.interactive_token().await;
        }

        Err(StorageError::CredentialsUnavailable(
            "no service account, token or client secrets file found".to_string(),
        ))
    }

    async fn service_account_token(&self) -> Result<String, StorageError> {
        let now = Utc::now();

        if let Some(cached) = self.service_token.lock().as_ref() {
            if cached.expires_at > now + Duration::seconds(super::credentials::EXPIRY_SKEW_SECS) {
                return Ok(cached.value.clone());
            }
        }

        let key: ServiceAccountKey = read_json(&self.settings.service_account_file, "service account").await?;

        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: self.settings.scopes.join(" "),
            aud: &key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            StorageError::AuthenticationFailed(format!("invalid service account private key: {}", e))
        })?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| StorageError::AuthenticationFailed(format!("failed to sign assertion: {}", e)))?;

        let response = request_token(
            &self.http,
            &key.token_uri,
            &[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())],
        )
        .await?;

        let expires_at = now + Duration::seconds(response.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS));
        *self.service_token.lock() = Some(CachedToken {
            value: response.access_token.clone(),
            expires_at,
        });

        tracing::info!("Service account credentials loaded");
        Ok(response.access_token)
    }

    async fn user_token(&self) -> Result<String, StorageError> {
        let mut token: AuthorizedUserToken = read_json(&self.settings.token_file, "token").await?;
        let now = Utc::now();

        if let Some(access_token) = token.valid_access_token(now) {
            return Ok(access_token.to_string());
        }

        let Some(refresh_token) = token.refresh_token.clone() else {
            return Err(StorageError::AuthenticationFailed("Invalid credentials".to_string()));
        };

        tracing::info!("Refreshing expired credentials...");
        let refreshed = request_token(
            &self.http,
            &token.token_uri,
            &[
                ("grant_type", "refresh_token"),
                ("client_id", token.client_id.as_str()),
                ("client_secret", token.client_secret.as_str()),
                ("refresh_token", refresh_token.as_str()),
            ],
        )
        .await;

        match refreshed {
            Ok(response) => {
                token.token = Some(response.access_token.clone());
                token.expiry = response.expires_in.map(|secs| now + Duration::seconds(secs));
                if response.refresh_token.is_some() {
                    token.refresh_token = response.refresh_token;
                }
                self.persist_user_token(&token).await?;
                tracing::info!("Credentials refreshed");
                Ok(response.access_token)
            }
            Err(e) => {
                tracing::error!("Failed to refresh credentials: {}", e);
                tracing::info!("Removing invalid token, will need to re-authenticate");
                match tokio::fs::remove_file(&self.settings.token_file).await {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
                self.interactive_token().await
            }
        }
    }

    async fn interactive_token(&self) -> Result<String, StorageError> {
        if !self.settings.interactive_auth {
            return Err(StorageError::AuthenticationFailed(
                "interactive authorization is disabled".to_string(),
            ));
        }

        if !self.settings.credentials_file.exists() {
            return Err(StorageError::CredentialsUnavailable(format!(
                "{} not found",
                self.settings.credentials_file.display()
            )));
        }

        let _guard = self.flow_lock.lock().await;

        // Another request may have completed the flow while we waited
        if self.settings.token_file.exists() {
            let token: AuthorizedUserToken = read_json(&self.settings.token_file, "token").await?;
            if let Some(access_token) = token.valid_access_token(Utc::now()) {
                return Ok(access_token.to_string());
            }
        }

        let secrets: ClientSecrets = read_json(&self.settings.credentials_file, "client secrets").await?;
        let client = secrets.into_client().ok_or_else(|| {
            StorageError::AuthenticationFailed(
                "client secrets file has no 'installed' or 'web' client".to_string(),
            )
        })?;

        let token = flow::authorize(
            &self.http,
            &client,
            &self.settings.scopes,
            std::time::Duration::from_secs(self.settings.auth_timeout_secs),
        )
        .await?;

        self.persist_user_token(&token).await?;
        tracing::info!("New token file created at {}", self.settings.token_file.display());

        token
            .token
            .ok_or_else(|| StorageError::AuthenticationFailed("authorization returned no access token".to_string()))
    }

    async fn persist_user_token(&self, token: &AuthorizedUserToken) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(token)
            .map_err(|e| StorageError::AuthenticationFailed(format!("failed to serialize token: {}", e)))?;
        tokio::fs::write(&self.settings.token_file, json).await?;
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T, StorageError> {
    let content = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|e| {
        StorageError::AuthenticationFailed(format!("invalid {} file '{}': {}", what, path.display(), e))
    })
}
