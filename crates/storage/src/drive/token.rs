use crate::StorageError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// POSTs a form to an OAuth token endpoint
pub(crate) async fn request_token(
    http: &reqwest::Client,
    token_uri: &str,
    form: &[(&str, &str)],
) -> Result<TokenResponse, StorageError> {
    let response = http.post(token_uri).form(form).send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StorageError::AuthenticationFailed(format!(
            "token endpoint returned {}: {}",
            status,
            body.trim()
        )));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| StorageError::AuthenticationFailed(format!("invalid token response: {}", e)))
}
