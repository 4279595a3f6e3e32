use super::credentials::{AuthorizedUserToken, OAuthClient};
use super::token::request_token;
use crate::StorageError;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Url;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

const SUCCESS_PAGE: &str = "<html><body><h3>Authorization complete.</h3>You may close this window.</body></html>";
const FAILURE_PAGE: &str = "<html><body><h3>Authorization failed.</h3>Check the server logs.</body></html>";

/// Runs the installed-app consent flow on a loopback redirect and exchanges
/// the returned code for a user token
pub(crate) async fn authorize(
    http: &reqwest::Client,
    client: &OAuthClient,
    scopes: &[String],
    timeout: Duration,
) -> Result<AuthorizedUserToken, StorageError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let redirect_uri = format!("http://localhost:{}/", port);
    let state = uuid::Uuid::new_v4().simple().to_string();
    let scope = scopes.join(" ");

    let auth_url = Url::parse_with_params(
        &client.auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", client.client_id.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", state.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| StorageError::AuthenticationFailed(format!("invalid auth_uri: {}", e)))?;

    tracing::warn!("Google Drive authorization required. Open this URL in a browser:");
    tracing::warn!("{}", auth_url);
    tracing::info!("If access is blocked, add your account as a test user of the OAuth client");

    let code = tokio::time::timeout(timeout, wait_for_code(listener, state))
        .await
        .map_err(|_| {
            StorageError::AuthenticationFailed(format!(
                "timed out after {}s waiting for authorization",
                timeout.as_secs()
            ))
        })??;

    let now = Utc::now();
    let response = request_token(
        http,
        &client.token_uri,
        &[
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
        ],
    )
    .await?;

    Ok(AuthorizedUserToken {
        token: Some(response.access_token),
        refresh_token: response.refresh_token,
        token_uri: client.token_uri.clone(),
        client_id: client.client_id.clone(),
        client_secret: client.client_secret.clone(),
        scopes: scopes.to_vec(),
        expiry: response.expires_in.map(|secs| now + ChronoDuration::seconds(secs)),
    })
}

/// Outcome of one redirect: the authorization code, or the provider's error
type Redirect = Result<String, String>;

#[derive(Clone)]
struct RedirectState {
    expected_state: Arc<str>,
    outcome: mpsc::Sender<Redirect>,
}

/// Serves the redirect URI until a matching code or an error arrives
async fn wait_for_code(listener: TcpListener, expected_state: String) -> Result<String, StorageError> {
    let (tx, mut rx) = mpsc::channel::<Redirect>(1);
    let received = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&received);

    let app = Router::new()
        .route("/", get(handle_redirect))
        .fallback(|| async { (StatusCode::NOT_FOUND, Html(FAILURE_PAGE)) })
        .with_state(RedirectState {
            expected_state: expected_state.into(),
            outcome: tx,
        });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let outcome = rx.recv().await;
            *slot.lock() = outcome;
        })
        .await?;

    let outcome = received.lock().take();
    match outcome {
        Some(Ok(code)) => Ok(code),
        Some(Err(error)) => Err(StorageError::AuthenticationFailed(format!(
            "authorization denied: {}",
            error
        ))),
        None => Err(StorageError::AuthenticationFailed(
            "redirect listener stopped before authorization completed".to_string(),
        )),
    }
}

async fn handle_redirect(
    State(state): State<RedirectState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Html<&'static str>) {
    if let Some(error) = params.get("error") {
        let _ = state.outcome.try_send(Err(error.clone()));
        return (StatusCode::BAD_REQUEST, Html(FAILURE_PAGE));
    }

    match (params.get("code"), params.get("state")) {
        (Some(code), Some(returned)) if returned.as_str() == &*state.expected_state => {
            let _ = state.outcome.try_send(Ok(code.clone()));
            (StatusCode::OK, Html(SUCCESS_PAGE))
        }
        _ => {
            tracing::debug!("Ignoring redirect without a matching state");
            (StatusCode::NOT_FOUND, Html(FAILURE_PAGE))
        }
    }
}
