use crate::api::middleware::{SessionId, SESSION_COOKIE};
use crate::api::AppState;
use crate::error::{AppError, Result};
use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
}

/// Starts a login attempt: issues a session with a fresh state token and
/// sends the browser to Spotify's authorize page.
async fn login(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (session_id, state_token) = state.sessions.begin_login().await;
    let url = state.auth.authorize_url(&state_token);

    tracing::info!("Login request, session {}", session_id);

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, session_id, state.config.session_ttl_seconds
    );

    (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(&url))
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Completes the login: checks the echoed state against this session's
/// token, then exchanges the code. Any failure ends the attempt; only a new
/// `/login` can retry.
async fn callback(
    State(state): State<Arc<AppState>>,
    SessionId(session_id): SessionId,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect> {
    if let Some(provider_error) = query.error {
        tracing::warn!("Provider declined authorization: {}", provider_error);
        state.sessions.abort(session_id).await;
        return Err(AppError::TokenExchange(provider_error));
    }

    let received_state = query.state.as_deref().unwrap_or_default();
    state.sessions.validate_state(session_id, received_state).await?;

    // State checked out; only now is the token endpoint contacted.
    let code = match query.code {
        Some(code) => code,
        None => {
            state.sessions.abort(session_id).await;
            return Err(AppError::TokenExchange(
                "Callback carried no authorization code".to_string(),
            ));
        }
    };

    let credential = match state.auth.exchange_code(&code).await {
        Ok(credential) => credential,
        Err(e) => {
            state.sessions.abort(session_id).await;
            return Err(e);
        }
    };

    tracing::debug!(
        "Exchanged code for a {} token valid until {}",
        credential.token_type,
        credential.obtained_at + chrono::Duration::seconds(credential.expires_in)
    );

    state.sessions.store_credential(session_id, credential).await?;
    tracing::info!("Session {} authenticated", session_id);

    Ok(Redirect::to("/user"))
}
