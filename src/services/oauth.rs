use crate::error::{AppError, Result};
use crate::services::session::Credential;
use base64::Engine;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SCOPES: &str = "user-read-private user-top-read";

/// Drives the authorization-code exchange with Spotify's accounts service.
/// State issuance and comparison live in the session store; this client only
/// builds URLs and talks to the token endpoint.
#[derive(Debug, Clone)]
pub struct SpotifyAuth {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    authorize_url: String,
    token_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
}

impl SpotifyAuth {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            authorize_url: AUTHORIZE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            client: Client::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_endpoints(mut self, authorize_url: &str, token_url: &str) -> Self {
        self.authorize_url = authorize_url.to_string();
        self.token_url = token_url.to_string();
        self
    }

    /// The provider URL the browser is redirected to. Pure string building;
    /// the caller issues the actual redirect.
    pub fn authorize_url(&self, state_token: &str) -> String {
        let params = [
            ("response_type", "code"),
            ("client_id", self.client_id.as_str()),
            ("scope", SCOPES),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("state", state_token),
        ];
        match reqwest::Url::parse_with_params(&self.authorize_url, &params) {
            Ok(url) => url.to_string(),
            // The base URL is a constant; this arm never fires in practice.
            Err(_) => self.authorize_url.clone(),
        }
    }

    /// Exchanges the authorization code for a bearer credential. Callers
    /// must have validated the callback state first.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential> {
        let basic = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.client_id, self.client_secret));

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .timeout(Duration::from_secs(10))
            .header("Authorization", format!("Basic {}", basic))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::TokenExchange(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::TokenExchange(format!(
                "Token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::TokenExchange(format!("Malformed token payload: {}", e)))?;

        Ok(Credential {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            obtained_at: Utc::now(),
        })
    }
}
