mod api;
mod config;
mod error;
mod models;
mod services;

use crate::api::AppState;
use crate::config::Config;
use crate::services::{DataAggregator, SessionStore, SpotifyAuth, SpotifyClient, WeatherClient};
use axum::{
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chillcast=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Initialize services
    let spotify = Arc::new(SpotifyClient::new());
    let weather = Arc::new(WeatherClient::new(config.openweather_api_key.clone()));
    let aggregator = Arc::new(DataAggregator::new(
        spotify.clone(),
        weather.clone(),
        &config,
    ));
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_seconds,
    )));
    let auth = SpotifyAuth::new(
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
        config.spotify_redirect_uri.clone(),
    );

    // Periodically drop expired login sessions
    let sweeper_sessions = sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            sweeper_sessions.sweep_expired().await;
        }
    });

    let app_state = Arc::new(AppState {
        config: config.clone(),
        sessions,
        auth,
        aggregator,
    });

    // Build router
    let app = Router::new()
        .merge(api::auth_routes())
        .merge(api::view_routes())
        .with_state(app_state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE]),
        );

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
