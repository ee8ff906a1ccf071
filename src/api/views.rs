use crate::api::middleware::SessionId;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{UserView, WeatherSnapshot};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn view_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user", get(user))
        .route("/climate", get(climate))
        .route("/ping", get(ping))
}

/// The assembled page payload. Requires an authenticated session.
async fn user(
    State(state): State<Arc<AppState>>,
    SessionId(session_id): SessionId,
) -> Result<Json<UserView>> {
    let credential = state.sessions.credential(session_id).await?;
    let view = state.aggregator.user_view(&credential).await?;
    Ok(Json(view))
}

/// Raw weather for the configured city; no login needed.
async fn climate(State(state): State<Arc<AppState>>) -> Result<Json<WeatherSnapshot>> {
    let snapshot = state.aggregator.climate().await?;
    Ok(Json(snapshot))
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

#[cfg(test)]
mod tests {
    use crate::api::middleware::SESSION_COOKIE;
    use crate::api::testing::test_app;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn ping_answers_pong() {
        let (app, _state) = test_app();

        let response = app
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "message": "pong" }));
    }

    #[tokio::test]
    async fn user_page_without_a_session_is_unauthorized() {
        let (app, _state) = test_app();

        let response = app
            .oneshot(Request::get("/user").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn user_page_mid_login_is_unauthorized_without_going_upstream() {
        let (app, state) = test_app();

        // A session that started a login but never finished the callback.
        let (session_id, _state_token) = state.sessions.begin_login().await;

        let response = app
            .oneshot(
                Request::get("/user")
                    .header(
                        header::COOKIE,
                        format!("{}={}", SESSION_COOKIE, session_id),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
