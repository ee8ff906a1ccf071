use crate::api::AppState;
use crate::error::{AppError, Result};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "chillcast_session";

/// The caller's session id, read from the session cookie. Requests without
/// a parseable cookie are rejected before the handler runs.
pub struct SessionId(pub Uuid);

fn session_id_from_cookies(header: &str) -> Option<Uuid> {
    header
        .split(';')
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then_some(value)
        })
        .and_then(|value| Uuid::parse_str(value).ok())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &Arc<AppState>) -> Result<Self> {
        let session_id = parts
            .headers
            .get("Cookie")
            .and_then(|v| v.to_str().ok())
            .and_then(session_id_from_cookies)
            .ok_or(AppError::Unauthorized)?;

        Ok(SessionId(session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_session_cookie_among_others() {
        let id = Uuid::new_v4();
        let header = format!("theme=dark; chillcast_session={}; lang=es", id);
        assert_eq!(session_id_from_cookies(&header), Some(id));
    }

    #[test]
    fn rejects_garbage_session_values() {
        assert_eq!(session_id_from_cookies("chillcast_session=not-a-uuid"), None);
        assert_eq!(session_id_from_cookies("other=value"), None);
    }
}
