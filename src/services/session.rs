use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Bearer token obtained from the code exchange. Expiry is recorded but not
/// enforced; the session TTL bounds how long it can be used.
#[derive(Debug, Clone)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub obtained_at: DateTime<Utc>,
}

/// Where one login attempt currently stands. A session is created on
/// `/login` and only ever moves forward; a failed callback removes it, so a
/// fresh `/login` is the only way to retry.
#[derive(Debug, Clone)]
enum AuthState {
    AwaitingCallback { state_token: String },
    Authenticated { credential: Credential },
}

#[derive(Debug)]
struct Session {
    state: AuthState,
    created_at: Instant,
}

/// Keyed, expiring store for in-flight logins and their credentials. Each
/// browser gets its own session id (round-tripped in a cookie), so two
/// concurrent logins never see each other's state token or credential.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn generate_state_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect()
    }

    /// Starts a new login attempt: a fresh session id plus the anti-forgery
    /// state token the provider must echo back.
    pub async fn begin_login(&self) -> (Uuid, String) {
        let session_id = Uuid::new_v4();
        let state_token = Self::generate_state_token();

        let mut sessions = self.sessions.write().await;
        sessions.insert(
            session_id,
            Session {
                state: AuthState::AwaitingCallback {
                    state_token: state_token.clone(),
                },
                created_at: Instant::now(),
            },
        );

        (session_id, state_token)
    }

    /// Checks the callback's `state` against the token issued for this
    /// session. A mismatch kills the session so the attempt cannot be
    /// resumed; callers must not touch the token endpoint after a mismatch.
    pub async fn validate_state(&self, session_id: Uuid, received_state: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;

        // Taken out of the map up front; only a clean match puts it back.
        let session = sessions.remove(&session_id).ok_or(AppError::Unauthorized)?;
        if session.created_at.elapsed() >= self.ttl {
            return Err(AppError::Unauthorized);
        }

        match &session.state {
            AuthState::AwaitingCallback { state_token } if state_token == received_state => {
                sessions.insert(session_id, session);
                Ok(())
            }
            AuthState::AwaitingCallback { .. } => {
                tracing::warn!(
                    "State mismatch for session {}: got {:?}",
                    session_id,
                    received_state
                );
                Err(AppError::StateMismatch)
            }
            AuthState::Authenticated { .. } => {
                sessions.insert(session_id, session);
                Err(AppError::Unauthorized)
            }
        }
    }

    /// Moves the session to its terminal state. Replaces any previous
    /// credential unconditionally.
    pub async fn store_credential(&self, session_id: Uuid, credential: Credential) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(AppError::Unauthorized)?;

        session.state = AuthState::Authenticated { credential };
        Ok(())
    }

    /// The credential for this session, or `Unauthorized` when the session
    /// is missing, expired, or still mid-login.
    pub async fn credential(&self, session_id: Uuid) -> Result<Credential> {
        let sessions = self.sessions.read().await;

        match sessions.get(&session_id) {
            Some(s) if s.created_at.elapsed() >= self.ttl => Err(AppError::Unauthorized),
            Some(Session {
                state: AuthState::Authenticated { credential },
                ..
            }) => Ok(credential.clone()),
            _ => Err(AppError::Unauthorized),
        }
    }

    /// Ends a login attempt, e.g. after a failed code exchange. The next
    /// `/login` starts from scratch.
    pub async fn abort(&self, session_id: Uuid) {
        self.sessions.write().await.remove(&session_id);
    }

    /// Drops expired sessions. Run periodically; lookups also refuse expired
    /// entries, so the sweep is about memory, not correctness.
    pub async fn sweep_expired(&self) {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.created_at.elapsed() < self.ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!("Swept {} expired sessions", removed);
        }
    }
}
