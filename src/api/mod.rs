pub mod auth;
pub mod middleware;
pub mod views;

pub use auth::auth_routes;
pub use views::view_routes;

use crate::config::Config;
use crate::services::{DataAggregator, SessionStore, SpotifyAuth};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub auth: SpotifyAuth,
    pub aggregator: Arc<DataAggregator>,
}
