use serde::{Deserialize, Serialize};

/// The authenticated Spotify account, fetched fresh on every page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub followers: i64,
    pub uri: String,
}
