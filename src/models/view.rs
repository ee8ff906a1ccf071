use crate::models::{Track, UserProfile, WeatherSnapshot};
use serde::{Deserialize, Serialize};

/// Everything the user page shows, merged into one payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub user: UserProfile,
    /// Absent when the weather provider was unreachable; the rest of the
    /// page still renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_climate: Option<WeatherSnapshot>,
    pub track_list: Vec<Track>,
}

impl UserView {
    /// Pure field composition; no decisions are made here.
    pub fn assemble(
        user: UserProfile,
        city_climate: Option<WeatherSnapshot>,
        track_list: Vec<Track>,
    ) -> Self {
        Self {
            user,
            city_climate,
            track_list,
        }
    }
}
