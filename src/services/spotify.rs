use crate::error::{AppError, Result};
use crate::models::{AudioFeatures, Track, UserProfile};
use crate::services::session::Credential;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const API_BASE: &str = "https://api.spotify.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Spotify Web API client. Every call takes the caller's credential; the
/// client itself holds no auth state.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    id: String,
    display_name: Option<String>,
    followers: Followers,
    uri: String,
}

#[derive(Debug, Deserialize)]
struct Followers {
    total: i64,
}

#[derive(Debug, Deserialize)]
struct PlaylistTracksResponse {
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    // Null for episodes and tracks removed from the catalog.
    track: Option<PlaylistTrack>,
}

#[derive(Debug, Deserialize)]
struct PlaylistTrack {
    id: Option<String>,
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AudioFeaturesResponse {
    id: String,
    energy: f64,
}

impl SpotifyClient {
    pub fn new() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            client: Client::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            client: Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        credential: &Credential,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Spotify request: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(&credential.access_token)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Spotify request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AppError::AuthorizationRejected);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Spotify API error: {} - {}", status, body);
            return Err(AppError::Upstream(format!(
                "Spotify returned status: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Spotify response: {}", e)))
    }

    pub async fn current_user(&self, credential: &Credential) -> Result<UserProfile> {
        let me: MeResponse = self.get_json("/me", credential).await?;
        Ok(profile_from_me(me))
    }

    /// All playable tracks of the playlist, in playlist order. Items with no
    /// track payload (episodes, removed tracks) are skipped.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
        credential: &Credential,
    ) -> Result<Vec<Track>> {
        let path = format!("/playlists/{}/tracks", playlist_id);
        let page: PlaylistTracksResponse = self.get_json(&path, credential).await?;
        Ok(tracks_from_page(page))
    }

    pub async fn audio_features(
        &self,
        track_id: &str,
        credential: &Credential,
    ) -> Result<AudioFeatures> {
        let path = format!("/audio-features/{}", track_id);
        let features: AudioFeaturesResponse = self.get_json(&path, credential).await?;
        Ok(AudioFeatures {
            track_id: features.id,
            energy: features.energy,
        })
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

fn profile_from_me(me: MeResponse) -> UserProfile {
    UserProfile {
        display_name: me.display_name.unwrap_or_else(|| me.id.clone()),
        id: me.id,
        followers: me.followers.total,
        uri: me.uri,
    }
}

fn tracks_from_page(page: PlaylistTracksResponse) -> Vec<Track> {
    page.items
        .into_iter()
        .filter_map(|item| item.track)
        .filter_map(|track| {
            let id = track.id?;
            Some(Track {
                id,
                title: track.name,
                artists: track.artists.into_iter().map(|a| a.name).collect(),
            })
        })
        .collect()
}
