use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{AudioFeatures, Track, UserView, WeatherSnapshot};
use crate::services::filter::select_by_energy;
use crate::services::session::Credential;
use crate::services::spotify::SpotifyClient;
use crate::services::weather::WeatherClient;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Pulls everything the user page needs from Spotify and OpenWeather and
/// reduces it to one view model.
pub struct DataAggregator {
    spotify: Arc<SpotifyClient>,
    weather: Arc<WeatherClient>,
    playlist_id: String,
    weather_city: String,
    energy_threshold: f64,
    features_concurrency: usize,
}

impl DataAggregator {
    pub fn new(spotify: Arc<SpotifyClient>, weather: Arc<WeatherClient>, config: &Config) -> Self {
        Self {
            spotify,
            weather,
            playlist_id: config.playlist_id.clone(),
            weather_city: config.weather_city.clone(),
            energy_threshold: config.energy_threshold,
            features_concurrency: config.features_concurrency.max(1),
        }
    }

    /// Profile, weather, and the low-energy cut of the playlist, in one
    /// round trip from the caller's point of view. Weather failures degrade
    /// the view instead of failing it; profile and playlist failures abort.
    pub async fn user_view(&self, credential: &Credential) -> Result<UserView> {
        require_credential(credential)?;

        let user = self.spotify.current_user(credential).await?;

        let city_climate = match self.weather.current_weather(&self.weather_city).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Weather fetch failed, omitting from view: {}", e);
                None
            }
        };

        let tracks = self
            .spotify
            .playlist_tracks(&self.playlist_id, credential)
            .await?;
        let features = self.fetch_features(&tracks, credential).await;
        let track_list = select_by_energy(&tracks, &features, self.energy_threshold);

        tracing::info!(
            "Aggregated view for {}: {} of {} tracks at or below energy {}",
            user.id,
            track_list.len(),
            tracks.len(),
            self.energy_threshold
        );

        Ok(UserView::assemble(user, city_climate, track_list))
    }

    pub async fn climate(&self) -> Result<WeatherSnapshot> {
        self.weather.current_weather(&self.weather_city).await
    }

    /// One audio-features call per track, fanned out under a concurrency
    /// cap. A failed fetch drops that track from the result and is logged;
    /// no single track is worth failing the page for.
    async fn fetch_features(
        &self,
        tracks: &[Track],
        credential: &Credential,
    ) -> HashMap<String, AudioFeatures> {
        let semaphore = Arc::new(Semaphore::new(self.features_concurrency));
        let mut handles = Vec::with_capacity(tracks.len());

        for track in tracks {
            let spotify = Arc::clone(&self.spotify);
            let credential = credential.clone();
            let track_id = track.id.clone();
            let permit = Arc::clone(&semaphore);

            handles.push(tokio::spawn(async move {
                let _permit = permit.acquire().await;
                let result = spotify.audio_features(&track_id, &credential).await;
                (track_id, result)
            }));
        }

        let mut features = HashMap::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok((track_id, Ok(track_features))) => {
                    // Keyed by the id we asked for, not the echoed one: a
                    // relinked track may come back under a different id and
                    // would otherwise never join with the playlist.
                    features.insert(track_id, track_features);
                }
                Ok((track_id, Err(e))) => {
                    tracing::warn!("Skipping track {}: audio features fetch failed: {}", track_id, e);
                }
                Err(e) => {
                    tracing::warn!("Audio features task panicked: {}", e);
                }
            }
        }

        features
    }
}

/// The aggregator never goes upstream with an absent credential; an empty
/// token is a caller bug surfaced as 401, not a silent no-op.
fn require_credential(credential: &Credential) -> Result<()> {
    if credential.access_token.is_empty() {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
