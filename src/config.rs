use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    /// Must match one of the redirect URIs registered for the Spotify app.
    pub spotify_redirect_uri: String,
    pub openweather_api_key: String,
    pub server_host: String,
    pub server_port: u16,
    pub playlist_id: String,
    pub weather_city: String,
    /// Tracks with energy at or below this value make the cut.
    pub energy_threshold: f64,
    /// Login sessions (and the credentials they hold) expire after this long.
    pub session_ttl_seconds: u64,
    /// Cap on simultaneous audio-features requests per page load.
    pub features_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let spotify_client_id = env::var("SPOTIFY_CLIENT_ID")
            .map_err(|_| anyhow::anyhow!("SPOTIFY_CLIENT_ID environment variable must be set"))?;
        let spotify_client_secret = env::var("SPOTIFY_CLIENT_SECRET").map_err(|_| {
            anyhow::anyhow!("SPOTIFY_CLIENT_SECRET environment variable must be set")
        })?;
        let spotify_redirect_uri = env::var("SPOTIFY_REDIRECT_URI").map_err(|_| {
            anyhow::anyhow!(
                "SPOTIFY_REDIRECT_URI environment variable must be set, \
                e.g. http://localhost:9001/callback"
            )
        })?;
        let openweather_api_key = env::var("OPENWEATHER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENWEATHER_API_KEY environment variable must be set"))?;

        Ok(Config {
            spotify_client_id,
            spotify_client_secret,
            spotify_redirect_uri,
            openweather_api_key,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "9001".to_string())
                .parse()
                .unwrap_or(9001),
            playlist_id: env::var("PLAYLIST_ID")
                .unwrap_or_else(|_| "37i9dQZEVXbMDoHDwVN2tF".to_string()),
            weather_city: env::var("WEATHER_CITY").unwrap_or_else(|_| "Guayaquil".to_string()),
            energy_threshold: env::var("ENERGY_THRESHOLD")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()
                .unwrap_or(0.5),
            session_ttl_seconds: env::var("SESSION_TTL_SECONDS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .unwrap_or(600),
            features_concurrency: env::var("FEATURES_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
        })
    }
}
