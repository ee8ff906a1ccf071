pub mod aggregator;
pub mod filter;
pub mod oauth;
pub mod session;
pub mod spotify;
pub mod weather;

pub use aggregator::DataAggregator;
pub use oauth::SpotifyAuth;
pub use session::SessionStore;
pub use spotify::SpotifyClient;
pub use weather::WeatherClient;
