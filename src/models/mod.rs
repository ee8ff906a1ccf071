pub mod track;
pub mod user;
pub mod view;
pub mod weather;

pub use track::{AudioFeatures, Track};
pub use user::UserProfile;
pub use view::UserView;
pub use weather::WeatherSnapshot;
