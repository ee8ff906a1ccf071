use crate::error::{AppError, Result};
use crate::models::WeatherSnapshot;
use reqwest::Client;
use std::time::Duration;

const API_BASE: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenWeather current-weather client. Unauthenticated beyond the API key.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: API_BASE.to_string(),
            api_key,
            client: Client::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }

    pub async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/weather", self.base_url);
        tracing::debug!("Weather request for city: {}", city);

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "es"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Weather API error: {} - {}", status, body);
            return Err(AppError::Upstream(format!(
                "Weather provider returned status: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Decode(format!("Weather response: {}", e)))
    }
}
