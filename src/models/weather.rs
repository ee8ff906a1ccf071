use serde::{Deserialize, Serialize};

/// Current-weather payload for one city, in the shape the OpenWeather
/// `/data/2.5/weather` endpoint documents. Every field is required; a body
/// missing any of them is treated as a decode failure rather than patched
/// over with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub coord: Coordinate,
    pub weather: Vec<WeatherCondition>,
    pub base: String,
    pub main: WeatherMain,
    pub visibility: i64,
    pub wind: Wind,
    pub clouds: Clouds,
    pub dt: i64,
    pub sys: Sys,
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: i64,
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(rename = "type")]
    pub sys_type: i64,
    pub id: i64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // The documented Guayaquil sample response, verbatim.
    const GUAYAQUIL_SAMPLE: &str = r#"{
        "coord": {"lon": -79.9, "lat": -2.1667},
        "weather": [
            {"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04n"}
        ],
        "base": "stations",
        "main": {
            "temp": 296.31,
            "feels_like": 296.9,
            "temp_min": 295.9,
            "temp_max": 296.31,
            "pressure": 1012,
            "humidity": 85
        },
        "visibility": 10000,
        "wind": {"speed": 2.68, "deg": 285, "gust": 8.05},
        "clouds": {"all": 90},
        "dt": 1629516875,
        "sys": {
            "type": 2,
            "id": 2008064,
            "country": "EC",
            "sunrise": 1629458495,
            "sunset": 1629501876
        },
        "timezone": -18000,
        "id": 3657509,
        "name": "Guayaquil",
        "cod": 200
    }"#;

    #[test]
    fn decodes_documented_sample() {
        let snapshot: WeatherSnapshot = serde_json::from_str(GUAYAQUIL_SAMPLE).unwrap();
        assert_eq!(snapshot.name, "Guayaquil");
        assert_eq!(snapshot.main.temp, 296.31);
        assert_eq!(snapshot.main.humidity, 85);
        assert_eq!(snapshot.visibility, 10000);
        assert_eq!(snapshot.weather[0].id, 804);
        assert_eq!(snapshot.sys.country, "EC");
    }

    #[test]
    fn round_trips_through_json() {
        let snapshot: WeatherSnapshot = serde_json::from_str(GUAYAQUIL_SAMPLE).unwrap();
        let encoded = serde_json::to_string(&snapshot).unwrap();
        let decoded: WeatherSnapshot = serde_json::from_str(&encoded).unwrap();
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn rejects_body_missing_required_block() {
        // Drop the "main" block; decode must fail rather than default it.
        let mut value: serde_json::Value = serde_json::from_str(GUAYAQUIL_SAMPLE).unwrap();
        value.as_object_mut().unwrap().remove("main");
        let result: Result<WeatherSnapshot, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
