//! Open-Meteo forecast client (no API key needed)

use std::time::Duration;

use async_trait::async_trait;

use super::{Coordinates, WeatherClient, WeatherReport};
use crate::error::{AdvisorError, Result};

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";
const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset";

pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.into(),
        })
    }

    /// `OPEN_METEO_BASE_URL` overrides the public endpoint
    pub fn from_env() -> Result<Self> {
        let client = Self::new()?;
        match std::env::var("OPEN_METEO_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => client.with_base_url(&url),
            _ => Ok(client),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        url::Url::parse(trimmed)
            .map_err(|e| AdvisorError::Config(format!("Invalid weather base URL {trimmed}: {e}")))?;
        self.base_url = trimmed.to_string();
        Ok(self)
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    async fn current(&self, at: Coordinates) -> Result<WeatherReport> {
        let url = format!("{}/forecast", self.base_url);
        tracing::debug!(latitude = at.latitude, longitude = at.longitude, "Fetching weather");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", at.latitude.to_string()),
                ("longitude", at.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Weather(format!(
                "Failed to fetch weather data: HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn name(&self) -> &str {
        "Open-Meteo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::SkyCondition;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn forecast_body() -> serde_json::Value {
        json!({
            "latitude": 28.625,
            "longitude": 77.25,
            "timezone": "Asia/Kolkata",
            "current_units": {"temperature_2m": "°C", "wind_speed_10m": "km/h"},
            "current": {
                "time": "2024-06-10T14:00",
                "temperature_2m": 41.4,
                "relative_humidity_2m": 18,
                "apparent_temperature": 43.9,
                "weather_code": 0,
                "wind_speed_10m": 14.8
            },
            "daily": {
                "time": ["2024-06-10"],
                "weather_code": [0],
                "temperature_2m_max": [44.1],
                "temperature_2m_min": [31.0],
                "sunrise": ["2024-06-10T05:23"],
                "sunset": ["2024-06-10T19:18"]
            }
        })
    }

    #[tokio::test]
    async fn test_fetches_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "28.61"))
            .and(query_param("longitude", "77.2"))
            .and(query_param("timezone", "auto"))
            .and(query_param("current", CURRENT_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenMeteoClient::new().unwrap().with_base_url(&server.uri()).unwrap();
        let summary = client.summary(Coordinates::new(28.61, 77.2).unwrap()).await.unwrap();

        assert_eq!(summary.temperature, 41);
        assert_eq!(summary.feels_like, 44);
        assert_eq!(summary.description, "Clear sky");
        assert_eq!(summary.condition, SkyCondition::Clear);
        assert_eq!(summary.sunrise.as_deref(), Some("05:23"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = OpenMeteoClient::new().unwrap().with_base_url(&server.uri()).unwrap();
        let err = client.current(Coordinates::new(0.0, 0.0).unwrap()).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Weather(_)));
        assert!(!err.is_client_error());
    }
}
