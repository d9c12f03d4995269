//! Weather Integration
//!
//! Current conditions for the farmer's location, plus the dashboard
//! projection of them.

mod codes;
mod mock;
mod open_meteo;

pub use codes::{SkyCondition, describe};
pub use mock::MockWeatherClient;
pub use open_meteo::OpenMeteoClient;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// A validated point on the globe
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(AdvisorError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Forecast payload as returned by the weather API
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,

    #[serde(default)]
    pub current_units: CurrentUnits,

    pub daily: DailyForecast,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub weather_code: u16,
    pub wind_speed_10m: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentUnits {
    #[serde(default = "default_temperature_unit")]
    pub temperature_2m: String,
    #[serde(default = "default_wind_unit")]
    pub wind_speed_10m: String,
}

fn default_temperature_unit() -> String {
    "°C".into()
}

fn default_wind_unit() -> String {
    "km/h".into()
}

impl Default for CurrentUnits {
    fn default() -> Self {
        Self {
            temperature_2m: default_temperature_unit(),
            wind_speed_10m: default_wind_unit(),
        }
    }
}

/// Per-day arrays, today first
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub weather_code: Vec<u16>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
}

/// What the dashboard weather card shows
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub temperature: i64,
    pub temperature_unit: String,
    pub feels_like: i64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_speed_unit: String,
    pub weather_code: u16,
    pub description: String,
    pub condition: SkyCondition,
    pub high: Option<i64>,
    pub low: Option<i64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl WeatherSummary {
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_report(report: &WeatherReport) -> Self {
        let current = &report.current;
        let round = |v: f64| v.round() as i64;

        Self {
            temperature: round(current.temperature_2m),
            temperature_unit: report.current_units.temperature_2m.clone(),
            feels_like: round(current.apparent_temperature),
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            wind_speed_unit: report.current_units.wind_speed_10m.clone(),
            weather_code: current.weather_code,
            description: describe(current.weather_code).to_string(),
            condition: SkyCondition::from_code(current.weather_code),
            high: report.daily.temperature_2m_max.first().copied().map(round),
            low: report.daily.temperature_2m_min.first().copied().map(round),
            sunrise: report.daily.sunrise.first().and_then(|t| clock_time(t)),
            sunset: report.daily.sunset.first().and_then(|t| clock_time(t)),
        }
    }
}

/// `2024-05-01T06:03` (local ISO time) → `06:03`
fn clock_time(timestamp: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

/// Source of current weather (Strategy pattern)
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch current conditions and today's forecast
    async fn current(&self, at: Coordinates) -> Result<WeatherReport>;

    /// Fetch and project for the dashboard
    async fn summary(&self, at: Coordinates) -> Result<WeatherSummary> {
        let report = self.current(at).await?;
        Ok(WeatherSummary::from_report(&report))
    }

    /// Client name for logs and health output
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_bounds() {
        assert!(Coordinates::new(12.97, 77.59).is_ok());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_summary_projection() {
        let report = MockWeatherClient::sample_report();
        let summary = WeatherSummary::from_report(&report);

        assert_eq!(summary.temperature, 29);
        assert_eq!(summary.feels_like, 33);
        assert_eq!(summary.temperature_unit, "°C");
        assert_eq!(summary.description, "Partly cloudy");
        assert_eq!(summary.condition, SkyCondition::Cloudy);
        assert_eq!(summary.sunrise.as_deref(), Some("06:02"));
        assert_eq!(summary.sunset.as_deref(), Some("18:41"));
        assert_eq!(summary.high, Some(32));
    }

    #[test]
    fn test_clock_time_rejects_garbage() {
        assert_eq!(clock_time("2024-05-01T06:03:59").as_deref(), Some("06:03"));
        assert_eq!(clock_time("sunrise"), None);
    }

    #[test]
    fn test_partial_units_fall_back_per_field() {
        let body = serde_json::json!({
            "current": {
                "temperature_2m": 84.2,
                "relative_humidity_2m": 40.0,
                "apparent_temperature": 86.0,
                "weather_code": 0,
                "wind_speed_10m": 9.0
            },
            "current_units": {"temperature_2m": "°F"},
            "daily": {}
        });
        let report: WeatherReport = serde_json::from_value(body).unwrap();
        let summary = WeatherSummary::from_report(&report);

        assert_eq!(summary.temperature_unit, "°F");
        assert_eq!(summary.wind_speed_unit, "km/h");
        assert_eq!(summary.high, None);
    }
}
