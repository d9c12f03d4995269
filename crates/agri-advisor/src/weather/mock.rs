//! Mock Weather Client
//!
//! Returns a fixed monsoon-season report. For tests and offline demos.

use async_trait::async_trait;

use super::{Coordinates, CurrentConditions, CurrentUnits, DailyForecast, WeatherClient, WeatherReport};
use crate::error::{AdvisorError, Result};

pub struct MockWeatherClient {
    report: WeatherReport,
    failing: bool,
}

impl Default for MockWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWeatherClient {
    pub fn new() -> Self {
        Self {
            report: Self::sample_report(),
            failing: false,
        }
    }

    /// Always return this report
    pub const fn with_report(report: WeatherReport) -> Self {
        Self {
            report,
            failing: false,
        }
    }

    /// Every request fails as if the service were down
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Bengaluru, early afternoon
    pub fn sample_report() -> WeatherReport {
        WeatherReport {
            current: CurrentConditions {
                temperature_2m: 28.6,
                relative_humidity_2m: 64.0,
                apparent_temperature: 32.5,
                weather_code: 2,
                wind_speed_10m: 11.3,
            },
            current_units: CurrentUnits::default(),
            daily: DailyForecast {
                weather_code: vec![2],
                temperature_2m_max: vec![31.8],
                temperature_2m_min: vec![21.4],
                sunrise: vec!["2024-07-01T06:02".into()],
                sunset: vec!["2024-07-01T18:41".into()],
            },
        }
    }
}

#[async_trait]
impl WeatherClient for MockWeatherClient {
    async fn current(&self, _at: Coordinates) -> Result<WeatherReport> {
        if self.failing {
            return Err(AdvisorError::Weather("mock weather service is down".into()));
        }
        Ok(self.report.clone())
    }

    fn name(&self) -> &str {
        "MockWeather"
    }
}
