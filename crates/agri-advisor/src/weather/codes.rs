//! WMO weather interpretation codes

use serde::{Deserialize, Serialize};

/// Human-readable text for a WMO code
pub const fn describe(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown conditions",
    }
}

/// Coarse sky state used to pick the dashboard icon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl SkyCondition {
    /// Unlisted codes read as cloudy
    pub const fn from_code(code: u16) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::PartlyCloudy,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 | 80..=82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Cloudy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(0), "Clear sky");
        assert_eq!(describe(63), "Moderate rain");
        assert_eq!(describe(96), "Thunderstorm with slight hail");
        assert_eq!(describe(4), "Unknown conditions");
    }

    #[test]
    fn test_condition_ranges() {
        assert_eq!(SkyCondition::from_code(0), SkyCondition::Clear);
        assert_eq!(SkyCondition::from_code(1), SkyCondition::PartlyCloudy);
        assert_eq!(SkyCondition::from_code(2), SkyCondition::Cloudy);
        assert_eq!(SkyCondition::from_code(3), SkyCondition::Cloudy);
        assert_eq!(SkyCondition::from_code(48), SkyCondition::Fog);
        assert_eq!(SkyCondition::from_code(56), SkyCondition::Drizzle);
        assert_eq!(SkyCondition::from_code(81), SkyCondition::Rain);
        assert_eq!(SkyCondition::from_code(86), SkyCondition::Snow);
        assert_eq!(SkyCondition::from_code(99), SkyCondition::Thunderstorm);
        assert_eq!(SkyCondition::from_code(500), SkyCondition::Cloudy);
    }
}
