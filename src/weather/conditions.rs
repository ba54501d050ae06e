//! Weather snapshot, weather-code taxonomy and the outdoor suitability rule

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit the temperature of a snapshot is expressed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Temperature that must be exceeded for outdoor activities (10 °C / 50 °F)
    pub fn outdoor_threshold(&self) -> f64 {
        match self {
            TemperatureUnit::Celsius => 10.0,
            TemperatureUnit::Fahrenheit => 50.0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Value of the `temperature_unit` query parameter, `None` for the provider default
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            TemperatureUnit::Celsius => None,
            TemperatureUnit::Fahrenheit => Some("fahrenheit"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(format!(
                "Invalid temperature unit '{}'. Valid options are: celsius, fahrenheit",
                s
            )),
        }
    }
}

/// Broad weather category of a WMO weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeatherKind::Clear => "clear",
            WeatherKind::Cloudy => "cloudy",
            WeatherKind::Fog => "fog",
            WeatherKind::Rain => "rain",
            WeatherKind::Snow => "snow",
            WeatherKind::Thunderstorm => "thunderstorm",
            WeatherKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCondition {
    pub kind: WeatherKind,
    pub description: &'static str,
    pub icon: &'static str,
}

const UNKNOWN_CONDITION: WeatherCondition = WeatherCondition {
    kind: WeatherKind::Unknown,
    description: "Unknown",
    icon: "❓",
};

const CONDITIONS: &[(u16, WeatherKind, &str, &str)] = &[
    (0, WeatherKind::Clear, "Clear sky", "☀️"),
    (1, WeatherKind::Clear, "Mainly clear", "🌤️"),
    (2, WeatherKind::Cloudy, "Partly cloudy", "⛅"),
    (3, WeatherKind::Cloudy, "Overcast", "☁️"),
    (45, WeatherKind::Fog, "Fog", "🌫️"),
    (48, WeatherKind::Fog, "Depositing rime fog", "🌫️"),
    (51, WeatherKind::Rain, "Light drizzle", "🌦️"),
    (53, WeatherKind::Rain, "Moderate drizzle", "🌧️"),
    (55, WeatherKind::Rain, "Dense drizzle", "🌧️"),
    (61, WeatherKind::Rain, "Slight rain", "🌦️"),
    (63, WeatherKind::Rain, "Moderate rain", "🌧️"),
    (65, WeatherKind::Rain, "Heavy rain", "🌧️"),
    (71, WeatherKind::Snow, "Slight snow fall", "🌨️"),
    (73, WeatherKind::Snow, "Moderate snow fall", "❄️"),
    (75, WeatherKind::Snow, "Heavy snow fall", "❄️"),
    (80, WeatherKind::Rain, "Slight rain showers", "🌦️"),
    (81, WeatherKind::Rain, "Moderate rain showers", "🌧️"),
    (82, WeatherKind::Rain, "Violent rain showers", "⛈️"),
    (95, WeatherKind::Thunderstorm, "Thunderstorm", "⛈️"),
    (96, WeatherKind::Thunderstorm, "Thunderstorm with hail", "⛈️"),
    (99, WeatherKind::Thunderstorm, "Thunderstorm with heavy hail", "⛈️"),
];

/// Look up the category, description and icon of a weather code
pub fn describe_code(code: u16) -> WeatherCondition {
    CONDITIONS
        .iter()
        .find(|(c, ..)| *c == code)
        .map(|&(_, kind, description, icon)| WeatherCondition {
            kind,
            description,
            icon,
        })
        .unwrap_or(UNKNOWN_CONDITION)
}

/// Current conditions at one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// WMO weather interpretation code
    pub weather_code: u16,
    pub temperature: f64,
    pub unit: TemperatureUnit,
    /// Wind speed at 10 m in km/h
    pub wind_speed: Option<f64>,
    /// Precipitation in mm
    pub precipitation: f64,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
}

impl WeatherSnapshot {
    pub fn condition(&self) -> WeatherCondition {
        describe_code(self.weather_code)
    }

    /// Check whether the weather favors outdoor activities
    ///
    /// All of: no heavy rain, snow or storm (code below 65, or the light
    /// showers code 80), warmer than 10 °C / 50 °F, wind below 25 km/h and
    /// less than 1 mm of precipitation. Unknown wind speed fails the check.
    pub fn outdoor_suitable(&self) -> bool {
        let calm_code = self.weather_code < 65 || self.weather_code == 80;
        let warm = self.temperature > self.unit.outdoor_threshold();
        let calm_wind = self.wind_speed.is_some_and(|w| w < 25.0);
        let dry = self.precipitation < 1.0;
        calm_code && warm && calm_wind && dry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(code: u16, temperature: f64, wind: f64, precipitation: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            weather_code: code,
            temperature,
            unit: TemperatureUnit::Celsius,
            wind_speed: Some(wind),
            precipitation,
            humidity: None,
        }
    }

    #[test]
    fn test_thunderstorm_is_never_suitable() {
        assert!(!snapshot(95, 20.0, 5.0, 0.0).outdoor_suitable());
    }

    #[test]
    fn test_mild_clear_day_is_suitable() {
        assert!(snapshot(0, 18.0, 10.0, 0.0).outdoor_suitable());
        assert!(snapshot(63, 18.0, 10.0, 0.5).outdoor_suitable());
    }

    #[test]
    fn test_light_showers_exception() {
        assert!(snapshot(80, 18.0, 10.0, 0.0).outdoor_suitable());
        assert!(!snapshot(81, 18.0, 10.0, 0.0).outdoor_suitable());
        assert!(!snapshot(65, 18.0, 10.0, 0.0).outdoor_suitable());
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(!snapshot(0, 10.0, 10.0, 0.0).outdoor_suitable());
        assert!(!snapshot(0, 18.0, 25.0, 0.0).outdoor_suitable());
        assert!(!snapshot(0, 18.0, 10.0, 1.0).outdoor_suitable());
    }

    #[test]
    fn test_missing_wind_is_not_suitable() {
        let mut s = snapshot(0, 18.0, 0.0, 0.0);
        s.wind_speed = None;
        assert!(!s.outdoor_suitable());
    }

    #[test]
    fn test_fahrenheit_threshold() {
        let mut s = snapshot(1, 45.0, 5.0, 0.0);
        s.unit = TemperatureUnit::Fahrenheit;
        assert!(!s.outdoor_suitable());
        s.temperature = 64.0;
        assert!(s.outdoor_suitable());
    }

    #[test]
    fn test_code_taxonomy() {
        assert_eq!(describe_code(0).kind, WeatherKind::Clear);
        assert_eq!(describe_code(3).description, "Overcast");
        assert_eq!(describe_code(48).kind, WeatherKind::Fog);
        assert_eq!(describe_code(80).kind, WeatherKind::Rain);
        assert_eq!(describe_code(75).kind, WeatherKind::Snow);
        assert_eq!(describe_code(99).description, "Thunderstorm with heavy hail");
        assert_eq!(describe_code(42).kind, WeatherKind::Unknown);
        assert_eq!(describe_code(42).description, "Unknown");
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("F".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("celsius".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Celsius));
        assert!("kelvin".parse::<TemperatureUnit>().is_err());
    }
}
