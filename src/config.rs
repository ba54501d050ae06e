use crate::theme::ThemeId;
use crate::timeline::DEFAULT_SPAN;
use crate::weather::{
    Coordinates, DEFAULT_REFRESH_INTERVAL, FALLBACK_COORDINATES, FixedLocation, LocationPolicy, LocationProvider, Locator,
    NoLocation, TemperatureUnit,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";

/// Application configuration, read from a TOML file
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub weather: WeatherConfig,
    pub location: LocationConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub endpoint: String,
    pub temperature_unit: TemperatureUnit,
    pub request_timeout_secs: u64,
    pub refresh_interval_mins: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WEATHER_ENDPOINT.to_string(),
            temperature_unit: TemperatureUnit::Celsius,
            request_timeout_secs: 10,
            refresh_interval_mins: DEFAULT_REFRESH_INTERVAL.as_secs() / 60,
        }
    }
}

impl WeatherConfig {
    /// Refresh interval, at least one minute
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_mins.max(1).saturating_mul(60))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Fixed device position; geolocation counts as unavailable when unset
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,
    pub timeout_ms: u64,
    pub max_age_ms: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            fallback_latitude: FALLBACK_COORDINATES.latitude,
            fallback_longitude: FALLBACK_COORDINATES.longitude,
            timeout_ms: 10_000,
            max_age_ms: 60_000,
        }
    }
}

impl LocationConfig {
    /// Configured position, only when both coordinates are set
    pub fn fixed(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    pub fn policy(&self) -> LocationPolicy {
        LocationPolicy {
            timeout: Duration::from_millis(self.timeout_ms),
            max_age: Duration::from_millis(self.max_age_ms),
            fallback: Coordinates::new(self.fallback_latitude, self.fallback_longitude),
        }
    }

    pub fn provider(&self) -> Arc<dyn LocationProvider> {
        match self.fixed() {
            Some(coords) => Arc::new(FixedLocation(coords)),
            None => Arc::new(NoLocation),
        }
    }

    pub fn locator(&self) -> Locator {
        Locator::new(self.provider(), self.policy())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ThemeId,
    pub timeline_span: usize,
    pub show_completed: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeId::default(),
            timeline_span: DEFAULT_SPAN,
            show_completed: true,
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Default config location: `$XDG_CONFIG_HOME/task-calendar-mcp/config.toml`
/// (or `~/.config/...`), `None` when neither variable is set
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("task-calendar-mcp").join("config.toml"))
}
