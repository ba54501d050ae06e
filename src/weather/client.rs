//! HTTP client for an Open-Meteo compatible forecast endpoint

use super::conditions::{TemperatureUnit, WeatherSnapshot};
use super::location::Coordinates;
use crate::config::WeatherConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Current-condition fields requested from the provider
pub const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m";

/// Errors that can occur while fetching weather
///
/// These never leave [`WeatherClient::fetch`]; they are logged and turned
/// into "no data".
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Network failure, non-success status, or unreadable body
    #[error("weather fetch failed: {0}")]
    FetchFailed(String),

    /// The response parsed but lacked the expected current conditions
    #[error("weather response has no current conditions")]
    ParseEmpty,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
    weather_code: Option<u16>,
    wind_speed_10m: Option<f64>,
    precipitation: Option<f64>,
    relative_humidity_2m: Option<f64>,
}

/// Parse a forecast response body
///
/// Weather code and temperature are required; missing precipitation counts as zero.
pub fn parse_forecast(body: &str, unit: TemperatureUnit) -> Result<WeatherSnapshot, WeatherError> {
    let response: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::FetchFailed(format!("invalid JSON: {e}")))?;
    let current = response.current.ok_or(WeatherError::ParseEmpty)?;

    let (Some(weather_code), Some(temperature)) = (current.weather_code, current.temperature_2m)
    else {
        return Err(WeatherError::ParseEmpty);
    };

    Ok(WeatherSnapshot {
        weather_code,
        temperature,
        unit,
        wind_speed: current.wind_speed_10m,
        precipitation: current.precipitation.unwrap_or(0.0),
        humidity: current.relative_humidity_2m,
    })
}

/// Fetches current conditions for a coordinate
#[derive(Debug, Clone)]
pub struct WeatherClient {
    endpoint: String,
    unit: TemperatureUnit,
    client: reqwest::Client,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("failed to build weather HTTP client, using defaults without a timeout: {e}");
                reqwest::Client::default()
            }
        };
        Self {
            endpoint: config.endpoint.clone(),
            unit: config.temperature_unit,
            client,
        }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Fetch current conditions, reporting why a fetch failed
    pub async fn fetch_snapshot(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let mut query = vec![
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ];
        if let Some(unit) = self.unit.query_value() {
            query.push(("temperature_unit", unit.to_string()));
        }

        debug!(%coords, endpoint = %self.endpoint, "fetching weather");
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::FetchFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WeatherError::FetchFailed(format!("HTTP {}", status.as_u16())));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| WeatherError::FetchFailed(e.to_string()))?;
        parse_forecast(&body, self.unit)
    }

    /// Fetch current conditions, `None` on any failure
    pub async fn fetch(&self, coords: Coordinates) -> Option<WeatherSnapshot> {
        match self.fetch_snapshot(coords).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }
}
