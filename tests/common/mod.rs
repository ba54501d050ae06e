//! Common test utilities for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use task_calendar_mcp::weather::{Coordinates, TemperatureUnit, WeatherSnapshot, WeatherSource};
use task_calendar_mcp::{AppConfig, TaskServerHandler};

/// Weather source returning a fixed snapshot (or nothing)
pub struct StaticWeather {
    pub snapshot: Option<WeatherSnapshot>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl WeatherSource for StaticWeather {
    async fn current_conditions(&self, _coords: Coordinates) -> Option<WeatherSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot.clone()
    }
}

pub fn snapshot(code: u16, temperature: f64, wind: f64, precipitation: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        weather_code: code,
        temperature,
        unit: TemperatureUnit::Celsius,
        wind_speed: Some(wind),
        precipitation,
        humidity: Some(50.0),
    }
}

pub fn sunny() -> WeatherSnapshot {
    snapshot(0, 22.0, 8.0, 0.0)
}

pub fn stormy() -> WeatherSnapshot {
    snapshot(95, 20.0, 5.0, 0.0)
}

/// Handler with default config and the given weather
pub fn get_test_handler(weather: Option<WeatherSnapshot>) -> TaskServerHandler {
    TaskServerHandler::with_weather_source(
        AppConfig::default(),
        Arc::new(StaticWeather {
            snapshot: weather,
            calls: AtomicUsize::new(0),
        }),
    )
}

/// Extract the task ID from an add() response
/// Response format: "Task created with ID: #<id>\n..."
pub fn extract_id_from_response(response: &str) -> String {
    response
        .split("ID: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or("")
        .to_string()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
