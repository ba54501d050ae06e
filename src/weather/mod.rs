//! Weather-driven recommendations
//!
//! - `conditions`: weather snapshot, code taxonomy and the outdoor suitability rule
//! - `recommend`: picks indoor or outdoor tasks for the current weather
//! - `location`: device position with timeout and fallback
//! - `client`: HTTP client for the forecast provider
//! - `monitor`: periodic refresh publishing [`WeatherState`]

mod client;
mod conditions;
mod location;
mod monitor;
mod recommend;

pub use client::{CURRENT_FIELDS, WeatherClient, WeatherError, parse_forecast};
pub use conditions::{
    TemperatureUnit, WeatherCondition, WeatherKind, WeatherSnapshot, describe_code,
};
pub use location::{
    Coordinates, FALLBACK_COORDINATES, FixedLocation, LocationError, LocationPolicy,
    LocationProvider, Locator, NoLocation, resolve_location,
};
pub use monitor::{
    DEFAULT_REFRESH_INTERVAL, RefreshOutcome, WeatherMonitor, WeatherReport, WeatherSource,
    WeatherState,
};
pub use recommend::{RECOMMENDATION_LIMIT, Recommendations, Recommender, recommend};
