//! Device location with timeout, cached positions and a fixed fallback
//!
//! [`Locator::resolve`] never fails: every error path ends at the
//! fallback coordinate so weather lookups are never blocked on location.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Used whenever the device position cannot be obtained (New York City)
pub const FALLBACK_COORDINATES: Coordinates = Coordinates::new(40.7128, -74.0060);

#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    /// The device has no geolocation capability
    #[error("geolocation is not supported on this device")]
    Unavailable,

    /// Permission was denied or the lookup failed
    #[error("geolocation denied or failed: {0}")]
    DeniedOrFailed(String),
}

/// One-shot source of the device position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same position (configured coordinates)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// A device without geolocation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

/// Timing rules for location lookups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationPolicy {
    /// Give up on the provider after this long
    pub timeout: Duration,
    /// Reuse a previously obtained position younger than this
    pub max_age: Duration,
    pub fallback: Coordinates,
}

impl Default for LocationPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            max_age: Duration::from_millis(60_000),
            fallback: FALLBACK_COORDINATES,
        }
    }
}

/// Resolves the current position through a provider
pub struct Locator {
    provider: Arc<dyn LocationProvider>,
    policy: LocationPolicy,
    cached: Mutex<Option<(Instant, Coordinates)>>,
}

impl Locator {
    pub fn new(provider: Arc<dyn LocationProvider>, policy: LocationPolicy) -> Self {
        Self {
            provider,
            policy,
            cached: Mutex::new(None),
        }
    }

    fn fresh_cached(&self) -> Option<Coordinates> {
        let cached = *self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        cached
            .filter(|(at, _)| at.elapsed() <= self.policy.max_age)
            .map(|(_, coords)| coords)
    }

    /// Current position, a recent cached one, or the fallback coordinate
    pub async fn resolve(&self) -> Coordinates {
        if let Some(coords) = self.fresh_cached() {
            debug!(%coords, "using cached position");
            return coords;
        }

        match lookup(self.provider.as_ref(), &self.policy).await {
            Some(coords) => {
                *self.cached.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some((Instant::now(), coords));
                coords
            }
            None => self.policy.fallback,
        }
    }
}

/// One-shot lookup without caching, falling back on any failure
pub async fn resolve_location(
    provider: &dyn LocationProvider,
    policy: &LocationPolicy,
) -> Coordinates {
    lookup(provider, policy).await.unwrap_or(policy.fallback)
}

async fn lookup(provider: &dyn LocationProvider, policy: &LocationPolicy) -> Option<Coordinates> {
    match tokio::time::timeout(policy.timeout, provider.current_position()).await {
        Ok(Ok(coords)) => Some(coords),
        Ok(Err(LocationError::Unavailable)) => {
            info!("geolocation unavailable, using fallback position");
            None
        }
        Ok(Err(e)) => {
            warn!("{e}, using fallback position");
            None
        }
        Err(_) => {
            warn!(
                "geolocation timed out after {}ms, using fallback position",
                policy.timeout.as_millis()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLocation {
        calls: AtomicUsize,
        coords: Coordinates,
    }

    #[async_trait]
    impl LocationProvider for CountingLocation {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.coords)
        }
    }

    struct DeniedLocation;

    #[async_trait]
    impl LocationProvider for DeniedLocation {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::DeniedOrFailed("permission denied".to_string()))
        }
    }

    struct HangingLocation;

    #[async_trait]
    impl LocationProvider for HangingLocation {
        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Coordinates::new(0.0, 0.0))
        }
    }

    #[tokio::test]
    async fn test_fixed_location_resolves() {
        let here = Coordinates::new(35.6762, 139.6503);
        let locator = Locator::new(Arc::new(FixedLocation(here)), LocationPolicy::default());
        assert_eq!(locator.resolve().await, here);
    }

    #[tokio::test]
    async fn test_unavailable_uses_fallback() {
        let locator = Locator::new(Arc::new(NoLocation), LocationPolicy::default());
        assert_eq!(locator.resolve().await, FALLBACK_COORDINATES);
    }

    #[tokio::test]
    async fn test_denied_uses_fallback() {
        let locator = Locator::new(Arc::new(DeniedLocation), LocationPolicy::default());
        assert_eq!(locator.resolve().await, FALLBACK_COORDINATES);
    }

    #[tokio::test]
    async fn test_timeout_uses_fallback() {
        let policy = LocationPolicy {
            timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let locator = Locator::new(Arc::new(HangingLocation), policy);
        assert_eq!(locator.resolve().await, FALLBACK_COORDINATES);
    }

    #[tokio::test]
    async fn test_one_shot_resolution() {
        let policy = LocationPolicy::default();
        assert_eq!(resolve_location(&NoLocation, &policy).await, FALLBACK_COORDINATES);

        let here = Coordinates::new(-33.8688, 151.2093);
        assert_eq!(resolve_location(&FixedLocation(here), &policy).await, here);
    }

    #[tokio::test]
    async fn test_recent_position_is_reused() {
        let provider = Arc::new(CountingLocation {
            calls: AtomicUsize::new(0),
            coords: Coordinates::new(51.5072, -0.1276),
        });
        let locator = Locator::new(provider.clone(), LocationPolicy::default());

        locator.resolve().await;
        locator.resolve().await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_position_is_refreshed() {
        let provider = Arc::new(CountingLocation {
            calls: AtomicUsize::new(0),
            coords: Coordinates::new(51.5072, -0.1276),
        });
        let policy = LocationPolicy {
            max_age: Duration::ZERO,
            ..Default::default()
        };
        let locator = Locator::new(provider.clone(), policy);

        locator.resolve().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        locator.resolve().await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }
}
