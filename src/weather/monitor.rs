//! Periodic weather refresh
//!
//! [`WeatherMonitor`] fetches once when started and then on a fixed
//! interval. At most one fetch is in flight at a time; a tick or manual
//! refresh arriving meanwhile is dropped, not queued. Dropping the monitor
//! (or calling [`WeatherMonitor::shutdown`]) stops the timer and discards
//! any fetch still running.

use super::client::WeatherClient;
use super::conditions::WeatherSnapshot;
use super::location::{Coordinates, Locator};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default refresh cadence (30 minutes)
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Anything that can report current conditions for a coordinate
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions, `None` when no data is available
    async fn current_conditions(&self, coords: Coordinates) -> Option<WeatherSnapshot>;
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn current_conditions(&self, coords: Coordinates) -> Option<WeatherSnapshot> {
        self.fetch(coords).await
    }
}

/// A successful weather lookup
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub coordinates: Coordinates,
    pub fetched_at: DateTime<Local>,
}

/// What weather-dependent views should display
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WeatherState {
    /// No fetch has completed yet
    #[default]
    Loading,
    /// Fetching failed and there is no earlier report
    Unavailable,
    Ready(WeatherReport),
}

impl WeatherState {
    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            WeatherState::Ready(report) => Some(report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new report was published
    Updated,
    /// No data; the previous report (if any) was kept
    Failed,
    /// Another fetch was already in flight
    Skipped,
    /// The monitor was shut down before the fetch finished
    Cancelled,
}

/// Clears the in-flight flag when a refresh ends or is dropped mid-way
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Refresher {
    locator: Locator,
    source: Arc<dyn WeatherSource>,
    in_flight: AtomicBool,
    state: watch::Sender<WeatherState>,
    cancel: CancellationToken,
}

impl Refresher {
    async fn refresh(&self) -> RefreshOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("weather fetch already in flight, dropping refresh");
            return RefreshOutcome::Skipped;
        }
        let _in_flight = InFlight(&self.in_flight);

        let coordinates = self.locator.resolve().await;
        let snapshot = self.source.current_conditions(coordinates).await;
        if self.cancel.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }

        match snapshot {
            Some(snapshot) => {
                self.state.send_replace(WeatherState::Ready(WeatherReport {
                    snapshot,
                    coordinates,
                    fetched_at: Local::now(),
                }));
                RefreshOutcome::Updated
            }
            None => {
                self.state.send_if_modified(|state| match state {
                    WeatherState::Ready(_) => false,
                    _ => {
                        *state = WeatherState::Unavailable;
                        true
                    }
                });
                RefreshOutcome::Failed
            }
        }
    }

    /// Refresh unless the monitor is shut down first
    async fn refresh_or_cancel(&self) -> RefreshOutcome {
        tokio::select! {
            _ = self.cancel.cancelled() => RefreshOutcome::Cancelled,
            outcome = self.refresh() => outcome,
        }
    }
}

/// Owns the refresh timer and the latest weather state
pub struct WeatherMonitor {
    refresher: Arc<Refresher>,
    state: watch::Receiver<WeatherState>,
    task: JoinHandle<()>,
}

impl WeatherMonitor {
    /// Start refreshing every `interval`, with the first fetch right away
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(locator: Locator, source: Arc<dyn WeatherSource>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(WeatherState::Loading);
        let refresher = Arc::new(Refresher {
            locator,
            source,
            in_flight: AtomicBool::new(false),
            state: tx,
            cancel: CancellationToken::new(),
        });

        let looping = refresher.clone();
        let task = tokio::spawn(async move {
            info!("weather refresh every {}s", interval.as_secs());
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = looping.cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let outcome = looping.refresh_or_cancel().await;
                        debug!(?outcome, "scheduled weather refresh");
                        if outcome == RefreshOutcome::Cancelled {
                            break;
                        }
                    }
                }
            }
            debug!("weather refresh stopped");
        });

        Self {
            refresher,
            state: rx,
            task,
        }
    }

    /// Latest state
    pub fn state(&self) -> WeatherState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.state.clone()
    }

    /// Fetch now, unless a fetch is already in flight
    pub async fn refresh_now(&self) -> RefreshOutcome {
        self.refresher.refresh_or_cancel().await
    }

    /// Wait until the first fetch has finished (successfully or not)
    pub async fn settled(&self) -> WeatherState {
        let mut rx = self.state.clone();
        match rx.wait_for(|s| *s != WeatherState::Loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Stop the timer; no result is published afterwards
    pub fn shutdown(&self) {
        self.refresher.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.refresher.cancel.is_cancelled()
    }
}

impl Drop for WeatherMonitor {
    fn drop(&mut self) {
        self.refresher.cancel.cancel();
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::{FixedLocation, LocationPolicy, TemperatureUnit};
    use std::sync::atomic::AtomicUsize;

    struct FakeSource {
        calls: AtomicUsize,
        fail: AtomicBool,
        delay: Duration,
    }

    impl FakeSource {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
                delay,
            })
        }
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn current_conditions(&self, _coords: Coordinates) -> Option<WeatherSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail.load(Ordering::SeqCst) {
                return None;
            }
            Some(WeatherSnapshot {
                weather_code: 1,
                temperature: 19.0,
                unit: TemperatureUnit::Celsius,
                wind_speed: Some(6.0),
                precipitation: 0.0,
                humidity: None,
            })
        }
    }

    fn locator() -> Locator {
        Locator::new(
            Arc::new(FixedLocation(Coordinates::new(48.8566, 2.3522))),
            LocationPolicy::default(),
        )
    }

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_first_fetch_happens_on_start() {
        let source = FakeSource::new(Duration::ZERO);
        let monitor = WeatherMonitor::start(locator(), source.clone(), HOUR);

        let state = monitor.settled().await;
        let report = state.report().unwrap();
        assert_eq!(report.snapshot.weather_code, 1);
        assert_eq!(report.coordinates, Coordinates::new(48.8566, 2.3522));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_without_report_is_unavailable() {
        let source = FakeSource::new(Duration::ZERO);
        source.fail.store(true, Ordering::SeqCst);
        let monitor = WeatherMonitor::start(locator(), source, HOUR);

        assert_eq!(monitor.settled().await, WeatherState::Unavailable);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_report() {
        let source = FakeSource::new(Duration::ZERO);
        let monitor = WeatherMonitor::start(locator(), source.clone(), HOUR);
        assert!(monitor.settled().await.report().is_some());

        source.fail.store(true, Ordering::SeqCst);
        assert_eq!(monitor.refresh_now().await, RefreshOutcome::Failed);
        assert!(monitor.state().report().is_some());
    }

    #[tokio::test]
    async fn test_overlapping_refresh_is_dropped() {
        let source = FakeSource::new(Duration::from_millis(100));
        let monitor = WeatherMonitor::start(locator(), source.clone(), HOUR);

        let (first, second) = tokio::join!(monitor.refresh_now(), monitor.refresh_now());
        let outcomes = [first, second];
        assert!(outcomes.contains(&RefreshOutcome::Skipped));

        monitor.settled().await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_result_after_teardown() {
        let source = FakeSource::new(Duration::from_millis(50));
        let monitor = WeatherMonitor::start(locator(), source.clone(), HOUR);
        let rx = monitor.subscribe();

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(monitor);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(*rx.borrow(), WeatherState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_on_default_interval() {
        let source = FakeSource::new(Duration::ZERO);
        let monitor = WeatherMonitor::start(locator(), source.clone(), DEFAULT_REFRESH_INTERVAL);
        monitor.settled().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(DEFAULT_REFRESH_INTERVAL - Duration::from_secs(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        tokio::time::sleep(DEFAULT_REFRESH_INTERVAL).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_during_fetch_are_not_queued() {
        // fetches take 150s, ticks are due every 60s
        let source = FakeSource::new(Duration::from_secs(150));
        let monitor = WeatherMonitor::start(locator(), source.clone(), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(monitor.refresh_now().await, RefreshOutcome::Skipped);

        // six ticks are due by 340s but fetches only start at 0s, 150s and 300s
        tokio::time::sleep(Duration::from_secs(330)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert!(monitor.state().report().is_some());
    }

    #[tokio::test]
    async fn test_refresh_after_shutdown_is_cancelled() {
        let source = FakeSource::new(Duration::ZERO);
        let monitor = WeatherMonitor::start(locator(), source, HOUR);
        monitor.settled().await;

        monitor.shutdown();
        assert!(monitor.is_shut_down());
        assert_eq!(monitor.refresh_now().await, RefreshOutcome::Cancelled);
    }
}
