//! Task Calendar MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a personal
//! task calendar: dated, prioritized tasks viewed on a monthly calendar,
//! rescheduled on a multi-day timeline, with reminders and weather-based
//! activity suggestions.
//!
//! # Architecture
//!
//! - **MCP Layer**: `TaskServerHandler` - tool definitions, delegating to `handlers`
//! - **Session Layer**: `session` module - the task store plus all view state
//! - **Domain Layer**: `tasks`, `calendar`, `timeline`, `notifications`,
//!   `weather`, `theme` - the store and its derived views
//!
//! Tasks live in memory for the lifetime of the server process.
//!
//! # Example
//!
//! ```no_run
//! use task_calendar_mcp::{AppConfig, TaskServerHandler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = TaskServerHandler::new(AppConfig::default());
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod config;
pub mod formatting;
pub mod handlers;
pub mod notifications;
pub mod session;
pub mod tasks;
pub mod theme;
pub mod timeline;
pub mod validation;
pub mod weather;

use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;
use tracing::debug;

// Re-export commonly used types
pub use config::AppConfig;
pub use session::Session;
pub use tasks::{Location, Priority, Sticker, Task, TaskDraft, TaskId, TaskPatch, TaskStore};
pub use weather::{WeatherClient, WeatherMonitor, WeatherSource, WeatherState};

use tasks::local_date_today;

/// MCP Server handler for the task calendar
///
/// Owns the session behind a mutex and a weather monitor that is started the
/// first time a tool needs weather data.
pub struct TaskServerHandler {
    pub(crate) session: Mutex<Session>,
    pub(crate) config: AppConfig,
    weather_source: Arc<dyn WeatherSource>,
    weather: OnceLock<WeatherMonitor>,
}

impl TaskServerHandler {
    /// Create a handler fetching weather over HTTP as configured
    ///
    /// # Arguments
    /// * `config` - Application configuration
    pub fn new(config: AppConfig) -> Self {
        let source = Arc::new(WeatherClient::new(&config.weather));
        Self::with_weather_source(config, source)
    }

    /// Create a handler with a custom weather source
    pub fn with_weather_source(config: AppConfig, weather_source: Arc<dyn WeatherSource>) -> Self {
        let session = Session::new(local_date_today(), &config.ui);
        Self {
            session: Mutex::new(session),
            config,
            weather_source,
            weather: OnceLock::new(),
        }
    }

    pub(crate) fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Weather monitor, started on first use
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn weather_monitor(&self) -> &WeatherMonitor {
        self.weather.get_or_init(|| {
            debug!("starting weather monitor");
            WeatherMonitor::start(
                self.config.location.locator(),
                self.weather_source.clone(),
                self.config.weather.refresh_interval(),
            )
        })
    }

    /// Longest a tool waits for the first weather fetch
    fn first_fetch_wait(&self) -> Duration {
        Duration::from_millis(self.config.location.timeout_ms)
            .saturating_add(Duration::from_secs(self.config.weather.request_timeout_secs))
            .saturating_add(Duration::from_secs(1))
    }

    /// Current weather, waiting a bounded time for the first fetch
    ///
    /// # Arguments
    /// * `refresh` - Request a fetch now (dropped if one is already running)
    pub(crate) async fn current_weather(&self, refresh: bool) -> WeatherState {
        let monitor = self.weather_monitor();
        if refresh {
            let outcome = monitor.refresh_now().await;
            debug!(?outcome, "manual weather refresh");
        }
        match tokio::time::timeout(self.first_fetch_wait(), monitor.settled()).await {
            Ok(state) => state,
            Err(_) => monitor.state(),
        }
    }

    /// Stop background work; the handler stays usable for task operations
    pub fn shutdown(&self) {
        if let Some(monitor) = self.weather.get() {
            monitor.shutdown();
        }
    }
}

/// Personal task calendar with a monthly view, a drag-to-reschedule timeline,
/// reminders, and weather-based suggestions.
///
/// Key concepts:
/// - **Task**: text, date/time, priority (none/low/medium/high), location tag
///   (any/indoor/outdoor), completion flag and decorative stickers
/// - **Selected date**: the day `list` shows; moved by `list`, `calendar` and `select_task`
/// - **Timeline**: a few days side by side with high/medium/low rows; reschedule with `drag`
/// - **Recommendations**: outdoor tasks in good weather, indoor tasks otherwise
///
/// Task IDs use format: #1, #2, #3 (the # is optional)
#[mcp_server]
impl McpServer for TaskServerHandler {
    /// **Add task**: Create a task. Only text is required.
    /// **Defaults**: priority none, scheduled now (today), location any, no stickers.
    #[tool]
    async fn add(
        &self,
        /// Task text (must not be blank)
        text: String,
        /// Priority: none/low/medium/high
        priority: Option<String>,
        /// Schedule: YYYY-MM-DD or YYYY-MM-DD HH:MM
        date: Option<String>,
        /// Location tag: any/indoor/outdoor
        location: Option<String>,
        /// Comma-separated sticker keys (see stickers)
        stickers: Option<String>,
    ) -> McpResult<String> {
        self.handle_add(text, priority, date, location, stickers)
            .await
    }

    /// **List tasks**: Tasks of the selected date (default today).
    /// **Tip**: Pass date to select another day; show_completed=false hides done tasks.
    #[tool]
    async fn list(
        &self,
        /// Select this date first (YYYY-MM-DD)
        date: Option<String>,
        /// Show completed tasks (remembered for later calls)
        show_completed: Option<bool>,
        /// List every task regardless of date
        all: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list(date, show_completed, all).await
    }

    /// **Update task**: Change any subset of text, priority, schedule, location, stickers.
    /// **Tip**: stickers="" removes all stickers. A date without time keeps the time of day.
    #[tool]
    async fn update(
        &self,
        /// Task ID (e.g., "#3")
        id: String,
        /// New text (blank is ignored)
        text: Option<String>,
        /// New priority: none/low/medium/high
        priority: Option<String>,
        /// New schedule: YYYY-MM-DD or YYYY-MM-DD HH:MM
        date: Option<String>,
        /// New location tag: any/indoor/outdoor
        location: Option<String>,
        /// Replace stickers with these comma-separated keys, ""=clear
        stickers: Option<String>,
    ) -> McpResult<String> {
        self.handle_update(id, text, priority, date, location, stickers)
            .await
    }

    /// **Toggle**: Mark a task completed, or open again.
    #[tool]
    async fn toggle(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_toggle(id).await
    }

    /// **Delete**: Remove a task permanently.
    #[tool]
    async fn delete(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete(id).await
    }

    /// **Select task**: Show a task and jump the selected date and calendar to its day.
    #[tool]
    async fn select_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_select_task(id).await
    }

    /// **Add sticker**: Attach a catalog sticker to a task.
    #[tool]
    async fn add_sticker(
        &self,
        /// Task ID
        id: String,
        /// Sticker key (e.g., "birthday", "fish")
        sticker: String,
    ) -> McpResult<String> {
        self.handle_add_sticker(id, sticker).await
    }

    /// **Remove sticker**: Remove the sticker at a position (0-based) from a task.
    #[tool]
    async fn remove_sticker(
        &self,
        /// Task ID
        id: String,
        /// Sticker position, 0 = first
        index: u32,
    ) -> McpResult<String> {
        self.handle_remove_sticker(id, index).await
    }

    /// **Sticker catalog**: Stickers offered for the current theme, or one category.
    #[tool]
    async fn stickers(
        &self,
        /// Category key (events/general/ocean/forest/sunset/moonlight/aurora) or "all"
        category: Option<String>,
    ) -> McpResult<String> {
        self.handle_stickers(category).await
    }

    /// **Calendar**: Month grid with task markers.
    /// **Navigation**: month=YYYY-MM jumps, shift=+1/-1 steps months, select=YYYY-MM-DD picks a day.
    #[tool]
    async fn calendar(
        &self,
        /// Month to view (YYYY-MM)
        month: Option<String>,
        /// Move the viewed month by this many months
        shift: Option<i32>,
        /// Select this date (YYYY-MM-DD)
        select: Option<String>,
    ) -> McpResult<String> {
        self.handle_calendar(month, shift, select).await
    }

    /// **Timeline**: Several days side by side, one row per priority.
    /// **Navigation**: page=next/previous flips whole pages; width picks the day count for a display width.
    #[tool]
    async fn timeline(
        &self,
        /// First visible date (YYYY-MM-DD)
        start: Option<String>,
        /// Number of visible days
        days: Option<u32>,
        /// Display width in pixels (<640: 2 days, <1024: 3, otherwise 5)
        width: Option<u32>,
        /// next/previous
        page: Option<String>,
    ) -> McpResult<String> {
        self.handle_timeline(start, days, width, page).await
    }

    /// **Drag**: Reschedule a task on the timeline.
    /// **Workflow**: pick_up(id) → hover(date, priority) → drop. leave/cancel/status are also available.
    #[tool]
    async fn drag(
        &self,
        /// pick_up/hover/leave/drop/cancel/status
        action: String,
        /// Task ID (pick_up)
        id: Option<String>,
        /// Target date YYYY-MM-DD (hover)
        date: Option<String>,
        /// Target row high/medium/low (hover); omit to keep the task's priority
        priority: Option<String>,
    ) -> McpResult<String> {
        self.handle_drag(action, id, date, priority).await
    }

    /// **Notifications**: Open tasks that are high priority or due within 48 hours (max 5).
    #[tool]
    async fn notifications(&self) -> McpResult<String> {
        self.handle_notifications().await
    }

    /// **Weather**: Current conditions at the device location.
    #[tool]
    async fn weather(
        &self,
        /// Fetch now instead of using the last result
        refresh: Option<bool>,
    ) -> McpResult<String> {
        self.handle_weather(refresh).await
    }

    /// **Recommendations**: Up to 3 open tasks suited to the current weather.
    #[tool]
    async fn recommendations(&self) -> McpResult<String> {
        self.handle_recommendations().await
    }

    /// **Theme**: Show the current theme, or switch (ocean/forest/sunset/moonlight/aurora).
    #[tool]
    async fn theme(
        &self,
        /// Theme to switch to
        name: Option<String>,
    ) -> McpResult<String> {
        self.handle_theme(name).await
    }
}
