use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Get the current wall-clock time in local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Identifier of a task, unique for the lifetime of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(TaskId)
            .map_err(|_| format!("Invalid task ID '{}'. Task IDs are positive integers", s))
    }
}

/// Urgency tag of a task
///
/// Used for calendar dot grouping, coloring, and as the row axis of the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// No urgency assigned (never shown on the timeline)
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::None,
        Priority::Low,
        Priority::Medium,
        Priority::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Human readable label, e.g. "High Priority"
    pub fn label(&self) -> &'static str {
        match self {
            Priority::None => "No Priority",
            Priority::Low => "Low Priority",
            Priority::Medium => "Medium Priority",
            Priority::High => "High Priority",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Priority::None),
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: none, low, medium, high",
                s
            )),
        }
    }
}

/// Where a task takes place, consulted by the weather recommendations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Any,
    Indoor,
    Outdoor,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Any => "any",
            Location::Indoor => "indoor",
            Location::Outdoor => "outdoor",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(Location::Any),
            "indoor" => Ok(Location::Indoor),
            "outdoor" => Ok(Location::Outdoor),
            _ => Err(format!(
                "Invalid location '{}'. Valid options are: any, indoor, outdoor",
                s
            )),
        }
    }
}

/// A small labeled glyph attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    /// Catalog key (e.g. "birthday", "fish")
    pub key: String,
    pub emoji: String,
    pub label: String,
}

impl Sticker {
    pub fn new(key: impl Into<String>, emoji: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            emoji: emoji.into(),
            label: label.into(),
        }
    }
}

/// A user-created, schedulable unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier assigned by the store (immutable)
    pub id: TaskId,
    /// Display text, never blank
    pub text: String,
    pub completed: bool,
    /// Assigned day; the time of day is carried along but only the calendar day is grouped on
    pub scheduled_for: NaiveDateTime,
    pub priority: Priority,
    /// Ordered stickers; removal addresses an index
    pub stickers: Vec<Sticker>,
    pub location: Location,
}

impl Task {
    /// Calendar day the task is scheduled on
    pub fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_for.date()
    }

    /// Check whether the task falls on the given calendar day
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.scheduled_for.date() == date
    }

    /// Check whether the task is still open
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

/// Input for [`TaskStore::add`](super::TaskStore::add)
///
/// Every field except the text has a default: no priority, scheduled now,
/// no stickers, any location.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub text: String,
    pub priority: Priority,
    pub scheduled_for: Option<NaiveDateTime>,
    pub stickers: Vec<Sticker>,
    pub location: Location,
}

impl TaskDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::None,
            scheduled_for: None,
            stickers: Vec::new(),
            location: Location::Any,
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn scheduled_for(mut self, when: NaiveDateTime) -> Self {
        self.scheduled_for = Some(when);
        self
    }

    /// Schedule on a calendar day, keeping the current time of day
    pub fn scheduled_on(mut self, date: NaiveDate) -> Self {
        self.scheduled_for = Some(date.and_time(local_now().time()));
        self
    }

    pub fn stickers(mut self, stickers: Vec<Sticker>) -> Self {
        self.stickers = stickers;
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// Partial update applied by [`TaskStore::edit`](super::TaskStore::edit)
///
/// `None` leaves a field unchanged. `Some(vec![])` clears the stickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub scheduled_for: Option<NaiveDateTime>,
    pub stickers: Option<Vec<Sticker>>,
    pub location: Option<Location>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &TaskPatch::default()
    }

    /// Move to another day, keeping the task's time of day
    pub fn reschedule(task: &Task, date: NaiveDate) -> Self {
        Self {
            scheduled_for: Some(date.and_time(task.scheduled_for.time())),
            ..Default::default()
        }
    }
}

/// Midnight of a calendar day
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
