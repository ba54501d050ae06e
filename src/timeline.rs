//! Multi-day priority timeline and drag-to-reschedule
//!
//! The timeline shows `span` consecutive days as columns and the
//! high/medium/low priorities as rows. Tasks without a priority and
//! completed tasks are not shown.
//!
//! Rescheduling happens through [`DragState`], a small state machine:
//!
//! ```text
//! Idle --pick_up--> Dragging --enter--> Hovering --release--> Idle (commit)
//!                      ^                   |
//!                      +------leave--------+
//! Dragging --release/cancel--> Idle (abort)
//! ```
//!
//! A commit is the only way the timeline changes data, and it always goes
//! through [`TaskStore::edit`].

use crate::tasks::{Priority, Task, TaskId, TaskPatch, TaskStore};
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Row order of the timeline
pub const TIMELINE_PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

/// Default number of visible days
pub const DEFAULT_SPAN: usize = 3;

/// Widest page the timeline will show
pub const MAX_SPAN: usize = 31;

/// Number of days to show for a display width in pixels
pub fn visible_days_for_width(width: u32) -> usize {
    if width < 640 {
        2
    } else if width < 1024 {
        3
    } else {
        5
    }
}

/// Column heading: "Today", "Tomorrow", otherwise e.g. "Mon, Oct 19"
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}

/// One (date, priority) cell of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineCell {
    pub date: NaiveDate,
    pub priority: Priority,
    /// Open tasks on `date` with exactly `priority`, in store order
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub priority: Priority,
    pub cells: Vec<TimelineCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGrid {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<TimelineRow>,
}

impl TimelineGrid {
    pub fn cell(&self, date: NaiveDate, priority: Priority) -> Option<&TimelineCell> {
        self.rows
            .iter()
            .find(|r| r.priority == priority)?
            .cells
            .iter()
            .find(|c| c.date == date)
    }

    pub fn task_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.tasks.len())
            .sum()
    }
}

/// The visible page of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    start: NaiveDate,
    span: usize,
}

impl Timeline {
    /// Create a timeline starting at `start` showing `span` days (1 to [`MAX_SPAN`])
    pub fn new(start: NaiveDate, span: usize) -> Self {
        Self {
            start,
            span: span.clamp(1, MAX_SPAN),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn span(&self) -> usize {
        self.span
    }

    /// Change the number of visible days, keeping the start date
    pub fn set_span(&mut self, span: usize) {
        self.span = span.clamp(1, MAX_SPAN);
    }

    /// Jump so the page starts at `start`
    pub fn set_start(&mut self, start: NaiveDate) {
        self.start = start;
    }

    /// Visible dates, oldest first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take(self.span).collect()
    }

    /// Last visible date, capped at the end of chrono's range
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_signed(Duration::days(self.span as i64 - 1))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn is_visible(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }

    /// Advance one full page; unchanged at the end of chrono's range
    pub fn next_page(&mut self) {
        if let Some(start) = self
            .start
            .checked_add_signed(Duration::days(self.span as i64))
        {
            self.start = start;
        }
    }

    /// Go back one full page; unchanged at the start of chrono's range
    pub fn previous_page(&mut self) {
        if let Some(start) = self
            .start
            .checked_sub_signed(Duration::days(self.span as i64))
        {
            self.start = start;
        }
    }

    /// Drop target for a (date, priority) cell of this page
    ///
    /// `None` if the date is not visible or the priority has no row.
    pub fn target(&self, date: NaiveDate, priority: Priority) -> Option<DropTarget> {
        if !self.is_visible(date) || !TIMELINE_PRIORITIES.contains(&priority) {
            return None;
        }
        Some(DropTarget {
            date,
            priority: Some(priority),
        })
    }

    /// Drop target for a whole visible day, keeping the task's priority on drop
    pub fn day_target(&self, date: NaiveDate) -> Option<DropTarget> {
        self.is_visible(date).then_some(DropTarget {
            date,
            priority: None,
        })
    }

    /// Project the task snapshot onto this page
    pub fn build(&self, tasks: &[Task]) -> TimelineGrid {
        let dates = self.dates();
        let rows = TIMELINE_PRIORITIES
            .iter()
            .map(|&priority| TimelineRow {
                priority,
                cells: dates
                    .iter()
                    .map(|&date| TimelineCell {
                        date,
                        priority,
                        tasks: tasks
                            .iter()
                            .filter(|t| t.is_open() && t.priority == priority && t.is_on(date))
                            .cloned()
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        TimelineGrid { dates, rows }
    }
}

/// A cell a dragged task can be dropped on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub date: NaiveDate,
    /// `None` for targets without a priority axis
    pub priority: Option<Priority>,
}

/// Drag gesture state
///
/// A hovered target can only exist together with a dragged task.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        task: Task,
    },
    Hovering {
        task: Task,
        target: DropTarget,
    },
}

/// Result of releasing a drag
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The task was rescheduled; holds the updated task
    Committed(Task),
    /// Released outside any cell, cancelled, or the task no longer exists
    Aborted { id: TaskId },
    /// Nothing was being dragged
    NotDragging,
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Task currently being dragged
    pub fn task(&self) -> Option<&Task> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { task } | DragState::Hovering { task, .. } => Some(task),
        }
    }

    /// Currently hovered target
    pub fn target(&self) -> Option<DropTarget> {
        match self {
            DragState::Hovering { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Start dragging a task card
    ///
    /// # Returns
    /// `false` (state unchanged) if a drag is already in progress
    pub fn pick_up(&mut self, task: Task) -> bool {
        if !self.is_idle() {
            debug!(id = %task.id, "drag already in progress, ignoring pick up");
            return false;
        }
        debug!(id = %task.id, "drag started");
        *self = DragState::Dragging { task };
        true
    }

    /// Pointer entered a cell; the most recently entered cell is the target
    pub fn enter(&mut self, target: DropTarget) {
        *self = match std::mem::take(self) {
            DragState::Idle => DragState::Idle,
            DragState::Dragging { task } | DragState::Hovering { task, .. } => {
                DragState::Hovering { task, target }
            }
        };
    }

    /// Pointer left the hovered cell without dropping
    pub fn leave(&mut self) {
        *self = match std::mem::take(self) {
            DragState::Hovering { task, .. } => DragState::Dragging { task },
            other => other,
        };
    }

    /// Abort the drag without touching any task
    pub fn cancel(&mut self) -> DropOutcome {
        match std::mem::take(self) {
            DragState::Idle => DropOutcome::NotDragging,
            DragState::Dragging { task } | DragState::Hovering { task, .. } => {
                debug!(id = %task.id, "drag cancelled");
                DropOutcome::Aborted { id: task.id }
            }
        }
    }

    /// Release the pointer
    ///
    /// Commits through [`TaskStore::edit`] when hovering a target: the task
    /// moves to the target date (keeping its current time of day) and takes
    /// the target priority, or keeps its current one when the target has none.
    pub fn release(&mut self, store: &mut TaskStore) -> DropOutcome {
        match std::mem::take(self) {
            DragState::Idle => DropOutcome::NotDragging,
            DragState::Dragging { task } => {
                debug!(id = %task.id, "released outside a cell");
                DropOutcome::Aborted { id: task.id }
            }
            DragState::Hovering { task, target } => {
                // edits made while dragging win over the picked-up copy
                let Some(current) = store.get(task.id) else {
                    debug!(id = %task.id, "dragged task no longer exists");
                    return DropOutcome::Aborted { id: task.id };
                };
                let patch = TaskPatch {
                    priority: Some(target.priority.unwrap_or(current.priority)),
                    ..TaskPatch::reschedule(current, target.date)
                };
                match store.edit(task.id, patch) {
                    Some(updated) => {
                        debug!(id = %updated.id, date = %target.date, priority = %updated.priority, "drop committed");
                        DropOutcome::Committed(updated)
                    }
                    None => DropOutcome::Aborted { id: task.id },
                }
            }
        }
    }
}
