//! Top-level state of one user session
//!
//! [`Session`] owns the task store and every piece of view state the
//! derived views depend on (selected date and task, viewed month, timeline
//! page, drag gesture, theme). Derived views are recomputed from the store
//! on each call.

use crate::calendar::{MonthCursor, MonthGrid, build_month_grid};
use crate::config::UiConfig;
use crate::notifications;
use crate::tasks::{Priority, Sticker, Task, TaskDraft, TaskId, TaskPatch, TaskStore};
use crate::theme::{ThemeDescriptor, ThemeId};
use crate::timeline::{DragState, DropOutcome, DropTarget, Timeline, TimelineGrid};
use crate::weather::{Recommendations, Recommender, WeatherSnapshot};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Session {
    store: TaskStore,
    selected_date: NaiveDate,
    selected_task: Option<TaskId>,
    show_completed: bool,
    month: MonthCursor,
    timeline: Timeline,
    drag: DragState,
    theme: ThemeId,
    recommender: Recommender,
}

impl Session {
    /// Start a session with an empty store, everything anchored on `today`
    pub fn new(today: NaiveDate, ui: &UiConfig) -> Self {
        Self {
            store: TaskStore::new(),
            selected_date: today,
            selected_task: None,
            show_completed: ui.show_completed,
            month: MonthCursor::new(today),
            timeline: Timeline::new(today, ui.timeline_span),
            drag: DragState::Idle,
            theme: ui.theme,
            recommender: Recommender::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn add_task(&mut self, draft: TaskDraft) -> Option<Task> {
        self.store.add(draft)
    }

    pub fn edit_task(&mut self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        self.store.edit(id, patch)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> Option<bool> {
        self.store.toggle_completed(id)
    }

    pub fn add_sticker(&mut self, id: TaskId, sticker: Sticker) -> Option<Task> {
        self.store.add_sticker(id, sticker)
    }

    pub fn remove_sticker(&mut self, id: TaskId, index: usize) -> Option<Sticker> {
        self.store.remove_sticker(id, index)
    }

    /// Delete a task, dropping any selection or drag that refers to it
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.store.delete(id)?;
        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        if self.drag.task().is_some_and(|t| t.id == id) {
            self.drag.cancel();
        }
        Some(removed)
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Selected task, if it still exists
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task.and_then(|id| self.store.get(id))
    }

    /// Select a task and jump the date selection and month view to its day
    pub fn select_task(&mut self, id: TaskId) -> Option<Task> {
        let task = self.store.get(id)?.clone();
        let date = task.scheduled_date();
        self.selected_task = Some(id);
        self.selected_date = date;
        self.month = MonthCursor::new(date);
        debug!(%id, %date, "task selected");
        Some(task)
    }

    pub fn show_completed(&self) -> bool {
        self.show_completed
    }

    pub fn set_show_completed(&mut self, show: bool) {
        self.show_completed = show;
    }

    /// Task list for the selected date, honoring the completed filter
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.store.tasks_on(self.selected_date, self.show_completed)
    }

    pub fn month(&self) -> &MonthCursor {
        &self.month
    }

    pub fn month_mut(&mut self) -> &mut MonthCursor {
        &mut self.month
    }

    /// Grid of the viewed month
    pub fn month_grid(&self, today: NaiveDate) -> Option<MonthGrid> {
        build_month_grid(
            self.month.year(),
            self.month.month(),
            &self.store.all(),
            Some(self.selected_date),
            today,
        )
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn timeline_grid(&self) -> TimelineGrid {
        self.timeline.build(&self.store.all())
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Start dragging a task
    ///
    /// # Returns
    /// `false` if the task does not exist or a drag is already in progress
    pub fn pick_up(&mut self, id: TaskId) -> bool {
        match self.store.get(id) {
            Some(task) => {
                let task = task.clone();
                self.drag.pick_up(task)
            }
            None => false,
        }
    }

    /// Hover a timeline cell, or a whole day when `priority` is `None`
    ///
    /// Hovering anything that is not a valid cell of the current page counts
    /// as leaving the previous target.
    ///
    /// # Returns
    /// The hovered target, `None` if the cell is invalid or nothing is dragged
    pub fn hover(&mut self, date: NaiveDate, priority: Option<Priority>) -> Option<DropTarget> {
        if self.drag.is_idle() {
            return None;
        }
        let target = match priority {
            Some(priority) => self.timeline.target(date, priority),
            None => self.timeline.day_target(date),
        };
        match target {
            Some(target) => self.drag.enter(target),
            None => self.drag.leave(),
        }
        target
    }

    pub fn leave(&mut self) {
        self.drag.leave();
    }

    pub fn release(&mut self) -> DropOutcome {
        self.drag.release(&mut self.store)
    }

    pub fn cancel_drag(&mut self) -> DropOutcome {
        self.drag.cancel()
    }

    pub fn theme(&self) -> &'static ThemeDescriptor {
        self.theme.descriptor()
    }

    pub fn set_theme(&mut self, theme: ThemeId) -> &'static ThemeDescriptor {
        if self.theme != theme {
            info!("theme changed from {} to {}", self.theme, theme);
            self.theme = theme;
        }
        self.theme.descriptor()
    }

    /// Upcoming and urgent tasks at `now`
    pub fn notifications(&self, now: NaiveDateTime) -> Vec<Task> {
        notifications::upcoming(&self.store.all(), now)
    }

    pub fn recommendations(&mut self, weather: &WeatherSnapshot) -> Recommendations {
        self.recommender.recommend(weather, &self.store)
    }
}
