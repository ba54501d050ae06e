//! Task handlers: add, list, update, toggle, delete, select_task, notifications

use crate::TaskServerHandler;
use crate::formatting;
use crate::tasks::{TaskDraft, TaskPatch, local_date_today, local_now};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl TaskServerHandler {
    /// Creates a task from tool arguments; blank text is rejected before reaching the store.
    pub async fn handle_add(
        &self,
        text: String,
        priority: Option<String>,
        date: Option<String>,
        location: Option<String>,
        stickers: Option<String>,
    ) -> McpResult<String> {
        if text.trim().is_empty() {
            bail_public!(_, "Task text must not be empty");
        }

        let mut draft = TaskDraft::new(text);
        if let Some(ref p) = priority {
            draft = draft.priority(validation::parse_priority(p)?);
        }
        if let Some(ref d) = date {
            draft = match validation::parse_schedule(d)? {
                (day, Some(time)) => draft.scheduled_for(day.and_time(time)),
                (day, None) => draft.scheduled_on(day),
            };
        }
        if let Some(ref l) = location {
            draft = draft.location(validation::parse_location(l)?);
        }
        if let Some(ref s) = stickers {
            draft = draft.stickers(validation::parse_sticker_list(s)?);
        }

        let task = match self.session().add_task(draft) {
            Some(task) => task,
            None => bail_public!(_, "Task text must not be empty"),
        };
        info!(id = %task.id, "task created");
        Ok(format!(
            "Task created with ID: #{}\n{}",
            task.id,
            formatting::format_task_line(&task)
        ))
    }

    /// Lists the selected date's tasks, or every task with `all`.
    pub async fn handle_list(
        &self,
        date: Option<String>,
        show_completed: Option<bool>,
        all: Option<bool>,
    ) -> McpResult<String> {
        let date_filter = match date {
            Some(ref d) => Some(validation::parse_date(d)?),
            None => None,
        };

        let mut session = self.session();
        if let Some(d) = date_filter {
            session.select_date(d);
        }
        if let Some(show) = show_completed {
            session.set_show_completed(show);
        }

        if all.unwrap_or(false) {
            let tasks: Vec<_> = session
                .store()
                .iter()
                .filter(|t| session.show_completed() || t.is_open())
                .cloned()
                .collect();
            return Ok(formatting::format_tasks("All tasks", &tasks));
        }

        let heading = if session.selected_date() == local_date_today() {
            format!("Tasks for today ({})", session.selected_date())
        } else {
            format!("Tasks for {}", session.selected_date())
        };
        Ok(formatting::format_tasks(&heading, &session.visible_tasks()))
    }

    /// Applies a partial update; omitted arguments leave fields unchanged.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update(
        &self,
        id: String,
        text: Option<String>,
        priority: Option<String>,
        date: Option<String>,
        location: Option<String>,
        stickers: Option<String>,
    ) -> McpResult<String> {
        let id = validation::parse_task_id(&id)?;
        let mut patch = TaskPatch {
            text,
            ..Default::default()
        };
        if let Some(ref p) = priority {
            patch.priority = Some(validation::parse_priority(p)?);
        }
        if let Some(ref l) = location {
            patch.location = Some(validation::parse_location(l)?);
        }
        if let Some(ref s) = stickers {
            patch.stickers = Some(validation::parse_sticker_list(s)?);
        }
        let schedule = match date {
            Some(ref d) => Some(validation::parse_schedule(d)?),
            None => None,
        };

        let mut session = self.session();
        let Some(current) = session.store().get(id).cloned() else {
            drop(session);
            bail_public!(
                _,
                "Task not found: Task '#{}' does not exist. Use list(all=true) to see available tasks.",
                id
            );
        };
        patch.scheduled_for = match schedule {
            Some((day, Some(time))) => Some(day.and_time(time)),
            Some((day, None)) => TaskPatch::reschedule(&current, day).scheduled_for,
            None => None,
        };

        if patch.is_empty() {
            return Ok(format!("Nothing to update for task #{}", id));
        }
        match session.edit_task(id, patch) {
            Some(task) => Ok(format!(
                "Task #{} updated successfully\n{}",
                id,
                formatting::format_task_line(&task)
            )),
            None => {
                drop(session);
                bail_public!(_, "Failed to update task '#{}'", id);
            }
        }
    }

    /// Flips the completed flag.
    pub async fn handle_toggle(&self, id: String) -> McpResult<String> {
        let id = validation::parse_task_id(&id)?;
        match self.session().toggle_task(id) {
            Some(true) => Ok(format!("Task #{} marked as completed", id)),
            Some(false) => Ok(format!("Task #{} marked as open", id)),
            None => bail_public!(_, "Task not found: Task '#{}' does not exist.", id),
        }
    }

    pub async fn handle_delete(&self, id: String) -> McpResult<String> {
        let id = validation::parse_task_id(&id)?;
        match self.session().delete_task(id) {
            Some(task) => Ok(format!("Deleted task #{} ({})", id, task.text)),
            None => bail_public!(_, "Task not found: Task '#{}' does not exist.", id),
        }
    }

    /// Selects a task; the selected date and calendar month follow it.
    pub async fn handle_select_task(&self, id: String) -> McpResult<String> {
        let id = validation::parse_task_id(&id)?;
        match self.session().select_task(id) {
            Some(task) => Ok(formatting::format_task_detail(&task)),
            None => bail_public!(_, "Task not found: Task '#{}' does not exist.", id),
        }
    }

    pub async fn handle_notifications(&self) -> McpResult<String> {
        let now = local_now();
        let tasks = self.session().notifications(now);
        Ok(formatting::format_notifications(&tasks, now))
    }
}
