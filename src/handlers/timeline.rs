//! Timeline handlers: timeline, drag

use crate::TaskServerHandler;
use crate::formatting;
use crate::tasks::local_date_today;
use crate::timeline::{TIMELINE_PRIORITIES, visible_days_for_width};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskServerHandler {
    /// Adjusts the visible page, then renders it.
    pub async fn handle_timeline(
        &self,
        start: Option<String>,
        days: Option<u32>,
        width: Option<u32>,
        page: Option<String>,
    ) -> McpResult<String> {
        let start = match start {
            Some(ref s) => Some(validation::parse_date(s)?),
            None => None,
        };

        let mut session = self.session();
        let timeline = session.timeline_mut();
        if let Some(start) = start {
            timeline.set_start(start);
        }
        if let Some(width) = width {
            timeline.set_span(visible_days_for_width(width));
        }
        if let Some(days) = days {
            timeline.set_span(days as usize);
        }
        match page.as_deref().map(str::trim) {
            None | Some("") => {}
            Some("next") => timeline.next_page(),
            Some("previous") | Some("prev") => timeline.previous_page(),
            Some(other) => {
                let other = other.to_string();
                drop(session);
                bail_public!(
                    _,
                    "Invalid page '{}'. Valid options are: next, previous",
                    other
                );
            }
        }

        let grid = session.timeline_grid();
        let mut result = formatting::format_timeline(&grid, local_date_today());
        if !session.drag().is_idle() {
            result.push('\n');
            result.push_str(&formatting::format_drag_state(session.drag()));
        }
        Ok(result)
    }

    /// Drives the drag gesture one step at a time.
    pub async fn handle_drag(
        &self,
        action: String,
        id: Option<String>,
        date: Option<String>,
        priority: Option<String>,
    ) -> McpResult<String> {
        let mut session = self.session();
        match action.trim().to_lowercase().as_str() {
            "pick_up" | "pickup" | "start" => {
                let Some(ref id) = id else {
                    drop(session);
                    bail_public!(_, "pick_up requires a task id");
                };
                let id = validation::parse_task_id(id)?;
                if session.store().get(id).is_none() {
                    drop(session);
                    bail_public!(_, "Task not found: Task '#{}' does not exist.", id);
                }
                if !session.pick_up(id) {
                    let current = formatting::format_drag_state(session.drag());
                    drop(session);
                    bail_public!(
                        _,
                        "A drag is already in progress ({}). Drop or cancel it first.",
                        current
                    );
                }
                Ok(formatting::format_drag_state(session.drag()))
            }
            "hover" | "enter" => {
                let Some(ref date) = date else {
                    drop(session);
                    bail_public!(_, "hover requires a date");
                };
                let date = validation::parse_date(date)?;
                let priority = match priority {
                    Some(ref p) => Some(validation::parse_priority(p)?),
                    None => None,
                };
                if session.drag().is_idle() {
                    drop(session);
                    bail_public!(_, "No drag in progress. Use action=pick_up first.");
                }
                match session.hover(date, priority) {
                    Some(_) => Ok(formatting::format_drag_state(session.drag())),
                    None => {
                        let page = session.timeline();
                        Ok(format!(
                            "{} / {} is not a cell of the visible timeline ({} to {}, rows: {}); the drag has no target",
                            date,
                            priority.map(|p| p.to_string()).unwrap_or_else(|| "day".to_string()),
                            page.start(),
                            page.end(),
                            TIMELINE_PRIORITIES
                                .iter()
                                .map(|p| p.as_str())
                                .collect::<Vec<_>>()
                                .join("/")
                        ))
                    }
                }
            }
            "leave" => {
                session.leave();
                Ok(formatting::format_drag_state(session.drag()))
            }
            "drop" | "release" => Ok(formatting::format_drop_outcome(&session.release())),
            "cancel" => Ok(formatting::format_drop_outcome(&session.cancel_drag())),
            "status" => Ok(formatting::format_drag_state(session.drag())),
            _ => {
                drop(session);
                bail_public!(
                    _,
                    "Invalid drag action '{}'. Valid options are: pick_up, hover, leave, drop, cancel, status",
                    action
                );
            }
        }
    }
}
