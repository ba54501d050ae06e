//! Formatting helper functions for the MCP tools
//!
//! Turns tasks and the derived views into the plain-text replies the tools
//! return.

use crate::calendar::{DayCell, MonthGrid, WEEKDAY_NAMES};
use crate::tasks::{Priority, Sticker, Task};
use crate::theme::{self, StickerCategory, ThemeDescriptor};
use crate::timeline::{DragState, DropOutcome, TimelineGrid, date_label};
use crate::weather::{Recommendations, WeatherReport, WeatherState};
use chrono::{NaiveDate, NaiveDateTime};

fn format_stickers(stickers: &[Sticker]) -> String {
    stickers
        .iter()
        .map(|s| s.emoji.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line summary of a task
///
/// # Arguments
/// * `task` - Task to describe
///
/// # Returns
/// e.g. `[#3] ✓ Buy milk (priority: high, location: outdoor, 2026-10-19 14:00) 🎂`
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { "✓" } else { " " };
    let mut line = format!(
        "[#{}] {} {} (priority: {}, location: {}, {})",
        task.id,
        check,
        task.text,
        task.priority,
        task.location,
        task.scheduled_for.format("%Y-%m-%d %H:%M")
    );
    if let Some(badge) = theme::location_badge(task.location) {
        line.push(' ');
        line.push_str(badge);
    }
    if !task.stickers.is_empty() {
        line.push(' ');
        line.push_str(&format_stickers(&task.stickers));
    }
    line
}

/// Format a task list under a heading
///
/// # Arguments
/// * `heading` - Title line, e.g. "Tasks for 2026-10-19"
/// * `tasks` - Tasks to list
///
/// # Returns
/// Formatted string; a friendly message when the list is empty
pub fn format_tasks(heading: &str, tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return format!("{}: no tasks", heading);
    }

    let mut result = format!("{} ({} task(s)):\n\n", heading, tasks.len());
    for task in tasks {
        result.push_str("- ");
        result.push_str(&format_task_line(task));
        result.push('\n');
    }
    result
}

/// Detailed multi-line description of a single task
pub fn format_task_detail(task: &Task) -> String {
    let mut result = format!("Task #{}: {}\n", task.id, task.text);
    result.push_str(&format!(
        "  Status: {}\n",
        if task.completed { "completed" } else { "open" }
    ));
    result.push_str(&format!(
        "  Priority: {} ({})\n",
        task.priority.label(),
        theme::priority_role(task.priority).as_str()
    ));
    result.push_str(&format!("  Location: {}\n", task.location));
    result.push_str(&format!(
        "  Scheduled: {}\n",
        task.scheduled_for.format("%Y-%m-%d %H:%M")
    ));
    if !task.stickers.is_empty() {
        result.push_str("  Stickers:\n");
        for (index, sticker) in task.stickers.iter().enumerate() {
            result.push_str(&format!(
                "    {}. {} {} ({})\n",
                index, sticker.emoji, sticker.label, sticker.key
            ));
        }
    }
    result
}

/// Render a month as a text grid followed by the days that have tasks
///
/// Day markers: `*` has tasks, `!` has a high-priority task, `[..]` selected,
/// `(..)` today.
pub fn format_month_grid(grid: &MonthGrid) -> String {
    let mut result = format!("{}\n", grid.title());
    result.push_str(
        &WEEKDAY_NAMES
            .iter()
            .map(|name| format!("{:^6}", name))
            .collect::<String>(),
    );
    result.push('\n');

    for week in &grid.weeks {
        for cell in &week.days {
            let text = match cell {
                DayCell::Empty => String::new(),
                DayCell::Day(day) => {
                    let marker = if day.has_high_priority() {
                        "!"
                    } else if day.task_count() > 0 {
                        "*"
                    } else {
                        ""
                    };
                    let number = format!("{}{}", chrono::Datelike::day(&day.date), marker);
                    if day.is_selected {
                        format!("[{}]", number)
                    } else if day.is_today {
                        format!("({})", number)
                    } else {
                        number
                    }
                }
            };
            result.push_str(&format!("{:^6}", text));
        }
        result.push('\n');
    }

    let busy: Vec<_> = grid.days().filter(|d| d.task_count() > 0).collect();
    if !busy.is_empty() {
        result.push('\n');
        for day in busy {
            let counts = day
                .priority_counts
                .iter()
                .map(|c| format!("{} {}", c.count, c.priority))
                .collect::<Vec<_>>()
                .join(", ");
            result.push_str(&format!(
                "{}: {} task(s) ({})\n",
                day.date.format("%b %-d"),
                day.task_count(),
                counts
            ));
        }
    }
    result
}

/// Render a timeline page, one block per priority row
pub fn format_timeline(grid: &TimelineGrid, today: NaiveDate) -> String {
    let headings = grid
        .dates
        .iter()
        .map(|d| format!("{} ({})", date_label(*d, today), d))
        .collect::<Vec<_>>()
        .join(" | ");
    let mut result = format!("Timeline: {}\n", headings);

    for row in &grid.rows {
        result.push_str(&format!("\n{}:\n", row.priority.label()));
        let mut empty = true;
        for cell in &row.cells {
            for task in &cell.tasks {
                empty = false;
                result.push_str(&format!(
                    "  {} - [#{}] {}\n",
                    date_label(cell.date, today),
                    task.id,
                    task.text
                ));
            }
        }
        if empty {
            result.push_str("  (none)\n");
        }
    }
    result
}

pub fn format_drag_state(drag: &DragState) -> String {
    match drag {
        DragState::Idle => "No drag in progress".to_string(),
        DragState::Dragging { task } => format!("Dragging task #{} ({})", task.id, task.text),
        DragState::Hovering { task, target } => {
            let row = target
                .priority
                .map(|p| p.to_string())
                .unwrap_or_else(|| "keep priority".to_string());
            format!(
                "Dragging task #{} ({}) over {} / {}",
                task.id, task.text, target.date, row
            )
        }
    }
}

pub fn format_drop_outcome(outcome: &DropOutcome) -> String {
    match outcome {
        DropOutcome::Committed(task) => format!(
            "Task #{} moved to {} with priority {}",
            task.id,
            task.scheduled_for.format("%Y-%m-%d %H:%M"),
            task.priority
        ),
        DropOutcome::Aborted { id } => format!("Drag of task #{} aborted, nothing changed", id),
        DropOutcome::NotDragging => "No drag in progress".to_string(),
    }
}

/// Format the notification list
///
/// High-priority tasks are flagged; others show how soon they are due.
pub fn format_notifications(tasks: &[Task], now: NaiveDateTime) -> String {
    if tasks.is_empty() {
        return "No upcoming or urgent tasks".to_string();
    }

    let mut result = format!("{} notification(s):\n\n", tasks.len());
    for task in tasks {
        let when = if task.scheduled_for < now {
            "overdue".to_string()
        } else {
            let hours = (task.scheduled_for - now).num_hours();
            if hours < 1 {
                "due within the hour".to_string()
            } else {
                format!("due in {}h", hours)
            }
        };
        let flag = if task.priority == Priority::High {
            "🔥 "
        } else {
            ""
        };
        result.push_str(&format!("- {}[#{}] {} ({})\n", flag, task.id, task.text, when));
    }
    result
}

fn format_report(report: &WeatherReport) -> String {
    let snapshot = &report.snapshot;
    let condition = snapshot.condition();
    let mut result = format!(
        "{} {} ({}), {:.1}{}\n",
        condition.icon,
        condition.description,
        condition.kind,
        snapshot.temperature,
        snapshot.unit.symbol()
    );
    if let Some(wind) = snapshot.wind_speed {
        result.push_str(&format!("  Wind: {:.1} km/h\n", wind));
    }
    result.push_str(&format!("  Precipitation: {:.1} mm\n", snapshot.precipitation));
    if let Some(humidity) = snapshot.humidity {
        result.push_str(&format!("  Humidity: {:.0}%\n", humidity));
    }
    result.push_str(&format!(
        "  Location: {}\n  Updated: {}\n",
        report.coordinates,
        report.fetched_at.format("%Y-%m-%d %H:%M")
    ));
    result.push_str(if snapshot.outdoor_suitable() {
        "  Good weather for outdoor tasks\n"
    } else {
        "  Better suited for indoor tasks\n"
    });
    result
}

pub fn format_weather_state(state: &WeatherState) -> String {
    match state {
        WeatherState::Loading => "Weather: loading...".to_string(),
        WeatherState::Unavailable => "Weather: unavailable".to_string(),
        WeatherState::Ready(report) => format!("Weather: {}", format_report(report)),
    }
}

/// Format recommendations; loading, unavailable and "no match" read differently
pub fn format_recommendations(state: &WeatherState, recommendations: Option<&Recommendations>) -> String {
    let recommendations = match (state, recommendations) {
        (WeatherState::Loading, _) => {
            return "Recommendations: waiting for weather data".to_string();
        }
        (WeatherState::Unavailable, _) | (_, None) => {
            return "Recommendations: weather unavailable, no suggestions".to_string();
        }
        (WeatherState::Ready(_), Some(r)) => r,
    };

    let location = recommendations.favored_location();
    if recommendations.tasks.is_empty() {
        return format!(
            "Recommendations: weather favors {} tasks, but no open {} tasks match",
            location, location
        );
    }

    let mut result = format!("Recommended {} tasks:\n\n", location);
    for task in &recommendations.tasks {
        result.push_str("- ");
        result.push_str(&format_task_line(task));
        result.push('\n');
    }
    result
}

pub fn format_theme(descriptor: &ThemeDescriptor) -> String {
    format!(
        "{} {} ({})\n  Color roles: {}",
        descriptor.emoji,
        descriptor.name,
        descriptor.id,
        descriptor.color_roles.join(" ")
    )
}

pub fn format_sticker_categories(categories: &[&StickerCategory]) -> String {
    let mut result = String::new();
    for category in categories {
        result.push_str(&format!("{} ({}):\n", category.name, category.key));
        for (key, emoji, label) in category.stickers {
            result.push_str(&format!("  {} {} [{}]\n", emoji, label, key));
        }
    }
    result
}
