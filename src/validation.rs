//! Validation helper functions for the MCP tools
//!
//! Every parser turns free-form tool arguments into domain types and
//! reports bad input as an `INVALID_PARAMS` error with a message that
//! tells the client what would have been accepted.

use crate::tasks::{Location, Priority, Sticker, TaskId};
use crate::theme::{self, ThemeId};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mcp_attr::Result as McpResult;

/// Build an `INVALID_PARAMS` error with a public message
pub fn invalid_params(message: impl Into<String>) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message.into(), true)
}

/// Parse a task id ("3" or "#3")
pub fn parse_task_id(id_str: &str) -> McpResult<TaskId> {
    id_str.parse::<TaskId>().map_err(invalid_params)
}

pub fn parse_priority(priority_str: &str) -> McpResult<Priority> {
    priority_str.parse::<Priority>().map_err(invalid_params)
}

pub fn parse_location(location_str: &str) -> McpResult<Location> {
    location_str.parse::<Location>().map_err(invalid_params)
}

pub fn parse_theme(theme_str: &str) -> McpResult<ThemeId> {
    theme_str.parse::<ThemeId>().map_err(invalid_params)
}

/// Parse a date in YYYY-MM-DD format
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// Result containing parsed NaiveDate or error
pub fn parse_date(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2026-10-19')",
            date_str
        ))
    })
}

/// Parse a schedule: a day, optionally with a time of day
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`.
///
/// # Returns
/// The date and, when given, the time of day
pub fn parse_schedule(value: &str) -> McpResult<(NaiveDate, Option<NaiveTime>)> {
    let value = value.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok((dt.date(), Some(dt.time())));
        }
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok((date, None)),
        Err(_) => Err(invalid_params(format!(
            "Invalid date/time '{}'. Use YYYY-MM-DD or YYYY-MM-DD HH:MM (e.g., '2026-10-19 14:30')",
            value
        ))),
    }
}

/// Parse a month in YYYY-MM format into (year, month)
pub fn parse_month(month_str: &str) -> McpResult<(i32, u32)> {
    let first = format!("{}-01", month_str.trim());
    NaiveDate::parse_from_str(&first, "%Y-%m-%d")
        .map(|d| (chrono::Datelike::year(&d), chrono::Datelike::month(&d)))
        .map_err(|_| {
            invalid_params(format!(
                "Invalid month '{}'. Use YYYY-MM (e.g., '2026-10')",
                month_str
            ))
        })
}

/// Look up a catalog sticker by key
pub fn parse_sticker(key: &str) -> McpResult<Sticker> {
    theme::find_sticker(key).ok_or_else(|| {
        invalid_params(format!(
            "Unknown sticker '{}'. Use stickers() to see the available sticker keys.",
            key
        ))
    })
}

/// Parse a comma-separated sticker key list; an empty string is an empty list
pub fn parse_sticker_list(keys: &str) -> McpResult<Vec<Sticker>> {
    keys.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(parse_sticker)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("#7").unwrap(), TaskId(7));
        assert_eq!(parse_task_id(" 12 ").unwrap(), TaskId(12));
        assert!(parse_task_id("seven").is_err());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(parse_priority("HIGH").unwrap(), Priority::High);
        assert_eq!(parse_location("outdoor").unwrap(), Location::Outdoor);
        assert_eq!(parse_theme("forest").unwrap(), ThemeId::Forest);
        assert!(parse_priority("urgent").is_err());
        assert!(parse_location("garden").is_err());
    }

    #[test]
    fn test_parse_schedule_forms() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            parse_schedule("2026-10-19 14:30").unwrap(),
            (day, NaiveTime::from_hms_opt(14, 30, 0))
        );
        assert_eq!(
            parse_schedule("2026-10-19T08:05").unwrap(),
            (day, NaiveTime::from_hms_opt(8, 5, 0))
        );
        assert_eq!(parse_schedule(" 2026-10-19 ").unwrap(), (day, None));
        assert!(parse_schedule("19/10/2026").is_err());
    }

    #[test]
    fn test_parse_date_and_month() {
        assert!(parse_date("2026-02-30").is_err());
        assert_eq!(parse_month("2026-02").unwrap(), (2026, 2));
        assert!(parse_month("2026-13").is_err());
    }

    #[test]
    fn test_parse_stickers() {
        let stickers = parse_sticker_list("birthday, fish").unwrap();
        assert_eq!(stickers.len(), 2);
        assert_eq!(stickers[1].emoji, "🐠");
        assert!(parse_sticker_list("").unwrap().is_empty());
        assert!(parse_sticker_list("birthday,unicorn").is_err());
    }
}
