//! Calendar handler

use crate::TaskServerHandler;
use crate::calendar::MonthCursor;
use crate::formatting;
use crate::tasks::local_date_today;
use crate::validation;
use chrono::NaiveDate;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskServerHandler {
    /// Shows the viewed month after applying jump, shift and selection, in that order.
    pub async fn handle_calendar(
        &self,
        month: Option<String>,
        shift: Option<i32>,
        select: Option<String>,
    ) -> McpResult<String> {
        let jump = match month {
            Some(ref m) => Some(validation::parse_month(m)?),
            None => None,
        };
        let selected = match select {
            Some(ref d) => Some(validation::parse_date(d)?),
            None => None,
        };

        let mut session = self.session();
        if let Some((year, month)) = jump
            && let Some(first) = NaiveDate::from_ymd_opt(year, month, 1)
        {
            *session.month_mut() = MonthCursor::new(first);
        }
        if let Some(offset) = shift {
            session.month_mut().shift(offset);
        }
        if let Some(date) = selected {
            session.select_date(date);
        }

        match session.month_grid(local_date_today()) {
            Some(grid) => Ok(formatting::format_month_grid(&grid)),
            None => {
                drop(session);
                bail_public!(_, "Failed to build the calendar for the viewed month");
            }
        }
    }
}
