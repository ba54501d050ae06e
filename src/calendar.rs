//! Monthly calendar grid
//!
//! Projects a task snapshot onto the days of one month. Weeks start on
//! Sunday and always hold seven cells; cells outside the month are empty.

use crate::tasks::{Priority, Task};
use chrono::{Datelike, Months, NaiveDate};

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Number of tasks of one priority on a day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

/// A concrete day of the viewed month
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Tasks scheduled on this day, in store order
    pub tasks: Vec<Task>,
    /// Counts grouped by priority, in order of first occurrence among `tasks`
    pub priority_counts: Vec<PriorityCount>,
    pub is_today: bool,
    pub is_selected: bool,
}

impl CalendarDay {
    pub fn has_high_priority(&self) -> bool {
        self.tasks.iter().any(|t| t.priority == Priority::High)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayCell {
    /// Padding before the first or after the last day of the month
    Empty,
    Day(CalendarDay),
}

impl DayCell {
    pub fn day(&self) -> Option<&CalendarDay> {
        match self {
            DayCell::Empty => None,
            DayCell::Day(day) => Some(day),
        }
    }
}

/// Seven cells, Sunday first
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: [DayCell; 7],
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    /// All concrete days in order
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .filter_map(DayCell::day)
    }

    /// Look up the cell of a date in this month
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days().find(|d| d.date == date)
    }

    /// Month title such as "October 2026"
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

/// The month currently being viewed
///
/// Holds a full date so that stepping month by month keeps the day of month
/// where the target month has it (Jan 31 -> Feb 28 -> Mar 28).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    anchor: NaiveDate,
}

impl MonthCursor {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn year(&self) -> i32 {
        self.anchor.year()
    }

    pub fn month(&self) -> u32 {
        self.anchor.month()
    }

    /// Move by `offset` months (negative goes back)
    ///
    /// Leaves the cursor unchanged if the result would be out of chrono's range.
    pub fn shift(&mut self, offset: i32) {
        let months = Months::new(offset.unsigned_abs());
        let shifted = if offset >= 0 {
            self.anchor.checked_add_months(months)
        } else {
            self.anchor.checked_sub_months(months)
        };
        if let Some(date) = shifted {
            self.anchor = date;
        }
    }
}

/// Number of days in a month, `None` for an invalid year/month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

fn priority_counts(tasks: &[Task]) -> Vec<PriorityCount> {
    let mut counts: Vec<PriorityCount> = Vec::new();
    for task in tasks {
        match counts.iter_mut().find(|c| c.priority == task.priority) {
            Some(entry) => entry.count += 1,
            None => counts.push(PriorityCount {
                priority: task.priority,
                count: 1,
            }),
        }
    }
    counts
}

/// Build the grid for one month
///
/// # Arguments
/// * `year`, `month` - The viewed month (month is 1-based)
/// * `tasks` - Task snapshot
/// * `selected` - Currently selected date, if any
/// * `today` - The date considered "today"
///
/// # Returns
/// The grid, or `None` for an invalid year/month
pub fn build_month_grid(
    year: i32,
    month: u32,
    tasks: &[Task],
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let day_count = days_in_month(year, month)?;
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<DayCell> = vec![DayCell::Empty; leading];
    for date in first.iter_days().take(day_count as usize) {
        let day_tasks: Vec<Task> = tasks.iter().filter(|t| t.is_on(date)).cloned().collect();
        cells.push(DayCell::Day(CalendarDay {
            priority_counts: priority_counts(&day_tasks),
            tasks: day_tasks,
            is_today: date == today,
            is_selected: selected == Some(date),
            date,
        }));
    }
    let trailing = (7 - cells.len() % 7) % 7;
    cells.extend(std::iter::repeat_n(DayCell::Empty, trailing));

    let weeks = cells
        .chunks(7)
        .map(|chunk| Week {
            days: std::array::from_fn(|i| chunk[i].clone()),
        })
        .collect();

    Some(MonthGrid { year, month, weeks })
}
