//! Upcoming and urgent task notifications

use crate::tasks::{Priority, Task};
use chrono::{Duration, NaiveDateTime};

/// Maximum number of tasks in the notification list
pub const NOTIFICATION_LIMIT: usize = 5;

/// How far ahead a scheduled task counts as upcoming
pub const UPCOMING_WINDOW_HOURS: i64 = 48;

/// Check whether a task deserves a notification at `now`
///
/// Open tasks qualify when they are high priority or scheduled within
/// `[now, now + 48h]` (both ends inclusive).
pub fn is_notable(task: &Task, now: NaiveDateTime) -> bool {
    if task.completed {
        return false;
    }
    let window_end = now + Duration::hours(UPCOMING_WINDOW_HOURS);
    task.priority == Priority::High || (task.scheduled_for >= now && task.scheduled_for <= window_end)
}

/// Select the tasks to notify about, in store order, at most five
pub fn upcoming(tasks: &[Task], now: NaiveDateTime) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| is_notable(t, now))
        .take(NOTIFICATION_LIMIT)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{TaskDraft, TaskStore};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let mut store = TaskStore::new();
        store.add(TaskDraft::new("exactly now").scheduled_for(now()));
        store.add(TaskDraft::new("window end").scheduled_for(now() + Duration::hours(48)));
        store.add(
            TaskDraft::new("just past").scheduled_for(now() + Duration::hours(48) + Duration::seconds(1)),
        );
        store.add(TaskDraft::new("in the past").scheduled_for(now() - Duration::minutes(1)));

        let texts: Vec<_> = upcoming(&store.all(), now())
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["exactly now", "window end"]);
    }

    #[test]
    fn test_high_priority_always_included() {
        let mut store = TaskStore::new();
        store.add(
            TaskDraft::new("overdue but urgent")
                .priority(Priority::High)
                .scheduled_for(now() - Duration::days(30)),
        );
        store.add(
            TaskDraft::new("far away but urgent")
                .priority(Priority::High)
                .scheduled_for(now() + Duration::days(30)),
        );
        store.add(
            TaskDraft::new("far away")
                .priority(Priority::Medium)
                .scheduled_for(now() + Duration::days(30)),
        );

        assert_eq!(upcoming(&store.all(), now()).len(), 2);
    }

    #[test]
    fn test_completed_tasks_excluded() {
        let mut store = TaskStore::new();
        let id = store
            .add(TaskDraft::new("done").priority(Priority::High).scheduled_for(now()))
            .unwrap()
            .id;
        store.toggle_completed(id);

        assert!(upcoming(&store.all(), now()).is_empty());
    }

    #[test]
    fn test_truncated_to_five_in_store_order() {
        let mut store = TaskStore::new();
        for i in 0..8 {
            store.add(
                TaskDraft::new(format!("task {}", i))
                    .priority(Priority::High)
                    .scheduled_for(now()),
            );
        }

        let list = upcoming(&store.all(), now());
        assert_eq!(list.len(), NOTIFICATION_LIMIT);
        assert_eq!(list[0].text, "task 0");
        assert_eq!(list[4].text, "task 4");
    }
}
