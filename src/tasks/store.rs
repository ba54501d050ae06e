use super::task::{Sticker, Task, TaskDraft, TaskId, TaskPatch, local_now};
use chrono::NaiveDate;
use tracing::debug;

/// In-memory collection of tasks for one session
///
/// Tasks are kept in a Vec in insertion order; every derived view
/// (calendar, timeline, notifications, recommendations) relies on that order.
/// Operations addressing an unknown id are no-ops rather than errors.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    /// Last issued id; ids are never reused, even after delete
    last_id: u64,
    /// Bumped on every effective mutation
    version: u64,
}

impl TaskStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> TaskId {
        self.last_id += 1;
        TaskId(self.last_id)
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Add a task
    ///
    /// # Returns
    /// The created task, or `None` if the text is blank (nothing is added)
    pub fn add(&mut self, draft: TaskDraft) -> Option<Task> {
        let text = draft.text.trim();
        if text.is_empty() {
            debug!("ignoring task with blank text");
            return None;
        }

        let task = Task {
            id: self.next_id(),
            text: text.to_string(),
            completed: false,
            scheduled_for: draft.scheduled_for.unwrap_or_else(local_now),
            priority: draft.priority,
            stickers: draft.stickers,
            location: draft.location,
        };
        self.tasks.push(task.clone());
        self.touch();
        debug!(id = %task.id, "task added");
        Some(task)
    }

    /// Flip the completed flag of a task
    ///
    /// # Returns
    /// The new completed value if the task exists
    pub fn toggle_completed(&mut self, id: TaskId) -> Option<bool> {
        let task = self.find_mut(id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.touch();
        Some(completed)
    }

    /// Remove a task
    ///
    /// # Returns
    /// The removed task if found
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(pos);
        self.touch();
        debug!(%id, "task deleted");
        Some(task)
    }

    /// Apply a partial update to a task
    ///
    /// Fields left as `None` in the patch are unchanged. A blank text is
    /// ignored so that a task's text never becomes empty.
    ///
    /// # Returns
    /// The updated task if found
    pub fn edit(&mut self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        let task = self.find_mut(id)?;

        if let Some(text) = patch.text {
            let text = text.trim();
            if !text.is_empty() {
                task.text = text.to_string();
            }
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(when) = patch.scheduled_for {
            task.scheduled_for = when;
        }
        if let Some(stickers) = patch.stickers {
            task.stickers = stickers;
        }
        if let Some(location) = patch.location {
            task.location = location;
        }

        let updated = task.clone();
        self.touch();
        Some(updated)
    }

    /// Append a sticker to a task
    pub fn add_sticker(&mut self, id: TaskId, sticker: Sticker) -> Option<Task> {
        let mut stickers = self.get(id)?.stickers.clone();
        stickers.push(sticker);
        self.edit(
            id,
            TaskPatch {
                stickers: Some(stickers),
                ..Default::default()
            },
        )
    }

    /// Remove the sticker at `index` from a task
    ///
    /// Out-of-range indices leave the task untouched.
    ///
    /// # Returns
    /// The removed sticker if both the task and the index exist
    pub fn remove_sticker(&mut self, id: TaskId, index: usize) -> Option<Sticker> {
        let mut stickers = self.get(id)?.stickers.clone();
        if index >= stickers.len() {
            return None;
        }
        let removed = stickers.remove(index);
        self.edit(
            id,
            TaskPatch {
                stickers: Some(stickers),
                ..Default::default()
            },
        )?;
        Some(removed)
    }

    /// Find a task by its ID
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Snapshot of all tasks in insertion order
    pub fn all(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Borrowing view of all tasks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Tasks scheduled on a calendar day
    ///
    /// # Arguments
    /// * `date` - The day to list
    /// * `include_completed` - Whether completed tasks are kept
    pub fn tasks_on(&self, date: NaiveDate, include_completed: bool) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| t.is_on(date) && (include_completed || t.is_open()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Mutation counter, changes whenever the collection changes
    pub fn version(&self) -> u64 {
        self.version
    }
}
