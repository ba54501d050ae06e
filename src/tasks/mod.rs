//! Task domain model and the in-memory task store
//!
//! - `task`: the `Task` record and its enums (`Priority`, `Location`, `Sticker`)
//! - `store`: `TaskStore`, the single owner of the task collection

mod store;
mod task;

pub use store::TaskStore;
pub use task::{
    Location, Priority, Sticker, Task, TaskDraft, TaskId, TaskPatch, local_date_today, local_now,
    start_of_day,
};
