//! Sticker handlers: add_sticker, remove_sticker, stickers

use crate::TaskServerHandler;
use crate::formatting;
use crate::theme::{self, STICKER_CATALOG};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TaskServerHandler {
    pub async fn handle_add_sticker(&self, id: String, sticker: String) -> McpResult<String> {
        let id = validation::parse_task_id(&id)?;
        let sticker = validation::parse_sticker(&sticker)?;

        match self.session().add_sticker(id, sticker.clone()) {
            Some(task) => Ok(format!(
                "Added {} {} to task #{} (now {} sticker(s))",
                sticker.emoji,
                sticker.label,
                id,
                task.stickers.len()
            )),
            None => bail_public!(_, "Task not found: Task '#{}' does not exist.", id),
        }
    }

    /// Removes a sticker by position; an out-of-range position changes nothing.
    pub async fn handle_remove_sticker(&self, id: String, index: u32) -> McpResult<String> {
        let id = validation::parse_task_id(&id)?;

        let mut session = self.session();
        let Some(count) = session.store().get(id).map(|t| t.stickers.len()) else {
            drop(session);
            bail_public!(_, "Task not found: Task '#{}' does not exist.", id);
        };
        match session.remove_sticker(id, index as usize) {
            Some(sticker) => Ok(format!(
                "Removed {} {} from task #{}",
                sticker.emoji, sticker.label, id
            )),
            None => Ok(format!(
                "Task #{} has no sticker at position {} ({} sticker(s)); nothing removed",
                id, index, count
            )),
        }
    }

    /// Shows the catalog: the current theme's categories by default.
    pub async fn handle_stickers(&self, category: Option<String>) -> McpResult<String> {
        let categories: Vec<_> = match category.as_deref().map(str::trim) {
            None | Some("") => {
                let current = self.session().theme().id;
                theme::categories_for_theme(current)
            }
            Some(c) if c.eq_ignore_ascii_case("all") => STICKER_CATALOG.iter().collect(),
            Some(c) => match theme::sticker_category(c) {
                Some(found) => vec![found],
                None => bail_public!(
                    _,
                    "Unknown sticker category '{}'. Valid options are: {}, all",
                    c,
                    STICKER_CATALOG
                        .iter()
                        .map(|c| c.key)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            },
        };
        Ok(formatting::format_sticker_categories(&categories))
    }
}
