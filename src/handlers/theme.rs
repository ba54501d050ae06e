//! Theme handler

use crate::TaskServerHandler;
use crate::formatting;
use crate::theme::ThemeId;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TaskServerHandler {
    /// Shows the current theme and the alternatives, switching first when a name is given.
    pub async fn handle_theme(&self, name: Option<String>) -> McpResult<String> {
        let requested = match name {
            Some(ref n) => Some(validation::parse_theme(n)?),
            None => None,
        };

        let mut session = self.session();
        let descriptor = match requested {
            Some(theme) => session.set_theme(theme),
            None => session.theme(),
        };

        let others = ThemeId::ALL
            .iter()
            .filter(|t| **t != descriptor.id)
            .map(|t| {
                let d = t.descriptor();
                format!("{} {}", d.emoji, t)
            })
            .collect::<Vec<_>>()
            .join(", ");
        let prefix = if requested.is_some() {
            "Theme set to "
        } else {
            "Current theme: "
        };
        Ok(format!(
            "{}{}\nOther themes: {}",
            prefix,
            formatting::format_theme(descriptor),
            others
        ))
    }
}
