//! Weather handlers: weather, recommendations

use crate::TaskServerHandler;
use crate::formatting;
use mcp_attr::Result as McpResult;

impl TaskServerHandler {
    pub async fn handle_weather(&self, refresh: Option<bool>) -> McpResult<String> {
        let state = self.current_weather(refresh.unwrap_or(false)).await;
        Ok(formatting::format_weather_state(&state))
    }

    /// Recommends tasks for the current weather; loading and unavailable weather are reported as such.
    pub async fn handle_recommendations(&self) -> McpResult<String> {
        let state = self.current_weather(false).await;
        let recommendations = state
            .report()
            .map(|report| self.session().recommendations(&report.snapshot));
        Ok(formatting::format_recommendations(
            &state,
            recommendations.as_ref(),
        ))
    }
}
