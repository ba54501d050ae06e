//! MCP tool handlers
//!
//! Each file groups the handlers of related tools. Handlers parse and
//! validate arguments, call into the session, and format the reply.

pub mod calendar;
pub mod stickers;
pub mod tasks;
pub mod theme;
pub mod timeline;
pub mod weather;
