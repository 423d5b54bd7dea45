//! MCP (Model Context Protocol) implementation.

mod handlers;
mod resources;
pub mod server;
mod tools;

pub use resources::StockImageResources;
pub use server::{router, McpServer, MCP_HTTP_PATH};
pub use tools::{Tool, ToolHandler, ToolRegistry};
