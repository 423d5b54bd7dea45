//! Tool registry for MCP tools.

use std::sync::Arc;

use pmcp::{CallToolResult, ToolInfo};
use serde_json::Value;

use super::handlers::{
    CheckApiStatusHandler, GetStockImageSourcesHandler, SearchStockImagesHandler,
};
use crate::models::{blocks_to_result, FormattedBlock, MAX_LIMIT, MIN_LIMIT};
use crate::service::StockImageService;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_stock_images")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl Tool {
    /// Protocol metadata announced by `tools/list`
    pub fn info(&self) -> ToolInfo {
        ToolInfo::new(
            self.name.clone(),
            Some(self.description.clone()),
            self.input_schema.clone(),
        )
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Vec<FormattedBlock>, String>;
}

/// Registry for all MCP tools
///
/// This is the operation dispatcher: a tool name routes to exactly one
/// handler, and unknown names are rejected. Tools keep registration order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Create a tool registry with every stock image tool
    pub fn from_service(service: Arc<StockImageService>, default_limit: u32) -> Self {
        let mut registry = Self { tools: Vec::new() };

        let source_ids: Vec<String> = service.registry().ids().map(str::to_string).collect();

        registry.register(Tool {
            name: "search_stock_images".to_string(),
            description: "Search for free stock images from multiple sources".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query for stock images"
                    },
                    "sources": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": source_ids
                        },
                        "description": "Stock image sources to search (default: all sources)",
                        "default": source_ids
                    },
                    "limit": {
                        "type": "integer",
                        "description": format!("Maximum number of results per source (default: {})", default_limit),
                        "default": default_limit,
                        "minimum": MIN_LIMIT,
                        "maximum": MAX_LIMIT
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchStockImagesHandler {
                service: service.clone(),
                default_limit,
            }),
        });

        registry.register(Tool {
            name: "get_stock_image_sources".to_string(),
            description: "Get information about available free stock image sources".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            handler: Arc::new(GetStockImageSourcesHandler {
                service: service.clone(),
            }),
        });

        registry.register(Tool {
            name: "check_api_status".to_string(),
            description: "Check API key configuration status for stock image sources".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
            handler: Arc::new(CheckApiStatusHandler { service }),
        });

        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Tool) {
        match self.tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    /// Metadata of every tool, in registration order
    pub fn infos(&self) -> Vec<ToolInfo> {
        self.tools.iter().map(Tool::info).collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name; each returned block becomes one text entry
    pub async fn execute(&self, name: &str, args: Value) -> Result<CallToolResult, String> {
        let tool = self.get(name).ok_or_else(|| format!("Unknown tool: {}", name))?;

        tracing::debug!("Dispatching tool '{}'", name);
        let blocks = tool.handler.execute(args).await?;
        Ok(blocks_to_result(&blocks))
    }
}
