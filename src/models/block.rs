//! Formatted text blocks returned by every operation.

use pmcp::{CallToolResult, Content};
use serde::Serialize;

/// Where a block came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "source", rename_all = "snake_case")]
pub enum BlockOrigin {
    /// Leading title of a search response
    Header,
    /// Rendered API results for a source
    Api(String),
    /// Web search link fallback for a source
    WebLink(String),
    /// Trailing search summary
    Summary,
    /// Validation failure
    Error,
    /// Listing or diagnostic output
    Report,
}

/// One self-contained unit of formatted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedBlock {
    pub origin: BlockOrigin,
    pub text: String,
}

impl FormattedBlock {
    pub fn new(origin: BlockOrigin, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self::new(BlockOrigin::Header, text)
    }

    pub fn api(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(BlockOrigin::Api(source_id.into()), text)
    }

    pub fn web_link(source_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(BlockOrigin::WebLink(source_id.into()), text)
    }

    pub fn summary(text: impl Into<String>) -> Self {
        Self::new(BlockOrigin::Summary, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(BlockOrigin::Error, text)
    }

    pub fn report(text: impl Into<String>) -> Self {
        Self::new(BlockOrigin::Report, text)
    }

    /// Source id for per-source blocks
    pub fn source_id(&self) -> Option<&str> {
        match &self.origin {
            BlockOrigin::Api(id) | BlockOrigin::WebLink(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this block was produced from API data
    pub fn is_api(&self) -> bool {
        matches!(self.origin, BlockOrigin::Api(_))
    }

    /// Whether this block is a web-link fallback
    pub fn is_web_link(&self) -> bool {
        matches!(self.origin, BlockOrigin::WebLink(_))
    }

    /// MCP text content entry for this block
    pub fn to_content(&self) -> Content {
        Content::Text {
            text: self.text.clone(),
        }
    }
}

/// Wrap blocks into an MCP tool result, one text entry per block
pub fn blocks_to_result(blocks: &[FormattedBlock]) -> CallToolResult {
    CallToolResult::new(blocks.iter().map(FormattedBlock::to_content).collect())
}
