//! Tool handlers backed by the stock image service.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::models::{FormattedBlock, SearchRequest};
use crate::service::StockImageService;

/// Read the `sources` argument: an array of ids, or a single id.
///
/// Non-string entries are ignored. `None` means "all sources".
fn parse_sources(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        Value::String(id) => Some(vec![id.clone()]),
        _ => None,
    }
}

/// Read the `limit` argument; negative values clamp to the minimum later.
fn parse_limit(value: Option<&Value>) -> Option<u64> {
    value
        .and_then(Value::as_i64)
        .map(|n| n.max(0) as u64)
}

/// Handler for `search_stock_images`
#[derive(Debug)]
pub struct SearchStockImagesHandler {
    pub service: Arc<StockImageService>,
    pub default_limit: u32,
}

#[async_trait::async_trait]
impl ToolHandler for SearchStockImagesHandler {
    async fn execute(&self, args: Value) -> Result<Vec<FormattedBlock>, String> {
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let limit = parse_limit(args.get("limit")).unwrap_or(self.default_limit as u64);

        let mut request = SearchRequest::new(query).limit(limit);
        if let Some(sources) = parse_sources(args.get("sources")) {
            request = request.sources(sources);
        }

        Ok(self.service.search(&request).await)
    }
}

/// Handler for `get_stock_image_sources`
#[derive(Debug)]
pub struct GetStockImageSourcesHandler {
    pub service: Arc<StockImageService>,
}

#[async_trait::async_trait]
impl ToolHandler for GetStockImageSourcesHandler {
    async fn execute(&self, _args: Value) -> Result<Vec<FormattedBlock>, String> {
        Ok(self.service.list_sources())
    }
}

/// Handler for `check_api_status`
#[derive(Debug)]
pub struct CheckApiStatusHandler {
    pub service: Arc<StockImageService>,
}

#[async_trait::async_trait]
impl ToolHandler for CheckApiStatusHandler {
    async fn execute(&self, _args: Value) -> Result<Vec<FormattedBlock>, String> {
        Ok(self.service.check_status())
    }
}
