//! `stock-images://` resource handler.

use std::sync::Arc;

use async_trait::async_trait;
use pmcp::{Error, ListResourcesResult, ReadResourceResult, RequestHandlerExtra, ResourceHandler};
use serde_json::json;

use crate::service::StockImageService;

/// Serves one descriptive page per registered source
#[derive(Debug, Clone)]
pub struct StockImageResources {
    service: Arc<StockImageService>,
}

impl StockImageResources {
    pub fn new(service: Arc<StockImageService>) -> Self {
        Self { service }
    }
}

/// Build a protocol result from its wire JSON
fn from_wire<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| Error::internal(e.to_string()))
}

#[async_trait]
impl ResourceHandler for StockImageResources {
    async fn read(&self, uri: &str, _extra: RequestHandlerExtra) -> Result<ReadResourceResult, Error> {
        let page = self
            .service
            .read_resource(uri)
            .map_err(|e| Error::invalid_params(e.to_string()))?;

        from_wire(json!({
            "contents": [{
                "type": "resource",
                "uri": uri,
                "mimeType": crate::service::RESOURCE_MIME_TYPE,
                "text": page,
            }]
        }))
    }

    async fn list(
        &self,
        _cursor: Option<String>,
        _extra: RequestHandlerExtra,
    ) -> Result<ListResourcesResult, Error> {
        let resources: Vec<_> = self
            .service
            .list_resources()
            .into_iter()
            .map(|entry| {
                json!({
                    "uri": entry.uri,
                    "name": entry.name,
                    "description": entry.description,
                    "mimeType": entry.mime_type,
                })
            })
            .collect();

        from_wire(json!({ "resources": resources }))
    }
}
