//! Stock image operations: search, source listing, API status and resources.
//!
//! [`StockImageService`] owns the shared registry and API client and is what
//! the MCP tool handlers and the CLI call into.

mod catalog;
mod status;

pub use catalog::{ResourceEntry, ResourceError, RESOURCE_MIME_TYPE, RESOURCE_SCHEME};
pub use status::mask_credential;

use std::sync::Arc;

use futures_util::future::join_all;

use crate::format::{format_api, format_web_link};
use crate::models::{FormattedBlock, SearchRequest};
use crate::sources::{ApiClient, SourceRegistry};

/// Entry point for every stock image operation
#[derive(Debug, Clone)]
pub struct StockImageService {
    registry: Arc<SourceRegistry>,
    client: ApiClient,
}

impl StockImageService {
    pub fn new(registry: Arc<SourceRegistry>, client: ApiClient) -> Self {
        Self { registry, client }
    }

    /// The source registry
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Search the requested sources.
    ///
    /// Returns a header block, one block per resolved source in request order,
    /// and a trailing summary. A blank query yields a single error block and
    /// no requests are made.
    pub async fn search(&self, request: &SearchRequest) -> Vec<FormattedBlock> {
        if !request.has_query() {
            return vec![FormattedBlock::error("Error: Search query is required")];
        }

        let query = request.query.as_str();
        let sources = self.registry.resolve(request.sources.as_deref());
        tracing::debug!(
            "Searching {} sources for '{}' (limit {})",
            sources.len(),
            query,
            request.limit
        );

        // Fetches run concurrently; join_all yields results in input order.
        let outcomes = join_all(
            sources
                .iter()
                .map(|source| self.client.fetch(source, query, request.limit)),
        )
        .await;

        let mut blocks = Vec::with_capacity(sources.len() + 2);
        blocks.push(FormattedBlock::header(format!(
            "# Stock Image Search Results for '{}'\n",
            query
        )));

        let mut api_sources = Vec::new();
        let mut web_sources = Vec::new();

        for (source, outcome) in sources.iter().zip(outcomes) {
            match outcome {
                Ok(payload) => {
                    api_sources.push(source.id.as_str());
                    blocks.push(format_api(source, &payload));
                }
                Err(reason) => {
                    tracing::debug!("Using web link for {}: {}", source.id, reason);
                    web_sources.push(source.id.as_str());
                    blocks.push(format_web_link(source, query));
                }
            }
        }

        blocks.push(self.summary(query, sources.len(), &api_sources, &web_sources));
        blocks
    }

    fn summary(
        &self,
        query: &str,
        total: usize,
        api_sources: &[&str],
        web_sources: &[&str],
    ) -> FormattedBlock {
        let mut text = format!(
            "\n---\n**Search Summary**\n**Query:** {}\n**Total Sources:** {}\n",
            query, total
        );

        if !api_sources.is_empty() {
            text.push_str(&format!(
                "**API Integration:** {} ({} sources)\n",
                api_sources.join(", "),
                api_sources.len()
            ));
        }
        if !web_sources.is_empty() {
            text.push_str(&format!(
                "**Web Search Links:** {} ({} sources)\n",
                web_sources.join(", "),
                web_sources.len()
            ));
        }

        text.push_str(&format!(
            "\n**Note:** For API sources, configure environment variables ({}) to get actual image data. \
             Always check license requirements before using images.",
            self.registry.key_env_vars().join(", ")
        ));

        FormattedBlock::summary(text)
    }

    /// Describe every registered source, in registry order
    pub fn list_sources(&self) -> Vec<FormattedBlock> {
        vec![catalog::source_listing(&self.registry)]
    }

    /// Report API endpoint and credential state per source
    pub fn check_status(&self) -> Vec<FormattedBlock> {
        vec![status::api_status(&self.registry, self.client.credentials())]
    }

    /// Resources exposed for each source
    pub fn list_resources(&self) -> Vec<ResourceEntry> {
        catalog::resource_entries(&self.registry)
    }

    /// Read the descriptive page behind a `stock-images://<id>` URI
    pub fn read_resource(&self, uri: &str) -> Result<String, ResourceError> {
        catalog::read_resource(&self.registry, uri)
    }
}
