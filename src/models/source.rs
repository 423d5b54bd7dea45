//! Source descriptor model representing one stock image provider.

use std::sync::Arc;

use crate::sources::ImageApi;

/// API endpoint attached to a source, together with the strategy that knows
/// how to talk to it.
#[derive(Debug, Clone)]
pub struct ApiEndpoint {
    /// Endpoint URL the search request is sent to
    pub url: String,

    /// Request/response strategy for this endpoint
    pub adapter: Arc<dyn ImageApi>,
}

/// A stock image source from the registry
///
/// Descriptors are built once at startup and never mutated afterwards.
/// A source without an [`ApiEndpoint`] is a web-link-only source.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    /// Unique short identifier (e.g., "unsplash")
    pub id: String,

    /// Display name
    pub name: String,

    /// Prefix of the web search URL; the encoded query is appended to it
    pub base_url: String,

    /// Free text description
    pub description: String,

    /// Optional third-party API
    pub api: Option<ApiEndpoint>,

    /// Name of the environment variable holding the API credential
    pub api_key_env: Option<String>,
}

impl SourceDescriptor {
    /// Create a web-link-only source
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_url: base_url.into(),
            description: description.into(),
            api: None,
            api_key_env: None,
        }
    }

    /// Attach an API endpoint and its strategy
    pub fn with_api(mut self, url: impl Into<String>, adapter: Arc<dyn ImageApi>) -> Self {
        self.api = Some(ApiEndpoint {
            url: url.into(),
            adapter,
        });
        self
    }

    /// Require a credential read from the given environment variable
    pub fn with_api_key_env(mut self, env_var: impl Into<String>) -> Self {
        self.api_key_env = Some(env_var.into());
        self
    }

    /// The API endpoint URL, if this source has one
    pub fn api_url(&self) -> Option<&str> {
        self.api.as_ref().map(|api| api.url.as_str())
    }

    /// Whether calling the API needs a credential
    pub fn requires_api_key(&self) -> bool {
        self.api_key_env.is_some()
    }

    /// Whether this source only ever produces web search links
    pub fn is_web_only(&self) -> bool {
        self.api.is_none()
    }

    /// Build the browsable search URL for a query
    pub fn search_url(&self, query: &str) -> String {
        format!("{}{}", self.base_url, urlencoding::encode(query))
    }

    /// Resource URI for this source
    pub fn resource_uri(&self) -> String {
        format!("{}{}", crate::service::RESOURCE_SCHEME, self.id)
    }
}
