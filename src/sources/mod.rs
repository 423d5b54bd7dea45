//! Stock image sources with a pluggable per-API strategy.
//!
//! Every source lives in the [`SourceRegistry`] as a [`SourceDescriptor`].
//! Sources that expose a public search API carry an [`ImageApi`]
//! implementation describing the wire shape of that API: query parameter
//! names, how the credential is sent, the page size cap, and where each field
//! lives in the JSON payload. Adding an API-backed source means implementing
//! [`ImageApi`] and registering a descriptor that points at it.
//!
//! # Credentials
//!
//! API-backed sources need a credential, read from a per-source environment
//! variable (or the `[api_keys]` section of the config file):
//!
//! - `UNSPLASH_ACCESS_KEY` - Unsplash access key, sent as `Authorization: Client-ID <key>`
//! - `PEXELS_API_KEY` - Pexels key, sent as the raw `Authorization` header
//! - `PIXABAY_API_KEY` - Pixabay key, sent as the `key` query parameter
//!
//! A source without a credential is never called; it falls back to a web
//! search link.
//!
//! [`SourceDescriptor`]: crate::models::SourceDescriptor

mod client;
mod fields;
mod pexels;
mod pixabay;
mod registry;
mod unsplash;

pub use client::ApiClient;
pub use pexels::PexelsApi;
pub use pixabay::PixabayApi;
pub use registry::{RegistryError, SourceRegistry};
pub use unsplash::UnsplashApi;

use serde_json::Value;

/// Normalized view of one image listing, extracted from an API payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    /// Title line (description, tags, or a photo number)
    pub title: String,

    /// Primary image URL
    pub url: String,

    /// Secondary URL with its label (e.g., "Download", "Medium", "Large")
    pub secondary: (&'static str, String),

    /// Attribution with its label (e.g., "Author", "Photographer", "User")
    pub attribution: (&'static str, String),

    pub width: String,
    pub height: String,
}

/// Request/response strategy for one third-party image search API.
///
/// The defaults describe a generic `?q=<query>&per_page=<n>` endpoint with no
/// authentication and a page cap of 20.
pub trait ImageApi: Send + Sync + std::fmt::Debug {
    /// Largest page size this API accepts
    fn max_per_page(&self) -> u32 {
        20
    }

    /// Query string parameters, in the order they are sent
    fn query_params(
        &self,
        query: &str,
        per_page: u32,
        _api_key: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        vec![("q", query.to_string()), ("per_page", per_page.to_string())]
    }

    /// Value of the `Authorization` header, if the key travels in a header
    fn authorization(&self, _api_key: &str) -> Option<String> {
        None
    }

    /// Name of the top-level array holding the listings
    fn items_field(&self) -> &'static str;

    /// Extract the displayed fields of one listing
    fn summarize(&self, item: &Value) -> Result<ImageSummary, FieldError>;
}

/// Reasons an API result is unavailable for a source
///
/// Every variant is recovered locally by falling back to a web search link.
#[derive(Debug, thiserror::Error)]
pub enum Unavailable {
    /// The source has no public API
    #[error("No public API available")]
    NoApi,

    /// The credential variable is unset or empty
    #[error("API key not found in environment variable {0}")]
    NoCredential(String),

    /// Network failure, timeout, or non-success status
    #[error("API request failed: {0}")]
    Transport(String),

    /// Response body is not the expected JSON
    #[error("Failed to parse JSON response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for Unavailable {
    fn from(err: reqwest::Error) -> Self {
        Unavailable::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Unavailable {
    fn from(err: serde_json::Error) -> Self {
        Unavailable::MalformedResponse(err.to_string())
    }
}

/// A field expected in an API payload was missing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("missing field '{0}'")]
    Missing(String),
}
