//! Pexels image source implementation.
//!
//! API documentation: <https://www.pexels.com/api/documentation/#photos-search>

use serde_json::Value;

use super::fields::required_text;
use super::{FieldError, ImageApi, ImageSummary};

pub(crate) const PEXELS_API_URL: &str = "https://api.pexels.com/v1/search";

/// Pexels search API
///
/// The key is sent as the raw `Authorization` header value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PexelsApi;

impl ImageApi for PexelsApi {
    fn max_per_page(&self) -> u32 {
        80
    }

    fn query_params(
        &self,
        query: &str,
        per_page: u32,
        _api_key: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("query", query.to_string()),
            ("per_page", per_page.to_string()),
        ]
    }

    fn authorization(&self, api_key: &str) -> Option<String> {
        Some(api_key.to_string())
    }

    fn items_field(&self) -> &'static str {
        "photos"
    }

    fn summarize(&self, item: &Value) -> Result<ImageSummary, FieldError> {
        Ok(ImageSummary {
            title: format!("Photo #{}", required_text(item, &["id"])?),
            url: required_text(item, &["src", "large"])?,
            secondary: ("Medium", required_text(item, &["src", "medium"])?),
            attribution: ("Photographer", required_text(item, &["photographer"])?),
            width: required_text(item, &["width"])?,
            height: required_text(item, &["height"])?,
        })
    }
}
