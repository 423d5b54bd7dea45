//! Pixabay image source implementation.
//!
//! API documentation: <https://pixabay.com/api/docs/>

use serde_json::Value;

use super::fields::{optional_text, required_text};
use super::{FieldError, ImageApi, ImageSummary};

pub(crate) const PIXABAY_API_URL: &str = "https://pixabay.com/api/";

/// Pixabay search API
///
/// Unlike the others, the key is passed in the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixabayApi;

impl ImageApi for PixabayApi {
    fn max_per_page(&self) -> u32 {
        200
    }

    fn query_params(
        &self,
        query: &str,
        per_page: u32,
        api_key: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(key) = api_key {
            params.push(("key", key.to_string()));
        }
        params.push(("q", query.to_string()));
        params.push(("per_page", per_page.to_string()));
        params
    }

    fn items_field(&self) -> &'static str {
        "hits"
    }

    fn summarize(&self, item: &Value) -> Result<ImageSummary, FieldError> {
        Ok(ImageSummary {
            title: optional_text(item, "tags").unwrap_or_else(|| "Untagged".to_string()),
            url: required_text(item, &["webformatURL"])?,
            secondary: (
                "Large",
                optional_text(item, "largeImageURL").unwrap_or_else(|| "N/A".to_string()),
            ),
            attribution: ("User", required_text(item, &["user"])?),
            width: required_text(item, &["imageWidth"])?,
            height: required_text(item, &["imageHeight"])?,
        })
    }
}
