//! Unsplash image source implementation.
//!
//! API documentation: <https://unsplash.com/documentation#search-photos>

use serde_json::Value;

use super::fields::{optional_text, required_text};
use super::{FieldError, ImageApi, ImageSummary};

pub(crate) const UNSPLASH_API_URL: &str = "https://api.unsplash.com/search/photos";

/// Unsplash search API
///
/// The access key travels as `Authorization: Client-ID <key>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsplashApi;

impl ImageApi for UnsplashApi {
    fn max_per_page(&self) -> u32 {
        30
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
        Some(format!("Client-ID {}", api_key))
    }

    fn items_field(&self) -> &'static str {
        "results"
    }

    fn summarize(&self, item: &Value) -> Result<ImageSummary, FieldError> {
        Ok(ImageSummary {
            title: optional_text(item, "description").unwrap_or_else(|| "Untitled".to_string()),
            url: required_text(item, &["urls", "regular"])?,
            secondary: ("Download", required_text(item, &["links", "download"])?),
            attribution: ("Author", required_text(item, &["user", "name"])?),
            width: required_text(item, &["width"])?,
            height: required_text(item, &["height"])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let api = UnsplashApi;
        assert_eq!(api.max_per_page(), 30);
        assert_eq!(
            api.query_params("mountain lake", 5, Some("abc")),
            vec![
                ("query", "mountain lake".to_string()),
                ("per_page", "5".to_string())
            ]
        );
        assert_eq!(api.authorization("abc").as_deref(), Some("Client-ID abc"));
    }

    #[test]
    fn test_summarize() {
        let item = json!({
            "description": null,
            "urls": {"regular": "https://images.unsplash.com/photo-1"},
            "links": {"download": "https://unsplash.com/photos/1/download"},
            "user": {"name": "Ada"},
            "width": 4000,
            "height": 3000
        });
        let summary = UnsplashApi.summarize(&item).unwrap();
        assert_eq!(summary.title, "Untitled");
        assert_eq!(summary.url, "https://images.unsplash.com/photo-1");
        assert_eq!(summary.secondary.0, "Download");
        assert_eq!(summary.attribution, ("Author", "Ada".to_string()));
        assert_eq!(summary.width, "4000");
        assert_eq!(summary.height, "3000");
    }

    #[test]
    fn test_summarize_missing_user() {
        let item = json!({
            "urls": {"regular": "u"},
            "links": {"download": "d"},
            "width": 1,
            "height": 1
        });
        assert_eq!(
            UnsplashApi.summarize(&item).unwrap_err(),
            FieldError::Missing("user.name".to_string())
        );
    }
}
