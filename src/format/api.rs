//! API payload rendering.

use std::fmt::Write as _;

use serde_json::Value;

use crate::models::{FormattedBlock, SourceDescriptor};
use crate::sources::ImageSummary;

/// Listings shown per source, whatever the requested limit
// TODO: decide whether the display cap should follow the request limit.
pub const MAX_DISPLAY_ITEMS: usize = 5;

/// Render a source's API payload as a numbered listing.
///
/// A listing missing a required field stops the rendering for that source
/// and leaves an inline note; the block is still returned so the remaining
/// sources are unaffected. A web-only descriptor yields the header alone.
pub fn format_api(source: &SourceDescriptor, payload: &Value) -> FormattedBlock {
    let mut text = format!(
        "\n{} (API Results)\nDescription: {}\n\n",
        source.name, source.description
    );

    if let Some(api) = &source.api {
        let adapter = &api.adapter;
        let items = payload
            .get(adapter.items_field())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for (i, item) in items.iter().take(MAX_DISPLAY_ITEMS).enumerate() {
            match adapter.summarize(item) {
                Ok(summary) => write_item(&mut text, i + 1, &summary),
                Err(e) => {
                    tracing::error!("Error parsing {} API response: {}", source.id, e);
                    let _ = writeln!(text, "Error parsing API response: {}", e);
                    break;
                }
            }
        }
    }

    FormattedBlock::api(source.id.clone(), text)
}

fn write_item(out: &mut String, number: usize, item: &ImageSummary) {
    let _ = write!(
        out,
        "{}. {}\n- URL: {}\n- {}: {}\n- {}: {}\n- Dimensions: {}x{}\n\n",
        number,
        item.title,
        item.url,
        item.secondary.0,
        item.secondary.1,
        item.attribution.0,
        item.attribution.1,
        item.width,
        item.height
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceRegistry;
    use serde_json::json;

    fn pexels_photo(id: u64) -> Value {
        json!({
            "id": id,
            "width": 1920,
            "height": 1080,
            "photographer": "Jane",
            "src": {
                "large": format!("https://p/{}/large", id),
                "medium": format!("https://p/{}/medium", id)
            }
        })
    }

    #[test]
    fn test_pexels_block() {
        let registry = SourceRegistry::new();
        let pexels = registry.get("pexels").unwrap();
        let payload = json!({"photos": [pexels_photo(7)]});

        let block = format_api(pexels, &payload);
        assert!(block.is_api());
        assert_eq!(block.source_id(), Some("pexels"));
        assert_eq!(
            block.text,
            "\nPexels (API Results)\nDescription: Free stock photos & royalty free images\n\n\
             1. Photo #7\n- URL: https://p/7/large\n- Medium: https://p/7/medium\n\
             - Photographer: Jane\n- Dimensions: 1920x1080\n\n"
        );
    }

    #[test]
    fn test_display_is_capped_at_five() {
        let registry = SourceRegistry::new();
        let pexels = registry.get("pexels").unwrap();
        let photos: Vec<_> = (1..=8).map(pexels_photo).collect();

        let block = format_api(pexels, &json!({ "photos": photos }));
        assert!(block.text.contains("5. Photo #5"));
        assert!(!block.text.contains("6. Photo"));
    }

    #[test]
    fn test_missing_field_adds_inline_note() {
        let registry = SourceRegistry::new();
        let unsplash = registry.get("unsplash").unwrap();
        let payload = json!({
            "results": [
                {
                    "description": "Foggy forest",
                    "urls": {"regular": "https://u/1"},
                    "links": {"download": "https://u/1/download"},
                    "user": {"name": "Ana"},
                    "width": 10,
                    "height": 20
                },
                {"description": "broken"},
                {
                    "description": "never shown",
                    "urls": {"regular": "https://u/3"},
                    "links": {"download": "https://u/3/download"},
                    "user": {"name": "Bo"},
                    "width": 1,
                    "height": 1
                }
            ]
        });

        let block = format_api(unsplash, &payload);
        assert!(block.text.contains("1. Foggy forest"));
        assert!(block
            .text
            .contains("Error parsing API response: missing field 'urls.regular'"));
        assert!(!block.text.contains("never shown"));
    }

    #[test]
    fn test_missing_list_renders_header_only() {
        let registry = SourceRegistry::new();
        let pixabay = registry.get("pixabay").unwrap();
        let block = format_api(pixabay, &json!({"total": 0}));
        assert_eq!(
            block.text,
            "\nPixabay (API Results)\nDescription: Stunning royalty-free images & royalty-free stock\n\n"
        );
    }
}
