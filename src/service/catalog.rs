//! Source listing and `stock-images://` resources.

use crate::models::FormattedBlock;
use crate::sources::{RegistryError, SourceRegistry};

/// URI scheme of per-source resources
pub const RESOURCE_SCHEME: &str = "stock-images://";

/// MIME type of every resource page
pub const RESOURCE_MIME_TYPE: &str = "text/plain";

/// Resource read failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("Unknown resource: {0}")]
    UnknownScheme(String),

    #[error(transparent)]
    UnknownSource(#[from] RegistryError),
}

/// One listed resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: &'static str,
}

pub(super) fn source_listing(registry: &SourceRegistry) -> FormattedBlock {
    let mut content = String::from("Available Free Stock Image Sources\n");

    for source in registry.all() {
        content.push_str(&format!("## {}\n", source.name));
        content.push_str(&format!("ID: `{}`\n", source.id));
        content.push_str(&format!("Description: {}\n", source.description));
        content.push_str(&format!("Base URL: {}\n", source.base_url));
        content.push('\n');
    }

    content.push_str("---\n");
    content.push_str(&format!("Total Sources: {}\n", registry.len()));
    content.push_str("Usage: Use the `search_stock_images` tool to search across these sources.\n");

    FormattedBlock::report(content)
}

pub(super) fn resource_entries(registry: &SourceRegistry) -> Vec<ResourceEntry> {
    registry
        .all()
        .map(|source| ResourceEntry {
            uri: source.resource_uri(),
            name: format!("{} Stock Images", source.name),
            description: source.description.clone(),
            mime_type: RESOURCE_MIME_TYPE,
        })
        .collect()
}

pub(super) fn read_resource(registry: &SourceRegistry, uri: &str) -> Result<String, ResourceError> {
    let id = uri
        .strip_prefix(RESOURCE_SCHEME)
        .ok_or_else(|| ResourceError::UnknownScheme(uri.to_string()))?;

    let source = registry.get_required(id)?;

    Ok(format!(
        "# {}\n\n{}\n\nBase URL: {}\n\nTo search for images, use the search_stock_images tool with this source.\n",
        source.name, source.description, source.base_url
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_has_one_entry_per_source_in_order() {
        let registry = SourceRegistry::new();
        let text = source_listing(&registry).text;

        assert_eq!(text.matches("## ").count(), registry.len());
        let positions: Vec<_> = registry
            .ids()
            .map(|id| text.find(&format!("ID: `{}`", id)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("Total Sources: 6\n"));
    }

    #[test]
    fn test_resource_entries() {
        let entries = resource_entries(&SourceRegistry::new());
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].uri, "stock-images://unsplash");
        assert_eq!(entries[0].name, "Unsplash Stock Images");
        assert_eq!(entries[0].mime_type, "text/plain");
    }

    #[test]
    fn test_read_resource() {
        let page = read_resource(&SourceRegistry::new(), "stock-images://pixabay").unwrap();
        assert_eq!(
            page,
            "# Pixabay\n\nStunning royalty-free images & royalty-free stock\n\n\
             Base URL: https://pixabay.com/images/search/\n\n\
             To search for images, use the search_stock_images tool with this source.\n"
        );
    }

    #[test]
    fn test_read_resource_errors() {
        let registry = SourceRegistry::new();

        let err = read_resource(&registry, "https://pixabay.com").unwrap_err();
        assert_eq!(err.to_string(), "Unknown resource: https://pixabay.com");

        let err = read_resource(&registry, "stock-images://gettyimages").unwrap_err();
        assert_eq!(err.to_string(), "Unknown stock image source: gettyimages");
    }
}
