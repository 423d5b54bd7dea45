//! Web search link fallback.

use crate::models::{FormattedBlock, SourceDescriptor};

/// Render the web search block for a source
pub fn format_web_link(source: &SourceDescriptor, query: &str) -> FormattedBlock {
    let url = source.search_url(query);
    FormattedBlock::web_link(
        source.id.clone(),
        format!(
            "\n## {name} (Web Search)\n**Description:** {description}\n**Search URL:** {url}\n**Direct Link:** [Search '{query}' on {name}]({url})\n",
            name = source.name,
            description = source.description,
            url = url,
            query = query,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceRegistry;

    #[test]
    fn test_web_link_block() {
        let registry = SourceRegistry::new();
        let burst = registry.get("burst").unwrap();

        let block = format_web_link(burst, "red car");
        assert!(block.is_web_link());
        assert_eq!(block.source_id(), Some("burst"));
        assert_eq!(
            block.text,
            "\n## Burst by Shopify (Web Search)\n\
             **Description:** Free stock photos for commercial use\n\
             **Search URL:** https://burst.shopify.com/photos/search?q=red%20car\n\
             **Direct Link:** [Search 'red car' on Burst by Shopify](https://burst.shopify.com/photos/search?q=red%20car)\n"
        );
    }
}
