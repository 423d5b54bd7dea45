//! API configuration status report.

use crate::config::Credentials;
use crate::models::FormattedBlock;
use crate::sources::SourceRegistry;

/// Characters of a secret left visible when masking
const VISIBLE_PREFIX: usize = 8;

/// Mask a credential for display: the first 8 characters followed by `...`,
/// or `***` for anything 8 characters or shorter.
pub fn mask_credential(secret: &str) -> String {
    if secret.chars().count() > VISIBLE_PREFIX {
        let prefix: String = secret.chars().take(VISIBLE_PREFIX).collect();
        format!("{}...", prefix)
    } else {
        "***".to_string()
    }
}

pub(super) fn api_status(registry: &SourceRegistry, credentials: &Credentials) -> FormattedBlock {
    let mut content = String::from("# API Configuration Status\n\n");

    for source in registry.all() {
        content.push_str(&format!("## {}\n", source.name));

        let Some(api_url) = source.api_url() else {
            content.push_str("❌ **API Status:** No public API available\n");
            content.push_str("🔗 **Fallback:** Web search links only\n\n");
            continue;
        };

        content.push_str(&format!("✅ **API Endpoint:** {}\n", api_url));

        match source.api_key_env.as_deref() {
            Some(var) => match credentials.lookup(var) {
                Some(key) => content.push_str(&format!(
                    "✅ **API Key ({}):** Configured ({})\n",
                    var,
                    mask_credential(&key)
                )),
                None => content.push_str(&format!(
                    "❌ **API Key ({}):** Not found in environment\n",
                    var
                )),
            },
            None => content.push_str("✅ **API Key:** Not required\n"),
        }

        content.push('\n');
    }

    content.push_str("---\n\n");
    content.push_str("## Configuration Instructions\n\n");
    content.push_str("To enable API integration, set these environment variables:\n\n");

    for source in registry.all() {
        if let Some(var) = source.api_key_env.as_deref() {
            content.push_str(&format!(
                "- **{}:** `export {}=your_api_key_here`\n",
                source.name, var
            ));
        }
    }

    content.push_str(
        "\n**Note:** API keys provide richer data including image URLs, metadata, and direct download links.\n",
    );
    content.push_str("Without API keys, the service falls back to providing web search links.\n");

    FormattedBlock::report(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_long_secret() {
        assert_eq!(mask_credential("abcdefghijklmnop"), "abcdefgh...");
    }

    #[test]
    fn test_mask_short_secret() {
        assert_eq!(mask_credential("abcdefgh"), "***");
        assert_eq!(mask_credential(""), "***");
    }

    #[test]
    fn test_mask_multibyte_secret() {
        assert_eq!(mask_credential("ééééééééé"), "éééééééé...");
    }

    #[test]
    fn test_status_report() {
        let registry = SourceRegistry::new();
        let credentials = Credentials::isolated().with("PEXELS_API_KEY", "563492ad6f917000");

        let block = api_status(&registry, &credentials);
        let text = &block.text;

        assert!(text.starts_with("# API Configuration Status\n\n## Unsplash\n"));
        assert!(text.contains("✅ **API Key (PEXELS_API_KEY):** Configured (563492ad...)"));
        assert!(!text.contains("563492ad6f917000"));
        assert!(text.contains("❌ **API Key (UNSPLASH_ACCESS_KEY):** Not found in environment"));
        assert!(text.contains("## Freepik\n❌ **API Status:** No public API available\n"));
        assert!(text.contains("- **Pixabay:** `export PIXABAY_API_KEY=your_api_key_here`"));
        assert!(!text.contains("export FREEPIK"));
    }
}
