//! Registry of stock image sources.

use std::collections::HashMap;
use std::sync::Arc;

use super::pexels::{PexelsApi, PEXELS_API_URL};
use super::pixabay::{PixabayApi, PIXABAY_API_URL};
use super::unsplash::{UnsplashApi, UNSPLASH_API_URL};
use crate::models::SourceDescriptor;

/// Registry lookup failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown stock image source: {0}")]
    NotFound(String),
}

/// Registry for all available stock image sources
///
/// Sources keep their declaration order; listing and default searches follow
/// it. The registry is built once and shared read-only.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceDescriptor>,
    index: HashMap<String, usize>,
}

impl SourceRegistry {
    /// Create a new registry with all built-in sources
    pub fn new() -> Self {
        Self::from_descriptors(vec![
            SourceDescriptor::new(
                "unsplash",
                "Unsplash",
                "https://unsplash.com/s/photos/",
                "Beautiful free photos & images",
            )
            .with_api(UNSPLASH_API_URL, Arc::new(UnsplashApi))
            .with_api_key_env("UNSPLASH_ACCESS_KEY"),
            SourceDescriptor::new(
                "pexels",
                "Pexels",
                "https://www.pexels.com/search/",
                "Free stock photos & royalty free images",
            )
            .with_api(PEXELS_API_URL, Arc::new(PexelsApi))
            .with_api_key_env("PEXELS_API_KEY"),
            SourceDescriptor::new(
                "pixabay",
                "Pixabay",
                "https://pixabay.com/images/search/",
                "Stunning royalty-free images & royalty-free stock",
            )
            .with_api(PIXABAY_API_URL, Arc::new(PixabayApi))
            .with_api_key_env("PIXABAY_API_KEY"),
            SourceDescriptor::new(
                "freepik",
                "Freepik",
                "https://www.freepik.com/search?format=search&query=",
                "Free vectors, stock photos, PSD and icons",
            ),
            SourceDescriptor::new(
                "burst",
                "Burst by Shopify",
                "https://burst.shopify.com/photos/search?q=",
                "Free stock photos for commercial use",
            ),
            SourceDescriptor::new(
                "stockvault",
                "StockVault",
                "https://www.stockvault.net/search/?q=",
                "Free graphics and photos",
            ),
        ])
    }

    /// Create a registry from explicit descriptors, in the given order.
    ///
    /// A later descriptor with an already-registered id replaces the earlier
    /// one in place.
    pub fn from_descriptors(descriptors: Vec<SourceDescriptor>) -> Self {
        let mut registry = Self {
            sources: Vec::with_capacity(descriptors.len()),
            index: HashMap::new(),
        };
        for descriptor in descriptors {
            registry.register(descriptor);
        }
        registry
    }

    fn register(&mut self, descriptor: SourceDescriptor) {
        match self.index.get(&descriptor.id) {
            Some(&pos) => self.sources[pos] = descriptor,
            None => {
                self.index.insert(descriptor.id.clone(), self.sources.len());
                self.sources.push(descriptor);
            }
        }
    }

    /// Get a source by ID
    pub fn get(&self, id: &str) -> Option<&SourceDescriptor> {
        self.index.get(id).map(|&pos| &self.sources[pos])
    }

    /// Get a source by ID, returning an error if not found
    pub fn get_required(&self, id: &str) -> Result<&SourceDescriptor, RegistryError> {
        self.get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// All sources in declaration order
    pub fn all(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter()
    }

    /// All source IDs in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id.as_str())
    }

    /// Sources that have a third-party API
    pub fn with_api(&self) -> Vec<&SourceDescriptor> {
        self.all().filter(|s| !s.is_web_only()).collect()
    }

    /// Credential variable names, in declaration order
    pub fn key_env_vars(&self) -> Vec<&str> {
        self.all().filter_map(|s| s.api_key_env.as_deref()).collect()
    }

    /// Resolve requested ids to sources, keeping request order.
    ///
    /// `None` selects every source. Unknown ids are skipped.
    pub fn resolve(&self, requested: Option<&[String]>) -> Vec<&SourceDescriptor> {
        match requested {
            None => self.all().collect(),
            Some(ids) => ids
                .iter()
                .filter_map(|id| {
                    let found = self.get(id);
                    if found.is_none() {
                        tracing::debug!("Skipping unknown source '{}'", id);
                    }
                    found
                })
                .collect(),
        }
    }

    /// Get the number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_basic() {
        let registry = SourceRegistry::new();

        assert_eq!(registry.len(), 6);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_declaration_order() {
        let registry = SourceRegistry::new();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(
            ids,
            ["unsplash", "pexels", "pixabay", "freepik", "burst", "stockvault"]
        );
    }

    #[test]
    fn test_get_source() {
        let registry = SourceRegistry::new();

        let pexels = registry.get("pexels");
        assert!(pexels.is_some());
        assert_eq!(pexels.unwrap().name, "Pexels");

        assert!(registry.get("nonexistent").is_none());
        assert_eq!(
            registry.get_required("nonexistent").unwrap_err(),
            RegistryError::NotFound("nonexistent".to_string())
        );
    }

    #[test]
    fn test_key_requirement_matches_env_var() {
        let registry = SourceRegistry::new();
        for source in registry.all() {
            assert_eq!(
                source.requires_api_key(),
                source.api_key_env.is_some(),
                "source '{}'",
                source.id
            );
        }
    }

    #[test]
    fn test_api_sources() {
        let registry = SourceRegistry::new();
        let with_api: Vec<_> = registry.with_api().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(with_api, ["unsplash", "pexels", "pixabay"]);

        for id in ["freepik", "burst", "stockvault"] {
            let source = registry.get(id).unwrap();
            assert!(source.api_url().is_none());
            assert!(!source.requires_api_key());
        }
    }

    #[test]
    fn test_key_env_vars() {
        assert_eq!(
            SourceRegistry::new().key_env_vars(),
            ["UNSPLASH_ACCESS_KEY", "PEXELS_API_KEY", "PIXABAY_API_KEY"]
        );
    }

    #[test]
    fn test_resolve_keeps_request_order_and_skips_unknown() {
        let registry = SourceRegistry::new();
        let requested = vec![
            "burst".to_string(),
            "nope".to_string(),
            "unsplash".to_string(),
        ];
        let ids: Vec<_> = registry
            .resolve(Some(&requested))
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["burst", "unsplash"]);

        assert_eq!(registry.resolve(None).len(), registry.len());
    }

    #[test]
    fn test_base_urls_are_http() {
        for source in SourceRegistry::new().all() {
            assert!(source.base_url.starts_with("https://"));
        }
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let registry = SourceRegistry::from_descriptors(vec![
            SourceDescriptor::new("a", "A", "https://a/", "first"),
            SourceDescriptor::new("b", "B", "https://b/", "b"),
            SourceDescriptor::new("a", "A2", "https://a2/", "second"),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(registry.get("a").unwrap().name, "A2");
    }
}
