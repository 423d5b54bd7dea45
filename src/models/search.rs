//! Search request model.

use serde::{Deserialize, Serialize};

/// Default number of results requested per source
pub const DEFAULT_LIMIT: u32 = 5;

/// Smallest accepted per-source limit
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted per-source limit
pub const MAX_LIMIT: u32 = 20;

/// Search request parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query text
    pub query: String,

    /// Source ids to consult; `None` means every registered source
    pub sources: Option<Vec<String>>,

    /// Maximum results per source, always within `MIN_LIMIT..=MAX_LIMIT`
    pub limit: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            sources: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchRequest {
    /// Create a new search request
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Restrict the search to the given source ids
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }

    /// Set the per-source limit, clamped into the accepted range
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit.clamp(MIN_LIMIT as u64, MAX_LIMIT as u64) as u32;
        self
    }

    /// Whether the query carries any searchable text
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = SearchRequest::new("nature");
        assert_eq!(request.query, "nature");
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert!(request.sources.is_none());
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(SearchRequest::new("a").limit(0).limit, MIN_LIMIT);
        assert_eq!(SearchRequest::new("a").limit(7).limit, 7);
        assert_eq!(SearchRequest::new("a").limit(500).limit, MAX_LIMIT);
    }

    #[test]
    fn test_blank_query() {
        assert!(!SearchRequest::new("").has_query());
        assert!(!SearchRequest::new("   ").has_query());
        assert!(SearchRequest::new("sky").has_query());
    }
}
