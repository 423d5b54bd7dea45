//! # Stock Images MCP
//!
//! A Model Context Protocol (MCP) server that searches free stock image
//! sources. Sources with a public API (Unsplash, Pexels, Pixabay) return
//! parsed image listings when a credential is configured; every other case
//! degrades to a ready-to-open web search link.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (SourceDescriptor, SearchRequest, FormattedBlock)
//! - [`sources`]: Source registry, per-API request/response strategies and the API client
//! - [`format`]: Rendering of API payloads and web-link fallbacks into text blocks
//! - [`service`]: Search, source listing, status and resource operations
//! - [`mcp`]: MCP protocol implementation and server
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration and credential management

pub mod config;
pub mod format;
pub mod mcp;
pub mod models;
pub mod service;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{FormattedBlock, SearchRequest, SourceDescriptor};
pub use service::StockImageService;
pub use sources::{ApiClient, SourceRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
