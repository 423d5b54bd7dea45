//! Core data models for stock image sources and search operations.

mod block;
mod search;
mod source;

pub use block::{blocks_to_result, BlockOrigin, FormattedBlock};
pub use search::{SearchRequest, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use source::{ApiEndpoint, SourceDescriptor};
