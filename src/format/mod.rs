//! Rendering of search results into text blocks.
//!
//! - [`format_api`] turns a source's raw API payload into a numbered listing
//! - [`format_web_link`] builds the web search fallback for any source

mod api;
mod web;

pub use api::{format_api, MAX_DISPLAY_ITEMS};
pub use web::format_web_link;
