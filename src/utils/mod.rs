//! Utility modules.
//!
//! - [`HttpClient`]: shared reqwest client with a bounded timeout and the
//!   crate's User-Agent
//!
//! ```rust,no_run
//! use stock_images_mcp::utils::HttpClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! assert_eq!(client.timeout().as_secs(), 10);
//! # Ok(())
//! # }
//! ```

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT, MIN_TIMEOUT};
