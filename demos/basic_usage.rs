//! Basic usage example for the stock images library.
//!
//! Searches every registered source for a query and prints the rendered
//! blocks. Sources whose API key is missing show a web search link instead.
//!
//! ```sh
//! PEXELS_API_KEY=... cargo run --example basic_usage -- "mountain lake"
//! ```

use std::sync::Arc;

use stock_images_mcp::config::Config;
use stock_images_mcp::sources::{ApiClient, SourceRegistry};
use stock_images_mcp::utils::HttpClient;
use stock_images_mcp::{SearchRequest, StockImageService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "mountain lake".to_string());

    let config = Config::default();
    let registry = Arc::new(SourceRegistry::new());
    let client = ApiClient::new(HttpClient::from_config(&config.http)?, config.credentials());
    let service = StockImageService::new(registry.clone(), client);

    println!("Initialized {} stock image sources", registry.len());
    println!(
        "Available sources: {}\n",
        registry.ids().collect::<Vec<_>>().join(", ")
    );

    let request = SearchRequest::new(query).limit(3);
    for block in service.search(&request).await {
        println!("{}", block.text);
    }

    Ok(())
}
