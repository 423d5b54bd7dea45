use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use stock_images_mcp::config::{find_config_file, get_config, load_config, Config};
use stock_images_mcp::mcp::server::McpServer;
use stock_images_mcp::models::{FormattedBlock, SearchRequest};
use stock_images_mcp::service::StockImageService;
use stock_images_mcp::sources::{ApiClient, SourceRegistry};
use stock_images_mcp::utils::HttpClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Stock Images MCP - Search free stock image sources
#[derive(Parser, Debug)]
#[command(name = "stock-images-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search free stock image sources (Unsplash, Pexels, Pixabay and more)", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search stock image sources
    Search {
        /// Search query
        query: String,

        /// Source to search (repeatable; default: all sources)
        #[arg(long, short)]
        source: Vec<String>,

        /// Maximum results per source (1-20)
        #[arg(long, short)]
        limit: Option<u64>,
    },

    /// List available stock image sources
    Sources {
        /// Show base URLs and API details
        #[arg(long, short)]
        detailed: bool,
    },

    /// Show API key configuration status
    Status,

    /// Print the effective configuration as TOML (keys masked)
    Config,

    /// Run the MCP server
    Serve {
        /// Force stdio transport (the default; wins over --http)
        #[arg(long)]
        stdio: bool,

        /// Use HTTP transport (JSON-RPC POST on /mcp)
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// Host for HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Stock Images MCP - Environment Variables");
    println!();
    println!("API Keys:");
    println!("  UNSPLASH_ACCESS_KEY         Unsplash access key (https://unsplash.com/developers)");
    println!("  PEXELS_API_KEY              Pexels API key (https://www.pexels.com/api/)");
    println!("  PIXABAY_API_KEY             Pixabay API key (https://pixabay.com/api/docs/)");
    println!();
    println!("Configuration Overrides:");
    println!("  STOCK_IMAGES_HTTP__TIMEOUT_SECS       Request timeout in seconds (default: 10)");
    println!("  STOCK_IMAGES_HTTP__USER_AGENT         User-Agent header override");
    println!("  STOCK_IMAGES_SEARCH__DEFAULT_LIMIT    Results per source when no limit is given (default: 5)");
    println!("  STOCK_IMAGES_API_KEYS__UNSPLASH       Unsplash key (takes precedence over UNSPLASH_ACCESS_KEY)");
    println!("  STOCK_IMAGES_API_KEYS__PEXELS         Pexels key (takes precedence over PEXELS_API_KEY)");
    println!("  STOCK_IMAGES_API_KEYS__PIXABAY        Pixabay key (takes precedence over PIXABAY_API_KEY)");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging level (e.g., debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export PEXELS_API_KEY=\"your-key-here\"");
    println!("  export STOCK_IMAGES_HTTP__TIMEOUT_SECS=\"5\"");
}

/// Load configuration from the given path or the default locations
fn resolve_config(path: Option<&PathBuf>) -> Result<Config> {
    if let Some(config_path) = path {
        return Ok(load_config(config_path)?);
    }
    if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        return Ok(load_config(&config_path)?);
    }
    Ok(get_config())
}

fn print_blocks(blocks: &[FormattedBlock]) {
    for block in blocks {
        println!("{}", block.text);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    // Logs go to stderr: stdout carries the stdio transport
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("stock_images_mcp={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = resolve_config(cli.config.as_ref())?;
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    let registry = Arc::new(SourceRegistry::new());
    let client = ApiClient::new(HttpClient::from_config(&config.http)?, config.credentials());
    let service = Arc::new(StockImageService::new(registry.clone(), client));
    let default_limit = config.search.effective_limit();

    match cli.command {
        Some(Commands::Search {
            query,
            source,
            limit,
        }) => {
            let mut request = SearchRequest::new(query).limit(limit.unwrap_or(default_limit as u64));
            if !source.is_empty() {
                request = request.sources(source);
            }
            print_blocks(&service.search(&request).await);
        }

        Some(Commands::Sources { detailed }) => {
            for src in registry.all() {
                if detailed {
                    println!("{} ({})", src.name, src.id);
                    println!("  {}", src.description);
                    println!("  Web search: {}", src.base_url);
                    match (src.api_url(), src.api_key_env.as_deref()) {
                        (Some(url), Some(var)) => println!("  API: {} (key: {})", url, var),
                        (Some(url), None) => println!("  API: {}", url),
                        (None, _) => println!("  API: none (web links only)"),
                    }
                } else {
                    println!("{} - {}", src.id, src.name);
                }
            }
        }

        Some(Commands::Status) => {
            print_blocks(&service.check_status());
        }

        Some(Commands::Config) => {
            print!("{}", config.redacted().to_toml()?);
        }

        Some(Commands::Serve {
            stdio,
            http,
            port,
            host,
        }) => {
            let server = McpServer::new(service, default_limit)?;

            if http && !stdio {
                let addr = format!("{}:{}", host, port);
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                server.run().await?;
            }
        }

        None => {
            // No subcommand: behave like a plain MCP stdio server
            let server = McpServer::new(service, default_limit)?;
            server.run().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["stock-images-mcp"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(cli.timeout.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["stock-images-mcp", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_search_command() {
        let cli = Cli::parse_from([
            "stock-images-mcp",
            "search",
            "red car",
            "--source",
            "pexels",
            "-s",
            "burst",
            "--limit",
            "3",
        ]);
        match cli.command {
            Some(Commands::Search {
                query,
                source,
                limit,
            }) => {
                assert_eq!(query, "red car");
                assert_eq!(source, vec!["pexels", "burst"]);
                assert_eq!(limit, Some(3));
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_serve_command() {
        let cli = Cli::parse_from(["stock-images-mcp", "serve", "--http", "--port", "8080"]);
        match cli.command {
            Some(Commands::Serve { http, port, host, .. }) => {
                assert!(http);
                assert_eq!(port, 8080);
                assert_eq!(host, "127.0.0.1");
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_timeout_and_config() {
        let cli = Cli::parse_from([
            "stock-images-mcp",
            "--timeout",
            "4",
            "--config",
            "custom.toml",
            "status",
        ]);
        assert_eq!(cli.timeout, Some(4));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Some(Commands::Status)));
    }
}
