//! Configuration management.
//!
//! Configuration is read from a TOML file and layered with environment
//! overrides prefixed `STOCK_IMAGES_` (nested keys separated by `__`, e.g.
//! `STOCK_IMAGES_HTTP__TIMEOUT_SECS=5`).
//!
//! ```toml
//! [api_keys]
//! unsplash = "your-access-key"
//! pexels = "your-api-key"
//! pixabay = "your-api-key"
//!
//! [http]
//! timeout_secs = 10
//!
//! [search]
//! default_limit = 5
//! ```

mod credentials;

pub use credentials::Credentials;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};

/// Config file name looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "stock-images-mcp.toml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API keys for the image APIs
    #[serde(default)]
    pub api_keys: ApiKeys,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Credential store seeded with the configured keys, falling back to the
    /// process environment
    pub fn credentials(&self) -> Credentials {
        let mut credentials = Credentials::from_env();
        let keys = [
            ("UNSPLASH_ACCESS_KEY", &self.api_keys.unsplash),
            ("PEXELS_API_KEY", &self.api_keys.pexels),
            ("PIXABAY_API_KEY", &self.api_keys.pixabay),
        ];
        for (var, value) in keys {
            if let Some(value) = value {
                credentials = credentials.with(var, value.clone());
            }
        }
        credentials
    }

    /// Copy with every configured key masked, safe to print
    pub fn redacted(&self) -> Self {
        let mask = |key: &Option<String>| key.as_deref().map(crate::service::mask_credential);
        let mut config = self.clone();
        config.api_keys = ApiKeys {
            unsplash: mask(&self.api_keys.unsplash),
            pexels: mask(&self.api_keys.pexels),
            pixabay: mask(&self.api_keys.pixabay),
        };
        config
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// API keys for external services
///
/// Values here take precedence over the matching environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    /// Unsplash access key (`UNSPLASH_ACCESS_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsplash: Option<String>,

    /// Pexels API key (`PEXELS_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pexels: Option<String>,

    /// Pixabay API key (`PIXABAY_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixabay: Option<String>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds, at least 1
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Override for the User-Agent header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Results per source when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl SearchConfig {
    /// Default limit clamped into the accepted range
    pub fn effective_limit(&self) -> u32 {
        self.default_limit.clamp(MIN_LIMIT, MAX_LIMIT)
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Load configuration from a file, layered with `STOCK_IMAGES_*` overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix("STOCK_IMAGES")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("stock-images-mcp").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Get the default configuration
pub fn get_config() -> Config {
    Config::default()
}
