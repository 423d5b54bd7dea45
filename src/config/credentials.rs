//! Credential lookup by variable name.

use std::collections::HashMap;

/// Resolves API credentials by environment variable name.
///
/// Explicit values (from the config file, or set in tests) win; otherwise the
/// process environment is consulted unless the store is isolated. Empty
/// values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    overrides: HashMap<String, String>,
    read_env: bool,
}

impl Credentials {
    /// Store backed by the process environment
    pub fn from_env() -> Self {
        Self {
            overrides: HashMap::new(),
            read_env: true,
        }
    }

    /// Store that never reads the process environment
    pub fn isolated() -> Self {
        Self::default()
    }

    /// Set an explicit value for a variable
    pub fn with(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(var.into(), value.into());
        self
    }

    /// Look up the credential held by `var`
    pub fn lookup(&self, var: &str) -> Option<String> {
        let value = match self.overrides.get(var) {
            Some(value) => Some(value.clone()),
            None if self.read_env => std::env::var(var).ok(),
            None => None,
        };
        value.filter(|v| !v.is_empty())
    }
}
