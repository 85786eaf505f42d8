use std::time::Duration;

use anyhow::{Context, Result};

use crate::codes::DEFAULT_SCHEME;

/// Run configuration loaded from environment variables (and `.env`).
/// Command-line flags take precedence; see `with_overrides`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub code_scheme: String,
    pub icon: Option<String>,
    pub fetch_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let fetch_timeout = match non_empty(lookup("PLAYCARDS_FETCH_TIMEOUT_SECS")) {
            Some(raw) => raw
                .parse::<u64>()
                .context("PLAYCARDS_FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 30,
        };

        Ok(Config {
            code_scheme: non_empty(lookup("PLAYCARDS_CODE_SCHEME"))
                .unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
            icon: non_empty(lookup("PLAYCARDS_ICON")),
            fetch_timeout: Duration::from_secs(fetch_timeout),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Applies values given on the command line.
    pub fn with_overrides(mut self, scheme: Option<String>, icon: Option<String>) -> Self {
        if let Some(scheme) = scheme {
            self.code_scheme = scheme;
        }
        if icon.is_some() {
            self.icon = icon;
        }
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
