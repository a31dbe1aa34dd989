//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:3001"
//! export API_PREFIX="/api/v1"
//! export ALLOWED_ORIGINS="http://localhost:3000,http://127.0.0.1:3000"
//! export SEED_COUNT=5000
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3001`)
//! - `API_PREFIX` - Path the REST API is mounted under (default: `/api/v1`)
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins
//!   (default: `http://localhost:3000,http://127.0.0.1:3000`)
//! - `SEED_COUNT` - Synthetic bookmarks created at startup (default: 5000, max: 100000)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use axum::http::HeaderValue;
use std::env;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:3001";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
pub const DEFAULT_SEED_COUNT: usize = 5000;
pub const MAX_SEED_COUNT: usize = 100_000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Empty means the API is served from the root.
    pub api_prefix: String,
    pub allowed_origins: Vec<String>,
    /// Number of synthetic bookmarks generated at startup. Zero starts empty.
    pub seed_count: usize,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Every variable is optional; unparsable numbers fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string());
        let api_prefix = env::var("API_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string());
        let allowed_origins = parse_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let seed_count = env::var("SEED_COUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SEED_COUNT);

        Ok(Self {
            listen_addr,
            api_prefix,
            allowed_origins,
            seed_count,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `api_prefix` does not start with `/`
    /// - `seed_count` exceeds 100000
    /// - an origin is not an `http(s)://` header-safe value
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            anyhow::bail!("API_PREFIX must start with '/', got '{}'", self.api_prefix);
        }

        if self.seed_count > MAX_SEED_COUNT {
            anyhow::bail!(
                "SEED_COUNT is too large (max: {}), got {}",
                MAX_SEED_COUNT,
                self.seed_count
            );
        }

        for origin in &self.allowed_origins {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                anyhow::bail!(
                    "ALLOWED_ORIGINS entries must start with 'http://' or 'https://', got '{}'",
                    origin
                );
            }
            if HeaderValue::from_str(origin).is_err() {
                anyhow::bail!("ALLOWED_ORIGINS contains an invalid origin '{}'", origin);
            }
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  API prefix: {}",
            if self.api_prefix.is_empty() {
                "/"
            } else {
                &self.api_prefix
            }
        );
        tracing::info!("  Allowed origins: {}", self.allowed_origins.join(", "));
        tracing::info!("  Seed count: {}", self.seed_count);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Trims whitespace and trailing slashes. `/` and blank become empty.
fn normalize_prefix(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
