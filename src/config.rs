//! Configuration Module
//!
//! Loads gateway settings from environment variables, falling back to
//! defaults for anything unset or unparsable.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Gateway configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of cached weapons and pages, in seconds
    pub cache_ttl: u64,
    /// Maximum number of entries the in-memory cache holds
    pub cache_max_entries: usize,
    /// Interval between expired-entry sweeps, in seconds
    pub cleanup_interval: u64,
    /// Base URL of the remote weapons service. `None` runs the embedded one.
    pub weapons_backend_url: Option<String>,
    pub backend_connect_timeout: u64,
    pub backend_timeout: u64,
}

impl Config {
    /// Creates a Config from the process environment.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `CACHE_TTL` - Cache entry lifetime in seconds (default: 600)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 30)
    /// - `WEAPONS_BACKEND_URL` - Remote weapons service (default: embedded)
    /// - `BACKEND_CONNECT_TIMEOUT` - Connect timeout in seconds (default: 5)
    /// - `BACKEND_TIMEOUT` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any name-to-value lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port),
            cache_ttl: parse_or(&lookup, "CACHE_TTL", defaults.cache_ttl),
            cache_max_entries: parse_or(&lookup, "CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cleanup_interval: parse_or(&lookup, "CLEANUP_INTERVAL", defaults.cleanup_interval),
            weapons_backend_url: lookup("WEAPONS_BACKEND_URL")
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            backend_connect_timeout: parse_or(
                &lookup,
                "BACKEND_CONNECT_TIMEOUT",
                defaults.backend_connect_timeout,
            ),
            backend_timeout: parse_or(&lookup, "BACKEND_TIMEOUT", defaults.backend_timeout),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn backend_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_connect_timeout)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            cache_ttl: 600,
            cache_max_entries: 10_000,
            cleanup_interval: 30,
            weapons_backend_url: None,
            backend_connect_timeout: 5,
            backend_timeout: 10,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "invalid value, using default");
            default
        }),
        None => default,
    }
}
