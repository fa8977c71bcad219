//! Crawl configuration
//!
//! Configuration for a mirror run comes from command-line arguments rather
//! than a config file. Validation happens in the constructor: a starting URL
//! that does not parse (or has no host) is the only class of error that is
//! fatal to the program.

use crate::{ConfigError, ConfigResult};
use std::path::PathBuf;
use url::Url;

/// Default number of concurrently in-flight HTTP requests
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a single crawl session
///
/// Read-only after construction; the session never mutates it.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The portal URL the crawl starts from
    pub base_url: Url,

    /// Local directory downloaded files are mirrored into
    pub destination: PathBuf,

    /// Maximum number of concurrently in-flight HTTP requests
    pub max_concurrent_fetches: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl CrawlConfig {
    /// Creates a validated configuration from raw CLI inputs
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidUrl` - the starting URL does not parse
    /// * `ConfigError::MissingHost` - the URL parses but has no host
    /// * `ConfigError::EmptyDestination` - no destination directory given
    pub fn new(url: &str, destination: &str) -> ConfigResult<Self> {
        let base_url = Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        if base_url.host_str().is_none() {
            return Err(ConfigError::MissingHost(url.to_string()));
        }

        if destination.is_empty() {
            return Err(ConfigError::EmptyDestination);
        }

        Ok(Self {
            base_url,
            destination: PathBuf::from(destination),
            max_concurrent_fetches: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Overrides the concurrency limit (values below 1 are clamped to 1)
    pub fn with_concurrency(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max.max(1);
        self
    }

    /// Overrides the per-request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }
}
