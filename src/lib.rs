//! Portal-Mirror: a document portal mirroring crawler
//!
//! This crate crawls a document-management web portal, discovers every folder
//! and file reachable from a starting URL, downloads each file to a path
//! mirroring the portal's folder hierarchy, and reconstructs that hierarchy
//! from parent identifiers collected out of order during concurrent fetches.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod portal;
pub mod registry;
pub mod tree;

use thiserror::Error;

/// Main error type for Portal-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// These are the only fatal errors in the crate: anything that goes wrong
/// after setup (fetch failures, malformed responses, write failures) is
/// logged and skipped so the crawl can finish best-effort.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid starting URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Starting URL has no host: {0}")]
    MissingHost(String),

    #[error("Destination path is empty")]
    EmptyDestination,
}

/// Result type alias for Portal-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::CrawlSession;
pub use model::{File, Folder};
pub use registry::Registry;
pub use tree::FolderTree;
