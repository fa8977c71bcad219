//! Crawl orchestration
//!
//! The crawler is split into three layers:
//! - [`fetcher`] wraps the HTTP client; every request resolves to a named
//!   [`FetchResult`] and transient failures never escape as errors,
//! - [`dispatch`] classifies completed responses into one of four recognized
//!   shapes and extracts records from them,
//! - [`session`] drives the traversal: at-most-once folder visitation,
//!   download issuance, persistence, and the completion barrier.

pub mod dispatch;
pub mod fetcher;
pub mod session;

pub use dispatch::{classify, route, Extraction, ResponseKind, SkipReason};
pub use fetcher::{build_http_client, Body, FetchResult};
pub use session::CrawlSession;

use crate::config::CrawlConfig;
use crate::Result;
use std::sync::Arc;

/// Runs a complete mirror crawl and returns the finished session
///
/// The returned session is read-only: use [`CrawlSession::tree`] and
/// [`CrawlSession::files`] to consume the results.
pub async fn run_mirror(config: CrawlConfig) -> Result<Arc<CrawlSession>> {
    let session = Arc::new(CrawlSession::new(config)?);
    session.run().await?;
    Ok(session)
}
