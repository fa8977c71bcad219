//! HTTP fetcher implementation
//!
//! Thin wrappers around a shared `reqwest::Client`. Every request resolves to
//! a [`FetchResult`]: network errors, timeouts and non-2xx statuses all map
//! to `Failed`, which the session logs and drops. There is no retry; a failed
//! fetch simply means that branch of discovery does not happen.

use crate::portal::doc_list_params;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Response payload, text for the HTML/XML endpoints and raw bytes for downloads
#[derive(Debug, Clone)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
}

/// Result of a fetch operation
///
/// The originating request URL is carried in both variants: the dispatcher
/// classifies responses by it, and failures are logged against it.
#[derive(Debug)]
pub enum FetchResult {
    /// The request completed with a 2xx status
    Success { url: Url, body: Body },

    /// Network error, timeout, or non-2xx status
    Failed { url: Url, error: String },
}

/// Builds the HTTP client shared by all fetches in a session
///
/// No scheme restriction is applied: document portals are frequently served
/// over plain HTTP on intranet hosts.
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    let user_agent = format!("portal-mirror/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// GETs a URL expecting a text (HTML or XML) body
pub async fn fetch_text(client: &Client, url: Url) -> FetchResult {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchResult::Failed {
                    url,
                    error: format!("HTTP {status}"),
                };
            }
            match response.text().await {
                Ok(text) => FetchResult::Success {
                    url,
                    body: Body::Text(text),
                },
                Err(e) => FetchResult::Failed {
                    url,
                    error: e.to_string(),
                },
            }
        }
        Err(e) => FetchResult::Failed {
            url,
            error: e.to_string(),
        },
    }
}

/// GETs a URL expecting a binary body
pub async fn fetch_bytes(client: &Client, url: Url) -> FetchResult {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchResult::Failed {
                    url,
                    error: format!("HTTP {status}"),
                };
            }
            match response.bytes().await {
                Ok(bytes) => FetchResult::Success {
                    url,
                    body: Body::Bytes(bytes.to_vec()),
                },
                Err(e) => FetchResult::Failed {
                    url,
                    error: e.to_string(),
                },
            }
        }
        Err(e) => FetchResult::Failed {
            url,
            error: e.to_string(),
        },
    }
}

/// POSTs a document-list request for a folder
///
/// The parameters ride in the URL query (used to route the response back to
/// its folder) and again form-encoded in the body, which is what the
/// provider endpoint actually reads.
pub async fn post_doc_list(client: &Client, url: Url, folder_id: &str) -> FetchResult {
    let request = client.post(url.clone()).form(&doc_list_params(folder_id));
    match request.send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchResult::Failed {
                    url,
                    error: format!("HTTP {status}"),
                };
            }
            match response.text().await {
                Ok(text) => FetchResult::Success {
                    url,
                    body: Body::Text(text),
                },
                Err(e) => FetchResult::Failed {
                    url,
                    error: e.to_string(),
                },
            }
        }
        Err(e) => FetchResult::Failed {
            url,
            error: e.to_string(),
        },
    }
}
