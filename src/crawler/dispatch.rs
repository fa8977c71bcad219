//! Response classification and extraction
//!
//! A completed fetch is routed in two steps. [`classify`] is a pure function
//! of the request URL (path plus which query keys are present) that names one
//! of the four recognized response shapes. [`route`] then runs the matching
//! extraction over the body and returns an [`Extraction`] describing the side
//! effects the session should apply. Malformed bodies become an explicit
//! [`Extraction::Skip`] with a reason, never an error that stops the crawl.

use crate::crawler::fetcher::Body;
use crate::model::{File, Folder};
use crate::portal::{self, doclist, listing};
use std::fmt;
use url::Url;

/// The four recognized response shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    /// Folder-listing page for a known folder id
    SubdirListing { folder_id: String },

    /// Portal landing page carrying root-level folder links
    RootLinks,

    /// XML document list for a folder
    DocumentList { folder_id: String },

    /// Raw bytes of one document
    FileContent { doc_id: String },
}

/// Why a response produced no side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// A text endpoint answered with binary content
    BinaryBodyOnTextEndpoint,

    /// The download endpoint answered with text instead of bytes
    TextBodyOnBinaryEndpoint,

    /// The document-list body was not XML of the expected shape
    MalformedDocumentList,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::BinaryBodyOnTextEndpoint => "binary body on a text endpoint",
            Self::TextBodyOnBinaryEndpoint => "text body on the download endpoint",
            Self::MalformedDocumentList => "malformed document-list XML",
        };
        write!(f, "{text}")
    }
}

/// Outcome of extracting one response
#[derive(Debug)]
pub enum Extraction {
    /// Folders discovered in a listing or on the landing page
    Folders(Vec<Folder>),

    /// Files listed in a document-list response, owned by `folder_id`
    Documents { folder_id: String, docs: Vec<File> },

    /// Downloaded content for one document
    FileBytes { doc_id: String, bytes: Vec<u8> },

    /// The response produced no side effects
    Skip(SkipReason),
}

/// Classifies a request URL into a response kind
///
/// Pure function of the path and the query keys present. Requests that match
/// none of the portal endpoints (or an endpoint missing its discriminating
/// parameter) fall back to `RootLinks`: the only such request the session
/// ever issues is the landing-page fetch.
pub fn classify(url: &Url) -> ResponseKind {
    match url.path() {
        portal::LISTING_PATH => match portal::folder_id_from_url(url) {
            Some(folder_id) => ResponseKind::SubdirListing { folder_id },
            None => ResponseKind::RootLinks,
        },
        portal::DOC_LIST_PATH => match query_value(url, "folderID") {
            Some(folder_id) => ResponseKind::DocumentList { folder_id },
            None => ResponseKind::RootLinks,
        },
        portal::DOWNLOAD_PATH => match query_value(url, "docID") {
            Some(doc_id) => ResponseKind::FileContent { doc_id },
            None => ResponseKind::RootLinks,
        },
        _ => ResponseKind::RootLinks,
    }
}

/// Routes a completed response through classification and extraction
pub fn route(url: &Url, body: Body) -> Extraction {
    match classify(url) {
        ResponseKind::SubdirListing { folder_id } => match body {
            Body::Text(html) => Extraction::Folders(listing::parse_listing(&html, &folder_id)),
            Body::Bytes(_) => Extraction::Skip(SkipReason::BinaryBodyOnTextEndpoint),
        },
        ResponseKind::RootLinks => match body {
            Body::Text(html) => Extraction::Folders(listing::parse_root_links(&html, url)),
            Body::Bytes(_) => Extraction::Skip(SkipReason::BinaryBodyOnTextEndpoint),
        },
        ResponseKind::DocumentList { folder_id } => match body {
            Body::Text(xml) => match doclist::parse_doc_list(&xml, &folder_id) {
                Ok(docs) => Extraction::Documents { folder_id, docs },
                Err(_) => Extraction::Skip(SkipReason::MalformedDocumentList),
            },
            Body::Bytes(_) => Extraction::Skip(SkipReason::BinaryBodyOnTextEndpoint),
        },
        ResponseKind::FileContent { doc_id } => match body {
            Body::Bytes(bytes) => Extraction::FileBytes { doc_id, bytes },
            Body::Text(_) => Extraction::Skip(SkipReason::TextBodyOnBinaryEndpoint),
        },
    }
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
