//! Portal endpoint shapes and URL construction
//!
//! The portal exposes three endpoints the crawler talks to. Server
//! compatibility depends on the exact query parameters built here, so the
//! construction rules live in one place and are unit tested against the
//! shapes the server expects.

pub mod doclist;
pub mod listing;

use crate::model::File;
use url::Url;

/// HTML folder-listing endpoint (GET, `FolderID` query parameter)
pub const LISTING_PATH: &str = "/GetFolder";

/// XML document-list endpoint (POST, `getDocHitList` action)
pub const DOC_LIST_PATH: &str = "/PublicAccessProvider.ashx";

/// Binary download endpoint (GET, `PDFStream` action)
pub const DOWNLOAD_PATH: &str = "/PDFProvider.ashx";

/// Form/query parameters for a document-list request
pub fn doc_list_params(folder_id: &str) -> [(&'static str, String); 3] {
    [
        ("action", "getDocHitList".to_string()),
        ("folderID", folder_id.to_string()),
        ("EncryptFolderID", "False".to_string()),
    ]
}

/// Builds the folder-listing URL for a folder id
///
/// Base URL with the path replaced by the listing endpoint and the query set
/// to `FolderID=<id>` alone.
pub fn listing_url(base: &Url, folder_id: &str) -> Url {
    let mut url = base.clone();
    url.set_path(LISTING_PATH);
    url.set_query(None);
    url.query_pairs_mut().append_pair("FolderID", folder_id);
    url
}

/// Builds the document-list URL for a folder id
///
/// The same parameters are also sent form-encoded in the POST body; the
/// query copy is what lets the response be routed back to its folder.
pub fn doc_list_url(base: &Url, folder_id: &str) -> Url {
    let mut url = base.clone();
    url.set_path(DOC_LIST_PATH);
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in doc_list_params(folder_id) {
            pairs.append_pair(key, &value);
        }
    }
    url
}

/// Builds the download URL for a file
///
/// Starts from the base URL's existing query so portal session parameters
/// survive, drops any `FolderID`, and sets the stream parameters the
/// download provider expects: `docID` is the document id, `docName` the file
/// name without its extension, `nativeExt` the uppercased extension without
/// the dot.
pub fn download_url(base: &Url, file: &File) -> Url {
    const SET_KEYS: [&str; 6] = [
        "action",
        "docID",
        "docName",
        "nativeExt",
        "PromptToSave",
        "ViewerMode",
    ];

    let carried: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "FolderID" && !SET_KEYS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.set_path(DOWNLOAD_PATH);
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &carried {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("action", "PDFStream");
        pairs.append_pair("docID", &file.id);
        pairs.append_pair("docName", file.stem());
        pairs.append_pair("nativeExt", &file.native_ext());
        pairs.append_pair("PromptToSave", "True");
        pairs.append_pair("ViewerMode", "1");
    }
    url
}

/// Extracts the `FolderID` query parameter from a URL, if present and non-empty
pub fn folder_id_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "FolderID")
        .map(|(_, value)| value.trim().to_string())
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://portal.example.com/Browse.aspx?FolderID=55&dbid=0").unwrap()
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_listing_url() {
        let url = listing_url(&base(), "7");
        assert_eq!(url.path(), "/GetFolder");
        assert_eq!(url.query(), Some("FolderID=7"));
    }

    #[test]
    fn test_listing_url_drops_base_query() {
        let url = listing_url(&base(), "7");
        assert_eq!(query_value(&url, "dbid"), None);
    }

    #[test]
    fn test_doc_list_url() {
        let url = doc_list_url(&base(), "55");
        assert_eq!(url.path(), "/PublicAccessProvider.ashx");
        assert_eq!(query_value(&url, "action").as_deref(), Some("getDocHitList"));
        assert_eq!(query_value(&url, "folderID").as_deref(), Some("55"));
        assert_eq!(query_value(&url, "EncryptFolderID").as_deref(), Some("False"));
    }

    #[test]
    fn test_download_url_scenario() {
        // A file named "Report.PDF" with id "123" must yield docID=123,
        // docName=Report, nativeExt=PDF and carry no FolderID.
        let file = File::new("Report.PDF", "123", "55");
        let url = download_url(&base(), &file);

        assert_eq!(url.path(), "/PDFProvider.ashx");
        assert_eq!(query_value(&url, "action").as_deref(), Some("PDFStream"));
        assert_eq!(query_value(&url, "docID").as_deref(), Some("123"));
        assert_eq!(query_value(&url, "docName").as_deref(), Some("Report"));
        assert_eq!(query_value(&url, "nativeExt").as_deref(), Some("PDF"));
        assert_eq!(query_value(&url, "PromptToSave").as_deref(), Some("True"));
        assert_eq!(query_value(&url, "ViewerMode").as_deref(), Some("1"));
        assert_eq!(query_value(&url, "FolderID"), None);
    }

    #[test]
    fn test_download_url_carries_session_params() {
        let file = File::new("a.pdf", "1", "2");
        let url = download_url(&base(), &file);
        assert_eq!(query_value(&url, "dbid").as_deref(), Some("0"));
    }

    #[test]
    fn test_download_url_without_extension() {
        let file = File::new("README", "9", "2");
        let url = download_url(&base(), &file);
        assert_eq!(query_value(&url, "docName").as_deref(), Some("README"));
        assert_eq!(query_value(&url, "nativeExt").as_deref(), Some(""));
    }

    #[test]
    fn test_folder_id_from_url() {
        assert_eq!(folder_id_from_url(&base()).as_deref(), Some("55"));

        let without = Url::parse("https://portal.example.com/").unwrap();
        assert_eq!(folder_id_from_url(&without), None);

        let empty = Url::parse("https://portal.example.com/?FolderID=").unwrap();
        assert_eq!(folder_id_from_url(&empty), None);
    }
}
