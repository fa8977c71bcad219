//! XML parsing for the document-list endpoint
//!
//! `getDocHitList` responses wrap a `DocumentCollection` element containing
//! one `Document` element per file in the folder. The root element's name
//! varies between portal versions, so only the inner shape is matched.

use crate::model::File;
use serde::Deserialize;

/// Document-list response body
#[derive(Debug, Deserialize)]
struct DocHitList {
    #[serde(rename = "DocumentCollection")]
    collection: DocumentCollection,
}

#[derive(Debug, Deserialize)]
struct DocumentCollection {
    #[serde(rename = "Document", default)]
    documents: Vec<DocumentEntry>,
}

/// One listed document
///
/// `DisplayType` is present in every response but carries rendering hints
/// the crawler has no use for.
#[derive(Debug, Deserialize)]
struct DocumentEntry {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "DisplayType", default)]
    #[allow(dead_code)]
    display_type: String,
}

/// Parses a document-list response into file records owned by `folder_id`
///
/// # Errors
///
/// Returns the deserialization error when the body is not XML of the
/// expected shape; callers treat that as a per-response skip.
pub fn parse_doc_list(xml: &str, folder_id: &str) -> Result<Vec<File>, quick_xml::DeError> {
    let parsed: DocHitList = quick_xml::de::from_str(xml)?;
    Ok(parsed
        .collection
        .documents
        .into_iter()
        .map(|doc| File::new(&doc.name, &doc.id, folder_id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_documents() {
        let xml = r#"
            <Response>
                <DocumentCollection>
                    <Document><ID>123</ID><Name>Report.PDF</Name><DisplayType>pdf</DisplayType></Document>
                    <Document><ID>124</ID><Name>Minutes.docx</Name><DisplayType>doc</DisplayType></Document>
                </DocumentCollection>
            </Response>
        "#;
        let files = parse_doc_list(xml, "55").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], File::new("Report.PDF", "123", "55"));
        assert_eq!(files[1].folder_id, "55");
    }

    #[test]
    fn test_root_element_name_is_ignored() {
        let xml = r#"
            <GetDocHitListResult>
                <DocumentCollection>
                    <Document><ID>1</ID><Name>a.pdf</Name><DisplayType>pdf</DisplayType></Document>
                </DocumentCollection>
            </GetDocHitListResult>
        "#;
        let files = parse_doc_list(xml, "7").unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_empty_collection() {
        let xml = "<Response><DocumentCollection></DocumentCollection></Response>";
        let files = parse_doc_list(xml, "55").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_display_type_still_parses() {
        let xml = r#"
            <Response><DocumentCollection>
                <Document><ID>9</ID><Name>plain.txt</Name></Document>
            </DocumentCollection></Response>
        "#;
        let files = parse_doc_list(xml, "2").unwrap();
        assert_eq!(files[0].name, "plain.txt");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_doc_list("this is not xml", "55").is_err());
        assert!(parse_doc_list("<Response><oops></Response>", "55").is_err());
    }

    #[test]
    fn test_missing_collection_is_an_error() {
        assert!(parse_doc_list("<Response></Response>", "55").is_err());
    }
}
