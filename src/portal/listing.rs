//! HTML extraction for folder listings and root-level folder links
//!
//! Two of the portal's response shapes are HTML:
//! - the folder-listing page, a table whose rows each name one subfolder
//!   (`tbody#docTableBody tr`, name in `td a`, id in the hidden cell), and
//! - the landing page, where root folders appear as anchors decorated with a
//!   folder icon (`i.fa-folder-o + a`) and carry their id in the href's
//!   `FolderID` query parameter.
//!
//! Extraction is lenient: rows or anchors missing the expected pieces are
//! skipped individually rather than failing the whole page.

use crate::model::Folder;
use crate::portal::folder_id_from_url;
use scraper::{Html, Selector};
use url::Url;

/// Extracts subfolder records from a folder-listing page
///
/// `parent_id` is the folder id the listing was requested for; every
/// extracted folder gets it as its parent identifier.
pub fn parse_listing(html: &str, parent_id: &str) -> Vec<Folder> {
    let document = Html::parse_document(html);
    let mut folders = Vec::new();

    let Ok(row_selector) = Selector::parse("tbody#docTableBody tr") else {
        return folders;
    };
    let Ok(name_selector) = Selector::parse("td a") else {
        return folders;
    };
    let Ok(id_selector) = Selector::parse("td.hidden") else {
        return folders;
    };

    for row in document.select(&row_selector) {
        let name = row
            .select(&name_selector)
            .next()
            .map(|cell| cell.text().collect::<String>())
            .unwrap_or_default();
        let id = row
            .select(&id_selector)
            .next()
            .map(|cell| cell.text().collect::<String>())
            .unwrap_or_default();

        if id.trim().is_empty() {
            continue;
        }
        folders.push(Folder::with_parent(&name, &id, parent_id));
    }

    folders
}

/// Extracts root-level folder links from the portal landing page
///
/// The parent of a root-level folder is unknown; records come back
/// parentless. Anchors whose href lacks a usable `FolderID` are skipped.
pub fn parse_root_links(html: &str, base_url: &Url) -> Vec<Folder> {
    let document = Html::parse_document(html);
    let mut folders = Vec::new();

    let Ok(link_selector) = Selector::parse("i.fa-folder-o + a") else {
        return folders;
    };

    for anchor in document.select(&link_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base_url.join(href) else {
            continue;
        };
        let Some(id) = folder_id_from_url(&resolved) else {
            continue;
        };
        let name = anchor.text().collect::<String>();
        folders.push(Folder::new(&name, &id));
    }

    folders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://portal.example.com/Browse.aspx").unwrap()
    }

    #[test]
    fn test_parse_listing_rows() {
        let html = r##"
            <table><tbody id="docTableBody">
                <tr><td><a href="#">Budgets</a></td><td class="hidden">10</td></tr>
                <tr><td><a href="#">Minutes</a></td><td class="hidden"> 11 </td></tr>
            </tbody></table>
        "##;
        let folders = parse_listing(html, "55");
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0], Folder::with_parent("Budgets", "10", "55"));
        assert_eq!(folders[1].id, "11");
        assert_eq!(folders[1].parent_id, "55");
    }

    #[test]
    fn test_parse_listing_skips_rows_without_id() {
        let html = r##"
            <table><tbody id="docTableBody">
                <tr><td><a href="#">No id cell</a></td></tr>
                <tr><td><a href="#">Good</a></td><td class="hidden">3</td></tr>
            </tbody></table>
        "##;
        let folders = parse_listing(html, "1");
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Good");
    }

    #[test]
    fn test_parse_listing_ignores_other_tables() {
        let html = r##"
            <table><tbody id="navTable">
                <tr><td><a href="#">Nav</a></td><td class="hidden">99</td></tr>
            </tbody></table>
        "##;
        assert!(parse_listing(html, "1").is_empty());
    }

    #[test]
    fn test_parse_listing_malformed_html_yields_nothing() {
        assert!(parse_listing("<<<%%% not html", "1").is_empty());
    }

    #[test]
    fn test_parse_root_links() {
        let html = r#"
            <div>
                <i class="fa-folder-o"></i><a href="/Browse.aspx?FolderID=100">Public Records</a>
                <i class="fa-folder-o"></i><a href="?FolderID=200">Agendas</a>
            </div>
        "#;
        let folders = parse_root_links(html, &base_url());
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0], Folder::new("Public Records", "100"));
        assert_eq!(folders[1].id, "200");
        assert!(folders[1].is_parentless());
    }

    #[test]
    fn test_parse_root_links_skips_links_without_folder_id() {
        let html = r#"
            <i class="fa-folder-o"></i><a href="/help">Help</a>
            <i class="fa-folder-o"></i><a href="/Browse.aspx?FolderID=5">Kept</a>
        "#;
        let folders = parse_root_links(html, &base_url());
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].id, "5");
    }

    #[test]
    fn test_parse_root_links_ignores_plain_anchors() {
        // Anchors not preceded by the folder icon are navigation, not folders.
        let html = r#"<a href="/Browse.aspx?FolderID=5">Not a folder link</a>"#;
        assert!(parse_root_links(html, &base_url()).is_empty());
    }
}
