//! File records discovered from document-list responses
use std::fmt;

/// A downloadable document discovered on the portal
///
/// Unlike folders, a file's owning folder is always known at parse time: it
/// is the folder whose document list produced the record. `folder_id` is
/// therefore never empty (a placeholder folder is synthesized when the id is
/// unknown to the registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Server-assigned document identifier, globally unique among files
    pub id: String,

    /// File name including its extension, e.g. "Report.PDF"
    pub name: String,

    /// Identifier of the owning folder
    pub folder_id: String,
}

impl File {
    pub fn new(name: &str, id: &str, folder_id: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            folder_id: folder_id.trim().to_string(),
        }
    }

    /// File name without its extension ("Report.PDF" -> "Report")
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 => &self.name[..idx],
            _ => &self.name,
        }
    }

    /// Uppercased extension without the dot ("Report.pdf" -> "PDF")
    ///
    /// Empty when the name has no extension.
    pub fn native_ext(&self) -> String {
        match self.name.rfind('.') {
            Some(idx) if idx > 0 => self.name[idx + 1..].to_uppercase(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
