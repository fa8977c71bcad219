//! Folder records discovered during the crawl
use std::fmt;

/// A folder discovered on the portal
///
/// Created the instant it is discovered, from a listing row or a root-level
/// link. `parent_id` is empty for roots and for folders whose parent is not
/// known at discovery time; it is never dereferenced until the post-crawl
/// reconstruction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    /// Server-assigned identifier, globally unique among folders
    pub id: String,

    /// Display label shown in listings
    pub name: String,

    /// Identifier of the parent folder; empty when unknown or root
    pub parent_id: String,
}

impl Folder {
    /// Creates a folder with no known parent
    ///
    /// Names and identifiers arrive padded with whitespace in listing cells,
    /// so both are trimmed here.
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            parent_id: String::new(),
        }
    }

    /// Creates a folder with a known parent identifier
    pub fn with_parent(name: &str, id: &str, parent_id: &str) -> Self {
        Self {
            parent_id: parent_id.trim().to_string(),
            ..Self::new(name, id)
        }
    }

    /// Returns true if no parent identifier was ever collected for this folder
    pub fn is_parentless(&self) -> bool {
        self.parent_id.is_empty()
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parent_id.is_empty() {
            write!(f, "[ROOT]/{} ({})", self.name, self.id)
        } else {
            write!(f, "{}/{} ({})", self.parent_id, self.name, self.id)
        }
    }
}
