//! Data model for discovered portal entries
//!
//! Folders and files are plain owned records. Parent linkage is carried as
//! identifier values only; records never hold references to each other, so
//! the concurrently populated registries need no locking beyond their own
//! insert operations. Identifiers are resolved into an actual tree once, by
//! the post-crawl reconstruction pass in [`crate::tree`].

mod file;
mod folder;

pub use file::File;
pub use folder::Folder;

/// Display name given to placeholder folders synthesized for files whose
/// owning folder id was never seen in any listing.
pub const UNKNOWN_FOLDER_NAME: &str = "[unknown]";
