//! Filesystem persistence for downloaded files
//!
//! Folder and file names come from the server, so every path component is
//! sanitized before it touches the filesystem: separators are replaced and
//! dot-only or absolute components are neutralized, keeping writes confined
//! to the destination root no matter what a listing claims a folder is
//! called.

use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Makes one path component safe to create on disk
///
/// Separators and NUL are replaced with `_`; empty and dot-only names become
/// `_` so they cannot collapse or climb the path.
pub fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c == '\0' { '_' } else { c })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Rebuilds a relative path from sanitized components
///
/// Root and prefix components are dropped entirely (a name starting with `/`
/// must not be able to replace the destination on join) and `..` components
/// are neutralized.
pub fn sanitize_rel_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                out.push(sanitize_component(&part.to_string_lossy()));
            }
            Component::ParentDir => out.push("_"),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}

/// Writes downloaded bytes under the destination root
///
/// Creates parent directories as needed and returns the final path written.
/// Errors are returned to the caller, which logs and continues; a single
/// failed write never aborts the crawl.
pub async fn save_file(
    destination: &Path,
    relative: &Path,
    bytes: &[u8],
) -> std::io::Result<PathBuf> {
    let target = destination.join(sanitize_rel_path(relative));
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&target, bytes).await?;
    Ok(target)
}
