//! Output: persistence, statistics and reporting
//!
//! Persistence runs during the crawl (each downloaded file is written as its
//! bytes arrive); the reporting functions consume the reconstructed tree
//! after the crawl drains.

pub mod saver;
pub mod stats;

pub use saver::{sanitize_component, sanitize_rel_path, save_file};
pub use stats::{CrawlStats, StatsSnapshot};

use crate::model::File;
use crate::tree::FolderTree;
use std::collections::HashMap;
use std::io::{self, Write};

/// Renders the reconstructed hierarchy as an indented tree
///
/// Orphaned folders (no resolved parent) are rendered as additional top-level
/// entries alongside the root.
pub fn write_tree(tree: &FolderTree, files: &[File], out: &mut dyn Write) -> io::Result<()> {
    let mut files_by_folder: HashMap<&str, Vec<&File>> = HashMap::new();
    for file in files {
        files_by_folder.entry(file.folder_id.as_str()).or_default().push(file);
    }
    for listed in files_by_folder.values_mut() {
        listed.sort_by(|a, b| a.name.cmp(&b.name));
    }

    for top in tree.top_level() {
        write_subtree(tree, &files_by_folder, &top.id, 0, out)?;
    }
    Ok(())
}

fn write_subtree(
    tree: &FolderTree,
    files_by_folder: &HashMap<&str, Vec<&File>>,
    folder_id: &str,
    depth: usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    let name = tree
        .folder(folder_id)
        .map(|folder| folder.name.as_str())
        .unwrap_or("");
    writeln!(out, "{indent}{name}/")?;

    for child in tree.children(folder_id) {
        write_subtree(tree, files_by_folder, &child.id, depth + 1, out)?;
    }
    if let Some(listed) = files_by_folder.get(folder_id) {
        for file in listed {
            writeln!(out, "{indent}  {}", file.name)?;
        }
    }
    Ok(())
}

/// Writes each file's full derived path, one per line, sorted
pub fn write_file_list(tree: &FolderTree, files: &[File], out: &mut dyn Write) -> io::Result<()> {
    let mut paths: Vec<String> = files
        .iter()
        .map(|file| tree.file_path(file).display().to_string())
        .collect();
    paths.sort();
    for path in paths {
        writeln!(out, "{path}")?;
    }
    Ok(())
}

/// Writes a one-line-per-counter crawl summary
pub fn write_summary(snapshot: &StatsSnapshot, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Folders discovered: {}", snapshot.folders_discovered)?;
    writeln!(out, "Files discovered:   {}", snapshot.files_discovered)?;
    writeln!(out, "Files saved:        {}", snapshot.files_saved)?;
    writeln!(out, "Responses skipped:  {}", snapshot.responses_skipped)?;
    writeln!(out, "Fetch failures:     {}", snapshot.fetch_failures)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Folder;

    fn sample_tree() -> (FolderTree, Vec<File>) {
        let folders = vec![
            Folder::new("Root", "1"),
            Folder::with_parent("A", "2", "1"),
        ];
        let files = vec![
            File::new("b.pdf", "11", "2"),
            File::new("a.pdf", "10", "2"),
        ];
        (FolderTree::build(folders, Some("1".to_string())), files)
    }

    #[test]
    fn test_write_tree() {
        let (tree, files) = sample_tree();
        let mut buf = Vec::new();
        write_tree(&tree, &files, &mut buf).unwrap();
        let rendered = String::from_utf8(buf).unwrap();

        assert_eq!(rendered, "Root/\n  A/\n    a.pdf\n    b.pdf\n");
    }

    #[test]
    fn test_write_file_list_sorted() {
        let (tree, files) = sample_tree();
        let mut buf = Vec::new();
        write_file_list(&tree, &files, &mut buf).unwrap();
        let rendered = String::from_utf8(buf).unwrap();

        let a_path: std::path::PathBuf = ["Root", "A", "a.pdf"].iter().collect();
        let b_path: std::path::PathBuf = ["Root", "A", "b.pdf"].iter().collect();
        assert_eq!(
            rendered,
            format!("{}\n{}\n", a_path.display(), b_path.display())
        );
    }

    #[test]
    fn test_write_tree_includes_orphans() {
        let folders = vec![
            Folder::new("Root", "1"),
            Folder::with_parent("Lost", "8", "999"),
        ];
        let tree = FolderTree::build(folders, Some("1".to_string()));
        let mut buf = Vec::new();
        write_tree(&tree, &[], &mut buf).unwrap();
        let rendered = String::from_utf8(buf).unwrap();

        assert!(rendered.contains("Root/"));
        assert!(rendered.contains("Lost/"));
    }
}
