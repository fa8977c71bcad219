//! Post-crawl tree reconstruction
//!
//! During the crawl, folders accumulate in the registry in whatever order
//! concurrent fetches complete, carrying only parent *identifiers*. This pass
//! runs once after traversal drains, single-threaded, and resolves those
//! identifiers into an actual parent-linked hierarchy.
//!
//! A folder whose parent id matches nothing in the registry stays parentless;
//! it behaves as a root for path purposes and its subtree (including files)
//! is kept in the output rather than dropped.

use crate::model::{File, Folder};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// The reconstructed folder hierarchy
#[derive(Debug)]
pub struct FolderTree {
    folders: HashMap<String, Folder>,
    children: HashMap<String, Vec<String>>,
    root_id: Option<String>,
}

impl FolderTree {
    /// Builds the tree from a snapshot of all discovered folders
    ///
    /// For every folder whose id is not the root id, a parent edge is wired
    /// when a folder with id equal to its `parent_id` exists; otherwise the
    /// folder is left parentless. Child lists are sorted by name for
    /// deterministic output.
    pub fn build(folders: Vec<Folder>, root_id: Option<String>) -> Self {
        let mut by_id: HashMap<String, Folder> = HashMap::new();
        for folder in folders {
            by_id.insert(folder.id.clone(), folder);
        }

        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for folder in by_id.values() {
            if root_id.as_deref() == Some(folder.id.as_str()) {
                continue;
            }
            if folder.parent_id == folder.id {
                continue;
            }
            if by_id.contains_key(&folder.parent_id) {
                children
                    .entry(folder.parent_id.clone())
                    .or_default()
                    .push(folder.id.clone());
            }
        }

        for ids in children.values_mut() {
            ids.sort_by(|a, b| {
                let name_a = by_id.get(a).map(|f| f.name.as_str()).unwrap_or("");
                let name_b = by_id.get(b).map(|f| f.name.as_str()).unwrap_or("");
                name_a.cmp(name_b).then_with(|| a.cmp(b))
            });
        }

        Self {
            folders: by_id,
            children,
            root_id,
        }
    }

    /// Returns the root folder record
    ///
    /// The registered root when its id was known up front, otherwise a
    /// synthetic empty root.
    pub fn root(&self) -> Folder {
        self.root_id
            .as_deref()
            .and_then(|id| self.folders.get(id).cloned())
            .unwrap_or_else(|| Folder::new("", ""))
    }

    /// Looks up a folder by id
    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.get(id)
    }

    /// Resolves a folder's parent, if one was wired during reconstruction
    pub fn parent(&self, id: &str) -> Option<&Folder> {
        if self.root_id.as_deref() == Some(id) {
            return None;
        }
        let folder = self.folders.get(id)?;
        if folder.parent_id == folder.id {
            return None;
        }
        self.folders.get(&folder.parent_id)
    }

    /// Child folders of a folder, sorted by name
    pub fn children(&self, id: &str) -> Vec<&Folder> {
        self.children
            .get(id)
            .map(|ids| ids.iter().filter_map(|cid| self.folders.get(cid)).collect())
            .unwrap_or_default()
    }

    /// Folders with no resolved parent (the root and any orphans)
    pub fn top_level(&self) -> Vec<&Folder> {
        let mut tops: Vec<&Folder> = self
            .folders
            .values()
            .filter(|folder| self.parent(&folder.id).is_none())
            .collect();
        tops.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        tops
    }

    /// Derives a folder's full path, walking parent links root-to-leaf
    ///
    /// Empty name segments are skipped; a record with no parent yields just
    /// its own name. A cycle in the collected parent ids terminates the walk
    /// instead of looping.
    pub fn full_path(&self, id: &str) -> PathBuf {
        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        let mut current = id;

        while seen.insert(current.to_string()) {
            let Some(folder) = self.folders.get(current) else {
                break;
            };
            if !folder.name.is_empty() {
                segments.push(folder.name.as_str());
            }
            match self.parent(current) {
                Some(parent) => current = &parent.id,
                None => break,
            }
        }

        segments.iter().rev().collect()
    }

    /// Derives a file's full path: its owning folder's path joined with its name
    pub fn file_path(&self, file: &File) -> PathBuf {
        self.full_path(&file.folder_id).join(&file.name)
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }
}
