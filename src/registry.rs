//! Identity registries for folders and files
//!
//! The registry is the single synchronization point of the whole crawl. Both
//! maps support an atomic insert-if-absent; the caller that inserts a record
//! first is the exclusive owner of the decision to keep exploring it, so no
//! separate visited-set or lock is needed and the check/act race of a
//! look-up-then-insert two-step never arises.
//!
//! Records are owned by the registry alone. Parent linkage between records is
//! stored as identifier values, resolved on demand ([`Registry::folder_path`])
//! or once by the post-crawl reconstruction pass.

use crate::model::{File, Folder};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashSet;
use std::path::PathBuf;

/// Concurrency-safe registries keyed by server-assigned identifier
#[derive(Debug, Default)]
pub struct Registry {
    folders: DashMap<String, Folder>,
    files: DashMap<String, File>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a folder unless its id is already present
    ///
    /// Returns the registered record (the existing one when the id was
    /// already present) and whether it was already present. Safe under
    /// unbounded concurrent callers; exactly one caller per id ever sees
    /// `false`.
    pub fn insert_folder_if_absent(&self, folder: Folder) -> (Folder, bool) {
        match self.folders.entry(folder.id.clone()) {
            Entry::Occupied(entry) => (entry.get().clone(), true),
            Entry::Vacant(entry) => {
                entry.insert(folder.clone());
                (folder, false)
            }
        }
    }

    /// Registers a file unless its id is already present
    ///
    /// Same contract as [`Self::insert_folder_if_absent`]; the caller that
    /// sees `false` owns issuing the download for this file.
    pub fn insert_file_if_absent(&self, file: File) -> (File, bool) {
        match self.files.entry(file.id.clone()) {
            Entry::Occupied(entry) => (entry.get().clone(), true),
            Entry::Vacant(entry) => {
                entry.insert(file.clone());
                (file, false)
            }
        }
    }

    /// Looks up a folder by id
    pub fn folder(&self, id: &str) -> Option<Folder> {
        self.folders.get(id).map(|entry| entry.value().clone())
    }

    /// Looks up a file by id
    pub fn file(&self, id: &str) -> Option<File> {
        self.files.get(id).map(|entry| entry.value().clone())
    }

    /// Derives a folder's hierarchical path by walking parent identifiers
    ///
    /// Joins names root-to-leaf, skipping empty name segments (the synthetic
    /// root has no name). The walk stops at a folder whose parent id is empty
    /// or unknown, and bails out if the parent chain loops back on itself.
    /// Usable concurrently while the crawl is still running; each lookup
    /// clones out of the map so no shard guard is held across steps.
    pub fn folder_path(&self, id: &str) -> PathBuf {
        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        let mut current = id.to_string();

        while seen.insert(current.clone()) {
            let Some(folder) = self.folder(&current) else {
                break;
            };
            if !folder.name.is_empty() {
                segments.push(folder.name);
            }
            if folder.parent_id.is_empty() {
                break;
            }
            current = folder.parent_id;
        }

        segments.iter().rev().collect()
    }

    /// Snapshot of all registered folders
    pub fn folders(&self) -> Vec<Folder> {
        self.folders
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Snapshot of all registered files
    pub fn files(&self) -> Vec<File> {
        self.files
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
