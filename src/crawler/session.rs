//! Crawl session: traversal driver and session state
//!
//! One `CrawlSession` exists per crawl. It owns the registries, the shared
//! HTTP client and the crawl counters; everything is scoped to the session
//! and becomes read-only once [`CrawlSession::run`] returns.
//!
//! Traversal is structured recursion: visiting a folder spawns its child
//! visits and file downloads into a per-folder `JoinSet` and drains it before
//! returning, so `run` completing means no fetch it transitively triggered is
//! still in flight. The at-most-once guarantee comes entirely from the
//! registry's atomic insert-if-absent: the task that registers a folder first
//! is the only one that explores it, and everything that task does afterwards
//! touches ids no other task won.

use crate::config::CrawlConfig;
use crate::crawler::dispatch::{route, Extraction};
use crate::crawler::fetcher::{self, build_http_client, FetchResult};
use crate::model::{File, Folder, UNKNOWN_FOLDER_NAME};
use crate::output::stats::{CrawlStats, StatsSnapshot};
use crate::output::saver::save_file;
use crate::portal;
use crate::registry::Registry;
use crate::tree::FolderTree;
use crate::Result;
use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// State for one crawl
pub struct CrawlSession {
    config: CrawlConfig,
    client: Client,
    registry: Registry,
    root_id: Option<String>,
    fetch_permits: Semaphore,
    stats: CrawlStats,
}

impl CrawlSession {
    /// Creates a session from a validated configuration
    ///
    /// If the starting URL carries a folder identifier, that identifier
    /// becomes the crawl root and the landing page is never fetched.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let client = build_http_client(config.timeout_secs)?;
        let root_id = portal::folder_id_from_url(&config.base_url);
        let fetch_permits = Semaphore::new(config.max_concurrent_fetches);

        Ok(Self {
            config,
            client,
            registry: Registry::new(),
            root_id,
            fetch_permits,
            stats: CrawlStats::new(),
        })
    }

    /// Runs the crawl to completion
    ///
    /// Returns only when every issued fetch, and every fetch transitively
    /// triggered by a response, has completed. Nothing past setup is fatal;
    /// failed branches are logged and dropped.
    pub async fn run(self: &Arc<Self>) -> Result<()> {
        tokio::fs::create_dir_all(&self.config.destination).await?;

        match self.root_id.clone() {
            Some(root_id) => {
                tracing::info!("Starting from root folder {}", root_id);
                self.visit(Folder::new("", &root_id)).await;
            }
            None => {
                tracing::info!("No folder id in starting URL, discovering root folders");
                self.discover_roots().await;
            }
        }

        let snapshot = self.stats.snapshot();
        tracing::info!(
            "Crawl complete: {} folders, {} files discovered, {} saved",
            snapshot.folders_discovered,
            snapshot.files_discovered,
            snapshot.files_saved
        );
        Ok(())
    }

    /// Fetches the landing page and visits every root-level folder link on it
    async fn discover_roots(self: &Arc<Self>) {
        let outcome = self.fetch_text(self.config.base_url.clone()).await;
        let Some(extraction) = self.unwrap_fetch(outcome) else {
            return;
        };

        let mut tasks = JoinSet::new();
        self.apply(extraction, &mut tasks);
        while tasks.join_next().await.is_some() {}
    }

    /// Visits a folder at most once for the lifetime of the session
    ///
    /// The registry insert is the `Unvisited -> Visiting` transition; losers
    /// of the insert race return immediately, no matter how many listings
    /// rediscover the same id concurrently. Boxed because visits recurse
    /// through child listings.
    fn visit(self: &Arc<Self>, folder: Folder) -> BoxFuture<'static, ()> {
        let session = Arc::clone(self);
        async move {
            let (folder, already_present) = session.registry.insert_folder_if_absent(folder);
            if already_present {
                return;
            }
            session.stats.record_folder();
            tracing::debug!("Visiting folder {}", folder);
            session.explore(&folder.id).await;
        }
        .boxed()
    }

    /// Explores a freshly registered folder
    ///
    /// Issues the two fetches owned by the visit winner - the listing GET and
    /// the document-list POST - concurrently, applies both responses, and
    /// drains all follow-up work (child visits, downloads) before returning.
    async fn explore(self: &Arc<Self>, folder_id: &str) {
        let listing_url = portal::listing_url(&self.config.base_url, folder_id);
        let doc_list_url = portal::doc_list_url(&self.config.base_url, folder_id);

        let (listing, documents) = tokio::join!(
            self.fetch_text(listing_url),
            self.post_doc_list(doc_list_url, folder_id),
        );

        let mut tasks = JoinSet::new();
        if let Some(extraction) = self.unwrap_fetch(listing) {
            self.apply(extraction, &mut tasks);
        }
        if let Some(extraction) = self.unwrap_fetch(documents) {
            self.apply(extraction, &mut tasks);
        }
        while tasks.join_next().await.is_some() {}
    }

    /// Applies one extraction, spawning the follow-up work it calls for
    fn apply(self: &Arc<Self>, extraction: Extraction, tasks: &mut JoinSet<()>) {
        match extraction {
            Extraction::Folders(folders) => {
                for folder in folders {
                    tasks.spawn(self.visit(folder));
                }
            }
            Extraction::Documents { folder_id, docs } => {
                for file in self.apply_documents(&folder_id, docs) {
                    let session = Arc::clone(self);
                    tasks.spawn(async move { session.download(file).await });
                }
            }
            Extraction::FileBytes { doc_id, bytes } => {
                let session = Arc::clone(self);
                tasks.spawn(async move { session.persist(&doc_id, &bytes).await });
            }
            Extraction::Skip(reason) => {
                self.stats.record_skip();
                tracing::warn!("Skipping response: {}", reason);
            }
        }
    }

    /// Registers listed documents and returns those needing a download
    ///
    /// A document list citing a folder id the registry has never seen gets a
    /// placeholder folder synthesized for that id, so every file has a valid
    /// owner. Each file is registered at most once; only the registration
    /// winner downloads it.
    fn apply_documents(&self, folder_id: &str, docs: Vec<File>) -> Vec<File> {
        if self.registry.folder(folder_id).is_none() {
            let placeholder = Folder::new(UNKNOWN_FOLDER_NAME, folder_id);
            let (_, already_present) = self.registry.insert_folder_if_absent(placeholder);
            if !already_present {
                self.stats.record_folder();
                tracing::debug!("Synthesized placeholder folder for id {}", folder_id);
            }
        }

        let mut to_download = Vec::new();
        for file in docs {
            let (file, already_present) = self.registry.insert_file_if_absent(file);
            if !already_present {
                self.stats.record_file();
                to_download.push(file);
            }
        }
        to_download
    }

    /// Fetches one file's bytes and routes the response like any other
    async fn download(self: &Arc<Self>, file: File) {
        let url = portal::download_url(&self.config.base_url, &file);
        let outcome = self.fetch_bytes(url).await;
        let Some(extraction) = self.unwrap_fetch(outcome) else {
            return;
        };

        // Downloads trigger no further fetches; the set drains immediately.
        let mut tasks = JoinSet::new();
        self.apply(extraction, &mut tasks);
        while tasks.join_next().await.is_some() {}
    }

    /// Persists downloaded bytes for a registered document
    ///
    /// Unknown document ids are dropped silently; write failures are logged
    /// and skipped.
    async fn persist(&self, doc_id: &str, bytes: &[u8]) {
        let Some(file) = self.registry.file(doc_id) else {
            tracing::debug!("Discarding content for unknown document id {}", doc_id);
            return;
        };

        let relative = self.registry.folder_path(&file.folder_id).join(&file.name);
        match save_file(&self.config.destination, &relative, bytes).await {
            Ok(path) => {
                self.stats.record_saved();
                tracing::info!("Saved file: {}", path.display());
            }
            Err(e) => {
                tracing::warn!("Could not save {}: {}", relative.display(), e);
            }
        }
    }

    /// Converts a fetch result into an extraction, dropping failures
    fn unwrap_fetch(&self, outcome: FetchResult) -> Option<Extraction> {
        match outcome {
            FetchResult::Success { url, body } => Some(route(&url, body)),
            FetchResult::Failed { url, error } => {
                self.stats.record_fetch_failure();
                tracing::debug!("Fetch failed for {}: {}", url, error);
                None
            }
        }
    }

    async fn fetch_text(&self, url: Url) -> FetchResult {
        match self.fetch_permits.acquire().await {
            Ok(_permit) => fetcher::fetch_text(&self.client, url).await,
            Err(_) => FetchResult::Failed {
                url,
                error: "fetch permits closed".to_string(),
            },
        }
    }

    async fn fetch_bytes(&self, url: Url) -> FetchResult {
        match self.fetch_permits.acquire().await {
            Ok(_permit) => fetcher::fetch_bytes(&self.client, url).await,
            Err(_) => FetchResult::Failed {
                url,
                error: "fetch permits closed".to_string(),
            },
        }
    }

    async fn post_doc_list(&self, url: Url, folder_id: &str) -> FetchResult {
        match self.fetch_permits.acquire().await {
            Ok(_permit) => fetcher::post_doc_list(&self.client, url, folder_id).await,
            Err(_) => FetchResult::Failed {
                url,
                error: "fetch permits closed".to_string(),
            },
        }
    }

    /// The crawl root's folder id, when the starting URL carried one
    pub fn root_id(&self) -> Option<&str> {
        self.root_id.as_deref()
    }

    /// The session's identity registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Snapshot of the crawl counters
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Post-crawl query: the reconstructed folder hierarchy
    ///
    /// Single-threaded reconstruction pass; call after [`Self::run`] returns.
    pub fn tree(&self) -> FolderTree {
        FolderTree::build(self.registry.folders(), self.root_id.clone())
    }

    /// Post-crawl query: flat list of every discovered file
    pub fn files(&self) -> Vec<File> {
        self.registry.files()
    }
}
