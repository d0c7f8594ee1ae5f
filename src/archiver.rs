//! Archiving run orchestration
//!
//! [`Archiver`] wires the batched fetcher and the shape validator into the
//! three-phase flow: enumerate the author's works, look up each work's
//! metadata and keep only single texts in the configured language, then
//! download every accepted body and write it to the output directory.

use crate::config::Config;
use crate::error::{Result, ShapeMismatch};
use crate::fetch::BatchFetcher;
use crate::progress::{NoOpProgress, Phase, ProgressSink};
use crate::shape::{self, WorkDetail};
use crate::utils;
use futures::future;
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of one archiving run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether the run was skipped because the output directory already exists
    pub skipped: bool,
    /// Number of works the author listing reported
    pub listed: usize,
    /// Number of works that passed the detail contract (single texts in the
    /// configured language)
    pub accepted: usize,
    /// Number of files written to the output directory
    pub written: usize,
}

impl RunSummary {
    fn skipped() -> Self {
        Self {
            skipped: true,
            listed: 0,
            accepted: 0,
            written: 0,
        }
    }
}

/// Batch content archiver for a single author
///
/// Holds two fetchers with the same concurrency limit but distinct timeouts:
/// metadata lookups carry small payloads and get the short ceiling, body
/// downloads get the long one.
pub struct Archiver {
    config: Config,
    metadata: BatchFetcher,
    downloads: BatchFetcher,
    progress: Arc<dyn ProgressSink>,
}

impl std::fmt::Debug for Archiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archiver")
            .field("config", &self.config)
            .field("metadata", &self.metadata)
            .field("downloads", &self.downloads)
            .finish_non_exhaustive()
    }
}

impl Archiver {
    /// Create an archiver that reports no progress
    pub fn new(config: Config) -> Result<Self> {
        Self::with_progress(config, Arc::new(NoOpProgress))
    }

    /// Create an archiver with a custom progress sink
    ///
    /// Validates the configuration before any request is made.
    pub fn with_progress(config: Config, progress: Arc<dyn ProgressSink>) -> Result<Self> {
        config.validate()?;
        let metadata = BatchFetcher::new(config.concurrency, config.metadata_timeout)?;
        let downloads = BatchFetcher::new(config.concurrency, config.download_timeout)?;
        Ok(Self {
            config,
            metadata,
            downloads,
            progress,
        })
    }

    /// Perform one archiving run
    ///
    /// If the output directory already exists the run is treated as already
    /// done: no requests are issued and no files are written. This is the
    /// only form of resumability — coarse and all-or-nothing.
    ///
    /// Any request failure, filesystem failure, or shape mismatch on the
    /// top-level works list aborts the run. Individual works that fail the
    /// detail contract are excluded, not fatal.
    pub async fn run(&self) -> Result<RunSummary> {
        if tokio::fs::try_exists(&self.config.output_dir).await? {
            tracing::info!(
                dir = %self.config.output_dir.display(),
                "output directory already exists, nothing to do"
            );
            return Ok(RunSummary::skipped());
        }
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let slugs = self.list_works().await?;
        let body_urls = self.filter_single_texts(&slugs).await?;
        let written = self.download_bodies(&body_urls).await?;

        let summary = RunSummary {
            skipped: false,
            listed: slugs.len(),
            accepted: body_urls.len(),
            written,
        };
        tracing::info!(
            listed = summary.listed,
            accepted = summary.accepted,
            written = summary.written,
            "archive run complete"
        );
        Ok(summary)
    }

    /// Phase 1: fetch the author's works list and validate its shape
    ///
    /// A malformed listing is fatal — nothing downstream can be trusted.
    async fn list_works(&self) -> Result<Vec<String>> {
        let url = self.config.works_list_url();
        tracing::info!(author = %self.config.author, url = %url, "listing author works");

        let listing = self.metadata.get(&url).await?;
        let value: serde_json::Value = serde_json::from_str(&listing.body)?;
        let works = shape::works_list(&value)?;

        tracing::info!(works = works.len(), "author listing validated");
        Ok(works.into_iter().map(|work| work.slug).collect())
    }

    /// Phase 2: look up every work's detail and keep the body URLs of single
    /// texts in the configured language
    ///
    /// Collections (any child entries) and language mismatches are dropped
    /// from the accumulator; each exclusion is logged, never propagated.
    async fn filter_single_texts(&self, slugs: &[String]) -> Result<Vec<String>> {
        let progress = Arc::clone(&self.progress);
        let body_urls = self
            .metadata
            .batch(slugs)
            .format_url(|slug| self.config.work_detail_url(slug))
            .on_progress(|completed| progress.batch_completed(Phase::Metadata, completed))
            .fold(|mut urls: Vec<String>, response| {
                match parse_detail(&response.body, &self.config.language) {
                    Ok(detail) => urls.push(detail.body_url),
                    Err(reason) => {
                        tracing::debug!(url = %response.url, %reason, "excluding work");
                    }
                }
                urls
            })
            .await?;

        tracing::info!(
            listed = slugs.len(),
            accepted = body_urls.len(),
            "filtered single texts"
        );
        Ok(body_urls)
    }

    /// Phase 3: download every accepted body and write it to disk
    ///
    /// The fold only defers writes by collecting (path, body) pairs; the
    /// actual writes are flushed afterwards in one concurrent join, so disk
    /// concurrency is not bounded by the fetcher's batching.
    async fn download_bodies(&self, body_urls: &[String]) -> Result<usize> {
        let progress = Arc::clone(&self.progress);
        let pending_writes = self
            .downloads
            .batch(body_urls)
            .on_progress(|completed| progress.batch_completed(Phase::Download, completed))
            .fold(|mut files: Vec<(PathBuf, String)>, response| {
                match utils::file_name_from_url(&response.url) {
                    Some(name) => {
                        files.push((self.config.output_dir.join(name), response.body));
                    }
                    None => {
                        tracing::warn!(url = %response.url, "no usable file name in URL, skipping");
                    }
                }
                files
            })
            .await?;

        let written = pending_writes.len();
        future::try_join_all(
            pending_writes
                .into_iter()
                .map(|(path, body)| tokio::fs::write(path, body)),
        )
        .await?;

        Ok(written)
    }
}

/// Parse and validate one detail response body
///
/// An unparsable body is a shape failure of that one work, recoverable by
/// omission like any other mismatch.
fn parse_detail(body: &str, language: &str) -> std::result::Result<WorkDetail, ShapeMismatch> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ShapeMismatch::Unparsable(e.to_string()))?;
    shape::work_detail(&value, language)
}
