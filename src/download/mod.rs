//! Resource downloading
//!
//! This module fetches leaf resources within the session, names them, writes
//! them into their node directory and expands zip payloads in place. A
//! failing resource never stops the run; it is logged and counted.

mod archive;

pub use archive::{is_archive_name, unpack_zip};

use crate::crawler::{LeafResource, FALLBACK_RESOURCE_NAME};
use crate::mirror::{sanitize, MirrorWriter};
use crate::naming::resolve_filename;
use crate::state::RunContext;
use crate::transport::{FetchResponse, Fetcher};
use crate::MirrorError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// What a single download produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A regular file was written
    Saved { path: PathBuf },

    /// An archive was expanded and then removed
    Unpacked { archive: PathBuf, files: Vec<PathBuf> },

    /// A `.zip` payload that could not be expanded was kept as is
    ArchiveKept { path: PathBuf },

    /// The server answered with a non-success status; nothing was written
    Skipped { status: u16 },

    /// Transport or file system failure; nothing usable was written
    Failed { reason: String },
}

/// Downloads resources into the mirror
pub struct Downloader<F: Fetcher> {
    fetcher: F,
    writer: MirrorWriter,
    delay: Duration,
}

impl<F: Fetcher> Downloader<F> {
    /// Creates a downloader
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Session-bound GET capability
    /// * `writer` - Placement of files under the mirror root
    /// * `delay` - Pause after every request, whatever its outcome
    pub fn new(fetcher: F, writer: MirrorWriter, delay: Duration) -> Self {
        Self {
            fetcher,
            writer,
            delay,
        }
    }

    pub fn writer(&self) -> &MirrorWriter {
        &self.writer
    }

    /// Downloads one leaf resource into `target_dir`
    pub async fn download_resource(
        &mut self,
        resource: &LeafResource,
        target_dir: &Path,
        ctx: &mut RunContext,
    ) -> DownloadOutcome {
        self.download(&resource.url, &resource.suggested_name, target_dir, ctx)
            .await
    }

    /// Downloads `url` into `target_dir`
    ///
    /// The file name comes from the response headers and `suggested_name`
    /// (see [`resolve_filename`]) and is sanitized before use. A payload
    /// whose final name ends in `.zip` is expanded into `target_dir` and the
    /// archive removed; if expansion fails the archive stays and a warning
    /// is logged.
    ///
    /// # Arguments
    ///
    /// * `url` - Resource URL
    /// * `suggested_name` - Link text, used when the headers carry no better name
    /// * `target_dir` - Existing node directory
    /// * `ctx` - Run counters
    pub async fn download(
        &mut self,
        url: &Url,
        suggested_name: &str,
        target_dir: &Path,
        ctx: &mut RunContext,
    ) -> DownloadOutcome {
        tracing::debug!("GET {}", url);
        let fetched = self.fetcher.get(url).await;
        tokio::time::sleep(self.delay).await;

        let response = match fetched {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Download failed for {}: {}", url, e);
                ctx.downloads_failed += 1;
                return DownloadOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        if !response.is_success() {
            tracing::warn!("HTTP {} for {}, skipping", response.status, url);
            ctx.downloads_skipped += 1;
            return DownloadOutcome::Skipped {
                status: response.status,
            };
        }

        match self.store(&response, suggested_name, target_dir, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Failed to store {}: {}", url, e);
                ctx.downloads_failed += 1;
                DownloadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn store(
        &mut self,
        response: &FetchResponse,
        suggested_name: &str,
        target_dir: &Path,
        ctx: &mut RunContext,
    ) -> Result<DownloadOutcome, MirrorError> {
        let resolved = resolve_filename(&response.headers, suggested_name);
        let mut file_name = sanitize(&resolved.file_name());
        if file_name.is_empty() {
            file_name = FALLBACK_RESOURCE_NAME.to_string();
        }

        let path = self
            .writer
            .write_file(target_dir, &file_name, &response.body)
            .await?;

        if !is_archive_name(&file_name) {
            tracing::info!("Saved {}", file_name);
            ctx.files_saved += 1;
            return Ok(DownloadOutcome::Saved { path });
        }

        match unpack_zip(&response.body, target_dir, &mut self.writer) {
            Ok(files) => {
                tokio::fs::remove_file(&path).await?;
                tracing::info!("Unpacked {} ({} files)", file_name, files.len());
                ctx.archives_unpacked += 1;
                Ok(DownloadOutcome::Unpacked {
                    archive: path,
                    files,
                })
            }
            Err(e) => {
                tracing::warn!("{} has a .zip name but cannot be unpacked: {}", file_name, e);
                ctx.archives_kept += 1;
                Ok(DownloadOutcome::ArchiveKept { path })
            }
        }
    }
}
