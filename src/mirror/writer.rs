//! File placement under the mirror root

use crate::crawler::TreeNode;
use crate::mirror::sanitize::{sanitize, SUBSTITUTE};
use crate::naming::split_extension;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Owns placement of files under the mirror root
///
/// Every node maps to one directory directly under the root. Within one run
/// two payloads resolving to the same file name in the same directory are
/// kept apart as `name (2).ext`, `name (3).ext`, ...; across runs the same
/// resource lands on the same path again and overwrites it.
#[derive(Debug)]
pub struct MirrorWriter {
    root: PathBuf,
    claimed: HashSet<PathBuf>,
}

impl MirrorWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            claimed: HashSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a node: the sanitized, `" - "`-joined ancestor path
    ///
    /// Falls back to the node label when the path is empty, and to `_` when
    /// both are empty.
    pub fn node_dir(&self, node: &TreeNode) -> PathBuf {
        let mut segment = sanitize(&node.display_path());
        if segment.is_empty() {
            segment = SUBSTITUTE.to_string();
        }
        self.root.join(segment)
    }

    /// Creates `path` with all parents; succeeds if it already exists
    pub async fn ensure_dir(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    /// Reserves a path for `file_name` inside `dir` for this run
    pub fn claim_file_path(&mut self, dir: &Path, file_name: &str) -> PathBuf {
        let candidate = dir.join(file_name);
        if self.claimed.insert(candidate.clone()) {
            return candidate;
        }

        let (stem, ext) = split_extension(file_name);
        let mut n = 2;
        loop {
            let candidate = dir.join(format!("{} ({}){}", stem, n, ext));
            if self.claimed.insert(candidate.clone()) {
                tracing::debug!(
                    "'{}' already written in this run, using {}",
                    file_name,
                    candidate.display()
                );
                return candidate;
            }
            n += 1;
        }
    }

    /// Writes `body` as `file_name` inside `dir` and returns the final path
    pub async fn write_file(
        &mut self,
        dir: &Path,
        file_name: &str,
        body: &[u8],
    ) -> std::io::Result<PathBuf> {
        let path = self.claim_file_path(dir, file_name);
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }
}
