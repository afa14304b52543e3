use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Counters and timing of one run
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,

    started: Instant,

    /// Pages rendered successfully (discovery and resource pages)
    pub pages_rendered: u64,

    /// Pages whose navigation failed
    pub render_failures: u64,

    /// Pages whose menu did not appear in time
    pub menu_timeouts: u64,

    /// Nodes in the final node set
    pub nodes_collected: u64,

    /// Distinct nodes dropped by label exclusion
    pub nodes_excluded: u64,

    /// Leaf resources found across all nodes
    pub resources_found: u64,

    /// Regular files written
    pub files_saved: u64,

    /// Archives expanded and removed
    pub archives_unpacked: u64,

    /// Archives kept because they could not be expanded
    pub archives_kept: u64,

    /// Downloads answered with a non-success status
    pub downloads_skipped: u64,

    /// Downloads that failed in transport or while writing
    pub downloads_failed: u64,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
            pages_rendered: 0,
            render_failures: 0,
            menu_timeouts: 0,
            nodes_collected: 0,
            nodes_excluded: 0,
            resources_found: 0,
            files_saved: 0,
            archives_unpacked: 0,
            archives_kept: 0,
            downloads_skipped: 0,
            downloads_failed: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Number of resources that produced something on disk
    pub fn downloads_succeeded(&self) -> u64 {
        self.files_saved + self.archives_unpacked + self.archives_kept
    }

    /// Logs a one-line summary of the run
    pub fn log_summary(&self) {
        tracing::info!(
            "Run finished in {:.1}s: {} nodes, {} resources, {} saved, {} unpacked, {} skipped, {} failed",
            self.elapsed().as_secs_f64(),
            self.nodes_collected,
            self.resources_found,
            self.files_saved,
            self.archives_unpacked,
            self.downloads_skipped,
            self.downloads_failed
        );
        if self.archives_kept > 0 {
            tracing::warn!(
                "{} archives could not be unpacked and were kept as is",
                self.archives_kept
            );
        }
    }
}
