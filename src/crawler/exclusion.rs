//! Label-based subtree exclusion

use crate::crawler::node::TreeNode;
use std::collections::HashSet;

/// Label-based exclusion of whole subtrees
///
/// A node is excluded when its own label or any label on its ancestor path
/// matches an excluded label, case-insensitively after trimming. Excluded
/// nodes are never collected, so their descendants are never visited.
#[derive(Debug, Clone, Default)]
pub struct ExclusionRules {
    labels: HashSet<String>,
}

impl ExclusionRules {
    /// Creates rules from already normalized (trimmed, lowercased) labels
    pub fn new(labels: HashSet<String>) -> Self {
        Self { labels }
    }

    /// Creates rules from raw labels
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels = labels
            .into_iter()
            .map(|l| normalize_label(l.as_ref()))
            .filter(|l| !l.is_empty())
            .collect();
        Self { labels }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn is_excluded(&self, node: &TreeNode) -> bool {
        if self.labels.is_empty() {
            return false;
        }

        std::iter::once(&node.label)
            .chain(node.ancestor_path.iter())
            .any(|label| self.labels.contains(&normalize_label(label)))
    }

    /// Splits `nodes` into kept nodes and the excluded ones
    pub fn partition(&self, nodes: Vec<TreeNode>) -> (Vec<TreeNode>, Vec<TreeNode>) {
        nodes.into_iter().partition(|n| !self.is_excluded(n))
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}
