//! Tree node and resource types

use std::collections::HashMap;
use url::Url;

/// One entry of the navigation tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// The node's own menu label (may be empty)
    pub label: String,

    /// Canonical page URL; identity of the node
    pub url: Url,

    /// Labels from the tree root item down to this node, both inclusive
    pub ancestor_path: Vec<String>,
}

impl TreeNode {
    /// `" - "`-joined ancestor path, or the label for an empty path
    pub fn display_path(&self) -> String {
        if self.ancestor_path.is_empty() {
            self.label.clone()
        } else {
            self.ancestor_path.join(" - ")
        }
    }
}

/// A downloadable item linked from a node's page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafResource {
    /// Canonical resource URL
    pub url: Url,

    /// Visible anchor text, used as a fallback name
    pub suggested_name: String,
}

/// Nodes keyed by URL, first discovery wins
///
/// Later inserts of an already known URL are dropped, not merged. Iteration
/// follows first-discovery order.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: Vec<TreeNode>,
    index: HashMap<Url, usize>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` unless its URL is already known; returns whether it was added
    pub fn insert(&mut self, node: TreeNode) -> bool {
        if self.index.contains_key(&node.url) {
            return false;
        }
        self.index.insert(node.url.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.index.contains_key(url)
    }

    pub fn get(&self, url: &Url) -> Option<&TreeNode> {
        self.index.get(url).map(|&i| &self.nodes[i])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TreeNode> {
        self.nodes.iter()
    }

    pub fn into_vec(self) -> Vec<TreeNode> {
        self.nodes
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a TreeNode;
    type IntoIter = std::slice::Iter<'a, TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
