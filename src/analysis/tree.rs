//! Parent/child structure over leveled TOC entries.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Parent
//! links are recorded at construction time from a stack of open ancestors.

use crate::model::{LeveledHeading, TocEntry};

use super::options::DEFAULT_MAX_LEVEL;

/// Index of a node in a [`TocTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A TOC entry with its place in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TocNode {
    /// The entry
    pub entry: TocEntry,
    /// Nearest enclosing entry with a lower level
    pub parent: Option<NodeId>,
    /// Direct children in document order
    pub children: Vec<NodeId>,
}

/// A table of contents as a forest of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TocTree {
    nodes: Vec<TocNode>,
    roots: Vec<NodeId>,
}

impl TocTree {
    /// Top-level entries.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&TocNode> {
        self.nodes.get(id.0)
    }

    /// Children of a node (empty for unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Number of ancestors of a node.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).and_then(|n| n.parent);
        }
        depth
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal back to a flat list.
    ///
    /// Since parents always precede their children in the input, the
    /// result has the input order and levels.
    pub fn flatten(&self) -> Vec<TocEntry> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            self.flatten_into(*root, &mut out);
        }
        out
    }

    fn flatten_into(&self, id: NodeId, out: &mut Vec<TocEntry>) {
        if let Some(node) = self.node(id) {
            out.push(node.entry.clone());
            for child in &node.children {
                self.flatten_into(*child, out);
            }
        }
    }
}

/// Builds a [`TocTree`] from entries in document order.
#[derive(Debug, Clone)]
pub struct TocTreeBuilder {
    max_level: usize,
}

impl TocTreeBuilder {
    /// Create a builder; levels are clamped to `0..max_level`.
    pub fn new(max_level: usize) -> Self {
        Self {
            max_level: max_level.max(1),
        }
    }

    /// Build a tree from leveled headings already sorted by page and position.
    pub fn build(&self, headings: &[LeveledHeading]) -> TocTree {
        let entries = headings.iter().map(|leveled| {
            let heading = &leveled.heading;
            TocEntry::detected(
                heading.title.clone(),
                heading.page,
                leveled.level,
                heading.confidence,
                heading.detection_method.to_string(),
            )
        });
        self.build_entries(entries)
    }

    /// Build a tree from entries in document order.
    pub fn build_entries<I: IntoIterator<Item = TocEntry>>(&self, entries: I) -> TocTree {
        let mut tree = TocTree::default();
        let mut open: Vec<NodeId> = Vec::with_capacity(self.max_level);

        for mut entry in entries {
            entry.level = entry.level.min(self.max_level - 1);

            while let Some(top) = open.last() {
                if tree.nodes[top.0].entry.level >= entry.level {
                    open.pop();
                } else {
                    break;
                }
            }

            let id = NodeId(tree.nodes.len());
            let parent = open.last().copied();
            match parent {
                Some(parent) => tree.nodes[parent.0].children.push(id),
                None => tree.roots.push(id),
            }
            tree.nodes.push(TocNode {
                entry,
                parent,
                children: Vec::new(),
            });
            open.push(id);
        }

        tree
    }
}

impl Default for TocTreeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL)
    }
}
