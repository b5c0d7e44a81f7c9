//! Embedded outline (bookmark) nodes.

use serde::{Deserialize, Serialize};

use super::TocEntry;

/// A node of a PDF's native outline tree.
///
/// A destination names a page; a group only nests its children one level
/// deeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlineNode {
    /// A titled bookmark pointing at a page
    Destination {
        /// Bookmark title
        title: String,
        /// Target page (0-indexed), if it resolved
        #[serde(default)]
        page_ref: Option<u32>,
        /// Nested bookmarks
        #[serde(default)]
        children: Vec<OutlineNode>,
    },
    /// An untitled list of nested bookmarks
    Group {
        /// Nested bookmarks
        children: Vec<OutlineNode>,
    },
}

impl OutlineNode {
    /// Create a destination without children.
    pub fn destination(title: impl Into<String>, page_ref: Option<u32>) -> Self {
        OutlineNode::Destination {
            title: title.into(),
            page_ref,
            children: Vec::new(),
        }
    }

    /// Create a group.
    pub fn group(children: Vec<OutlineNode>) -> Self {
        OutlineNode::Group { children }
    }
}

/// Flatten an outline tree into TOC entries in document order.
///
/// Page references are converted to 1-indexed page numbers; unresolved
/// references stay `None`.
pub fn outline_to_entries(nodes: &[OutlineNode]) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    collect_entries(nodes, 0, &mut entries);
    entries
}

fn collect_entries(nodes: &[OutlineNode], level: usize, entries: &mut Vec<TocEntry>) {
    for node in nodes {
        match node {
            OutlineNode::Destination {
                title,
                page_ref,
                children,
            } => {
                entries.push(TocEntry::bookmark(
                    title.trim(),
                    page_ref.map(|p| p + 1),
                    level,
                ));
                collect_entries(children, level + 1, entries);
            }
            OutlineNode::Group { children } => collect_entries(children, level + 1, entries),
        }
    }
}
