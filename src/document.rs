//! Document tree with reversible highlight insertion.
//!
//! The content area is an arena-backed tree of element and text nodes.
//! Highlighting wraps matched ranges of a text node in marker elements;
//! the returned patch restores the original text node exactly.

use std::ops::Range;

use crate::error::FindError;

/// CSS class carried by every highlight marker.
pub const HIGHLIGHT_CLASS: &str = "ssp-find-highlight";

/// Additional class carried by the currently focused marker.
pub const CURRENT_CLASS: &str = "current";

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element { tag: String, class: String },
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// One reversed highlight insertion: the marker sequence that replaced
/// a single text node, and the text it replaced.
#[derive(Debug)]
struct HighlightPatch {
    parent: NodeId,
    inserted: Vec<NodeId>,
    original_text: String,
}

/// Capability to reverse a highlight insertion exactly.
///
/// Produced by [`DocumentTree::wrap_matches`], consumed by
/// [`DocumentTree::undo`]. Patches are independent per original text
/// node; the inserted nodes are located by id, so sibling shifts from
/// other patches cannot invalidate them.
#[derive(Debug, Default)]
pub struct HighlightUndo {
    patches: Vec<HighlightPatch>,
}

impl HighlightUndo {
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn merge(&mut self, other: HighlightUndo) {
        self.patches.extend(other.patches);
    }
}

pub struct DocumentTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DocumentTree {
    /// Create a tree holding a single root element.
    pub fn new(root_tag: &str) -> Self {
        let root = Node {
            kind: NodeKind::Element {
                tag: root_tag.to_string(),
                class: String::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    /// Append a child element, returning its id.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, class: &str) -> NodeId {
        let id = self.push_node(Node {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                class: class.to_string(),
            },
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Append a child text node, returning its id.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push_node(Node {
            kind: NodeKind::Text(text.to_string()),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// The text of a text node, or None for elements.
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Text(s) => Some(s.as_str()),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn element_class(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { class, .. } => Some(class.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, id: NodeId, name: &str) -> bool {
        self.element_class(id)
            .map(|c| c.split_whitespace().any(|part| part == name))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, name: &str) {
        if self.has_class(id, name) {
            return;
        }
        if let NodeKind::Element { class, .. } = &mut self.nodes[id].kind {
            if !class.is_empty() {
                class.push(' ');
            }
            class.push_str(name);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Element { class, .. } = &mut self.nodes[id].kind {
            *class = class
                .split_whitespace()
                .filter(|part| *part != name)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    /// All text nodes reachable from the root, in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_text(self.root, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match &self.nodes[id].kind {
            NodeKind::Text(_) => out.push(id),
            NodeKind::Element { .. } => {
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Concatenated text content of the whole tree, in document order.
    pub fn text_content(&self) -> String {
        self.text_nodes()
            .into_iter()
            .filter_map(|id| self.node_text(id))
            .collect()
    }

    /// All elements reachable from the root that carry `name` in their
    /// class list, in document order.
    pub fn elements_with_class(&self, name: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements(self.root, name, &mut out);
        out
    }

    fn collect_elements(&self, id: NodeId, name: &str, out: &mut Vec<NodeId>) {
        if self.has_class(id, name) {
            out.push(id);
        }
        for &child in &self.nodes[id].children {
            self.collect_elements(child, name, out);
        }
    }

    /// Text content of a subtree (a marker element's highlighted text).
    pub fn subtree_text(&self, id: NodeId) -> String {
        let mut out = Vec::new();
        self.collect_text(id, &mut out);
        out.into_iter()
            .filter_map(|n| self.node_text(n))
            .collect()
    }

    /// Replace a text node with a sequence of plain-text gaps and
    /// `<span class="{marker_class}">` wrappers around each match range.
    ///
    /// `ranges` are byte ranges into the node's text, ascending and
    /// non-overlapping. Returns the marker ids in range order plus an
    /// undo token restoring the original text node.
    pub fn wrap_matches(
        &mut self,
        text_id: NodeId,
        ranges: &[Range<usize>],
        marker_class: &str,
    ) -> Result<(Vec<NodeId>, HighlightUndo), FindError> {
        let text = match &self.nodes[text_id].kind {
            NodeKind::Text(s) => s.clone(),
            NodeKind::Element { .. } => return Err(FindError::NotText(text_id)),
        };
        let parent = self.nodes[text_id]
            .parent
            .ok_or(FindError::NotText(text_id))?;

        let mut markers = Vec::with_capacity(ranges.len());
        let mut inserted = Vec::new();
        let mut cursor = 0;

        for range in ranges {
            if range.start > cursor {
                let gap = self.push_node(Node {
                    kind: NodeKind::Text(text[cursor..range.start].to_string()),
                    parent: Some(parent),
                    children: Vec::new(),
                });
                inserted.push(gap);
            }
            let marker = self.push_node(Node {
                kind: NodeKind::Element {
                    tag: "span".to_string(),
                    class: marker_class.to_string(),
                },
                parent: Some(parent),
                children: Vec::new(),
            });
            let matched = self.push_node(Node {
                kind: NodeKind::Text(text[range.clone()].to_string()),
                parent: Some(marker),
                children: Vec::new(),
            });
            self.nodes[marker].children.push(matched);
            markers.push(marker);
            inserted.push(marker);
            cursor = range.end;
        }

        if cursor < text.len() {
            let tail = self.push_node(Node {
                kind: NodeKind::Text(text[cursor..].to_string()),
                parent: Some(parent),
                children: Vec::new(),
            });
            inserted.push(tail);
        }

        let position = self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == text_id)
            .ok_or(FindError::NotText(text_id))?;
        self.nodes[parent]
            .children
            .splice(position..=position, inserted.iter().copied());

        Ok((
            markers,
            HighlightUndo {
                patches: vec![HighlightPatch {
                    parent,
                    inserted,
                    original_text: text,
                }],
            },
        ))
    }

    /// Reverse highlight insertions, restoring each original text node.
    ///
    /// Detached marker and gap nodes stay in the arena but are no longer
    /// reachable from the root.
    pub fn undo(&mut self, undo: HighlightUndo) {
        for patch in undo.patches {
            let position = self.nodes[patch.parent]
                .children
                .iter()
                .position(|&c| patch.inserted.contains(&c));
            let Some(start) = position else { continue };

            let end = start + patch.inserted.len();
            let restored = self.push_node(Node {
                kind: NodeKind::Text(patch.original_text),
                parent: Some(patch.parent),
                children: Vec::new(),
            });
            self.nodes[patch.parent]
                .children
                .splice(start..end, std::iter::once(restored));
        }
    }
}
