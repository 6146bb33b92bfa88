use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::Item;

/// Stable handle of a node inside a [`Tree`].
pub type NodeId = Index;

/// What a node stands for in the addressable sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Wraps a persisted item
    Item(Item),
    /// Trailing slot of a section: "place right after this section"
    SectionEnd,
}

/// Node of the two-level addressable tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    /// Position in the flat drag-and-drop space, unique across the tree
    pub drag_index: usize,
    /// Display path, e.g. `2` or `2.3`
    pub label: String,
    /// Child handles; only top-level section nodes have any
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    /// Enclosing section, `None` for top-level nodes and section headers
    pub section_id: Option<String>,
}

impl Node {
    pub fn item(&self) -> Option<&Item> {
        match &self.kind {
            NodeKind::Item(item) => Some(item),
            NodeKind::SectionEnd => None,
        }
    }

    pub fn is_section(&self) -> bool {
        self.item().is_some_and(Item::is_section)
    }

    pub fn is_section_end(&self) -> bool {
        matches!(self.kind, NodeKind::SectionEnd)
    }

    pub fn section_ref(&self) -> Option<&str> {
        self.section_id.as_deref()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Item(item) => write!(f, "[{}] {} {}", self.drag_index, self.label, item.id),
            NodeKind::SectionEnd => write!(f, "[{}] end of section", self.drag_index),
        }
    }
}

/// Arena-backed addressable tree.
///
/// Nodes are owned by the arena and referenced by [`NodeId`]; two side maps
/// resolve item identifiers and drag indices to handles.
#[derive(Debug, Default)]
pub struct Tree {
    arena: Arena<Node>,
    top_level: Vec<NodeId>,
    by_id: HashMap<String, NodeId>,
    by_drag_index: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, attaching it to `parent` when given.
    pub(crate) fn insert_node(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let is_end = node.is_section_end();
        let id = node.id.clone();
        let idx = self.arena.insert(node);

        match parent {
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    parent.children.push(idx);
                }
            }
            None => self.top_level.push(idx),
        }
        if !is_end {
            self.by_id.insert(id, idx);
        }
        idx
    }

    pub(crate) fn assign_drag_index(&mut self, idx: NodeId) {
        let next = self.by_drag_index.len();
        if let Some(node) = self.arena.get_mut(idx) {
            node.drag_index = next;
            self.by_drag_index.push(idx);
        }
    }

    pub fn get_node(&self, idx: NodeId) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    /// Node occupying `drag_index`, if in range.
    pub fn node_at(&self, drag_index: usize) -> Option<&Node> {
        self.by_drag_index
            .get(drag_index)
            .and_then(|&idx| self.get_node(idx))
    }

    /// Node wrapping the item with identifier `id`.
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id).and_then(|&idx| self.get_node(idx))
    }

    /// Total addressable length.
    pub fn len(&self) -> usize {
        self.by_drag_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_drag_index.is_empty()
    }

    /// Pre-order walk: each top-level node followed by its children.
    ///
    /// Reproduces drag-index order without consulting the index map.
    #[instrument(level = "trace", skip(self))]
    pub fn linearize(&self) -> Vec<&Node> {
        let mut out = Vec::with_capacity(self.len());
        for &top in &self.top_level {
            if let Some(node) = self.get_node(top) {
                out.push(node);
                out.extend(node.children.iter().filter_map(|&c| self.get_node(c)));
            }
        }
        out
    }

    pub fn children_of<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.children.iter().filter_map(move |&c| self.get_node(c))
    }
}
