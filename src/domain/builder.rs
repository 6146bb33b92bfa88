//! Tree builder: ordered items to the two-level addressable tree.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, warn};

use crate::domain::arena::{Node, NodeId, NodeKind, Tree};
use crate::domain::entities::Item;

/// Prefix of the synthetic end-of-section node identifier.
const SECTION_END_PREFIX: &str = "end-";

/// Build the addressable tree from an ordered item list.
///
/// Sections are always top-level. A non-section item whose `section_id`
/// names no Section is treated as top-level; rebuilding afterwards clears
/// the stale reference.
#[instrument(level = "debug", skip(items), fields(items = items.len()))]
pub fn build_tree(items: &[Item]) -> Tree {
    let section_ids: HashSet<&str> = items
        .iter()
        .filter(|i| i.is_section())
        .map(|i| i.id.as_str())
        .collect();
    let parent_of = |item: &Item| -> Option<String> {
        if item.is_section() {
            return None;
        }
        match item.section_ref() {
            Some(s) if section_ids.contains(s) => Some(s.to_string()),
            Some(s) => {
                warn!(item = %item.id, section = %s, "unknown section, placing item at top level");
                None
            }
            None => None,
        }
    };

    let mut tree = Tree::new();
    let mut parents: HashMap<String, (NodeId, String, usize)> = HashMap::new();
    let mut deferred = Vec::new();

    for item in items {
        match parent_of(item) {
            None => {
                let label = (tree.top_level().len() + 1).to_string();
                let idx = tree.insert_node(
                    Node {
                        id: item.id.clone(),
                        drag_index: 0,
                        label: label.clone(),
                        children: Vec::new(),
                        kind: NodeKind::Item(item.clone()),
                        section_id: None,
                    },
                    None,
                );
                if item.is_section() {
                    parents.insert(item.id.clone(), (idx, label, 0));
                }
            }
            Some(section) => deferred.push((item, section)),
        }
    }

    for (item, section) in deferred {
        let Some((parent_idx, parent_label, count)) = parents.get_mut(&section) else {
            continue;
        };
        *count += 1;
        let label = format!("{}.{}", parent_label, count);
        let parent_idx = *parent_idx;
        tree.insert_node(
            Node {
                id: item.id.clone(),
                drag_index: 0,
                label,
                children: Vec::new(),
                kind: NodeKind::Item(item.clone()),
                section_id: Some(section),
            },
            Some(parent_idx),
        );
    }

    let top_level: Vec<NodeId> = tree.top_level().to_vec();
    for top in top_level {
        tree.assign_drag_index(top);
        let Some(node) = tree.get_node(top) else {
            continue;
        };
        let children = node.children.clone();
        let section = node.is_section().then(|| node.id.clone());
        for child in children {
            tree.assign_drag_index(child);
        }
        if let Some(section) = section {
            let end = tree.insert_node(
                Node {
                    id: format!("{}{}", SECTION_END_PREFIX, section),
                    drag_index: 0,
                    label: String::new(),
                    children: Vec::new(),
                    kind: NodeKind::SectionEnd,
                    section_id: Some(section),
                },
                Some(top),
            );
            tree.assign_drag_index(end);
        }
    }

    debug!(top_level = tree.top_level().len(), len = tree.len(), "tree built");
    tree
}
