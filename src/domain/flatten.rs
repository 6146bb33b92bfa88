//! Flattener: addressable node sequence back to an ordered item list.

use std::collections::HashMap;

use tracing::{instrument, trace, warn};

use crate::domain::arena::Node;
use crate::domain::entities::Item;

/// Rebuild the ordered item list from a node sequence.
///
/// Section-end nodes are skipped. Each item takes the node's `section_id`,
/// `order` is the emission position, and every section's `child_ids` is
/// recomputed from membership in emission order.
#[instrument(level = "debug", skip(nodes))]
pub fn rebuild_items<'a, I>(nodes: I) -> Vec<Item>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut items: Vec<Item> = Vec::new();
    let mut sections: HashMap<String, usize> = HashMap::new();

    for node in nodes {
        let Some(source) = node.item() else {
            continue;
        };
        let mut item = source.clone();
        if item.section_id != node.section_id {
            trace!(item = %item.id, from = ?item.section_id, to = ?node.section_id, "section changed");
            item.section_id = node.section_id.clone();
        }
        item.order = items.len();
        if item.is_section() {
            item.child_ids.clear();
            sections.insert(node.id.clone(), items.len());
        }
        items.push(item);
    }

    for i in 0..items.len() {
        let Some(section) = items[i].section_id.clone() else {
            continue;
        };
        match sections.get(&section) {
            Some(&pos) => {
                let child = items[i].id.clone();
                items[pos].child_ids.push(child);
            }
            None => warn!(item = %items[i].id, section = %section, "section not present in sequence"),
        }
    }

    items
}
