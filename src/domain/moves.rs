//! Move engine: drag-and-drop between two positions of the addressable space.
//!
//! A move is resolved into a [`MovePlan`] first (where the block lands and
//! whether the dragged item changes section), then applied to a transient
//! copy of the linearized tree. The tree itself is never mutated.

use std::borrow::Cow;

use tracing::{debug, instrument};

use crate::domain::arena::{Node, Tree};
use crate::domain::entities::Item;
use crate::domain::flatten::rebuild_items;

/// Section membership change of the dragged item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reparent {
    /// Keep the current `section_id`
    Keep,
    /// Join the given section
    Into(String),
    /// Leave any section
    TopLevel,
}

/// Resolved move, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// Drag index of the dragged node
    pub source: usize,
    /// Effective destination; the block lands right before the node that
    /// occupied this index, or at the end when it equals the length
    pub destination: usize,
    /// Dragged node plus the children travelling with it
    pub block_len: usize,
    pub reparent: Reparent,
}

/// Move the node at `source` to `destination` and rebuild the item list.
///
/// Returns `None` when there is nothing to apply: either index out of range,
/// equal indices, a section-end node as source, or a retargeted destination
/// that falls outside the tree.
#[instrument(level = "debug", skip(tree), fields(len = tree.len()))]
pub fn move_item(tree: &Tree, source: usize, destination: usize) -> Option<Vec<Item>> {
    let plan = resolve_move(tree, source, destination)?;
    Some(apply_move(tree, &plan))
}

/// Decide effective destination and membership change for a move.
#[instrument(level = "debug", skip(tree))]
pub fn resolve_move(tree: &Tree, source: usize, destination: usize) -> Option<MovePlan> {
    let linear = tree.linearize();
    let len = linear.len();
    if source >= len || destination >= len || source == destination {
        debug!(source, destination, len, "nothing to move");
        return None;
    }
    let src = linear[source];
    if src.is_section_end() {
        debug!(source, "section end is not draggable");
        return None;
    }

    let (destination, reparent) = if source < destination {
        resolve_forward(tree, &linear, source, destination)?
    } else {
        resolve_backward(tree, &linear, source, destination)
    };

    let plan = MovePlan {
        source,
        destination,
        block_len: 1 + src.children.len(),
        reparent,
    };
    debug!(?plan, "move resolved");
    Some(plan)
}

fn resolve_forward(
    tree: &Tree,
    linear: &[&Node],
    source: usize,
    destination: usize,
) -> Option<(usize, Reparent)> {
    let src = linear[source];
    let dst = linear[destination];

    if src.is_section() {
        let Some(section) = dst.section_ref() else {
            return Some((destination, Reparent::Keep));
        };
        if section == src.id {
            // Own body: skip past the whole block
            let past = source + src.children.len() + 1;
            if past >= linear.len() {
                return None;
            }
            return Some((past, Reparent::Keep));
        }
        // Another section's body: land right after that section
        let header = tree.node_by_id(section)?;
        let past = header.drag_index + header.children.len() + 1;
        return Some((past, Reparent::Keep));
    }

    let reparent = if dst.is_section() {
        let section = linear
            .get(destination + 1)
            .and_then(|n| n.section_ref())
            .unwrap_or(dst.id.as_str());
        Reparent::Into(section.to_string())
    } else if dst.is_section_end() {
        Reparent::TopLevel
    } else if let Some(section) = dst.section_ref() {
        Reparent::Into(section.to_string())
    } else {
        Reparent::Keep
    };
    Some((destination, reparent))
}

fn resolve_backward(
    tree: &Tree,
    linear: &[&Node],
    source: usize,
    destination: usize,
) -> (usize, Reparent) {
    let src = linear[source];
    let dst = linear[destination];

    if src.is_section() {
        // Never inside another section's body: land on its header
        let header = dst
            .section_ref()
            .and_then(|s| tree.node_by_id(s))
            .map(|h| h.drag_index)
            .unwrap_or(destination);
        return (header, Reparent::Keep);
    }

    let reparent = match dst.section_ref() {
        Some(section) => Reparent::Into(section.to_string()),
        None => Reparent::TopLevel,
    };
    (destination, reparent)
}

/// Slice the dragged block out, reinsert it and rebuild the item list.
#[instrument(level = "debug", skip(tree))]
pub fn apply_move(tree: &Tree, plan: &MovePlan) -> Vec<Item> {
    let mut working: Vec<Cow<'_, Node>> =
        tree.linearize().into_iter().map(Cow::Borrowed).collect();

    match &plan.reparent {
        Reparent::Keep => {}
        Reparent::Into(section) => working[plan.source].to_mut().section_id = Some(section.clone()),
        Reparent::TopLevel => working[plan.source].to_mut().section_id = None,
    }

    let end = plan.source + plan.block_len;
    let block: Vec<Cow<'_, Node>> = working.drain(plan.source..end).collect();
    let mut at = plan.destination;
    if at > plan.source {
        at -= plan.block_len;
    }
    let tail = working.split_off(at);
    working.extend(block);
    working.extend(tail);

    rebuild_items(working.iter().map(|n| &**n))
}
