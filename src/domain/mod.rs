//! Domain layer: entities and layout logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod flatten;
pub mod moves;
pub mod reorder;
pub mod validate;

pub use arena::{Node, NodeId, NodeKind, Tree};
pub use builder::build_tree;
pub use entities::*;
pub use error::DomainError;
pub use flatten::rebuild_items;
pub use moves::{apply_move, move_item, resolve_move, MovePlan, Reparent};
pub use reorder::{move_metric, relocate};
pub use validate::validate_items;
