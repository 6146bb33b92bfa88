//! Reordering engine for sectioned dashboard layouts.
//!
//! A dashboard is an ordered list of widgets where some widgets are sections
//! owning a contiguous run of children. [`domain::build_tree`] turns the list
//! into a flat, drag-indexed tree; [`domain::move_item`] applies one
//! drag-and-drop gesture and returns the rebuilt list.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
