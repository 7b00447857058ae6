//! # Inventory Model
//!
//! The unresolved side of an inventory: the group graph every source
//! (static file, directory, dynamic program) is normalized into, and the
//! host-range notation used when declaring hosts.

pub mod graph;
pub mod range;

pub use graph::{ALL_GROUP, Group, GroupGraph, UNGROUPED_GROUP};
