//! Contains logic for mapping between the nested and flat document representations.

pub mod flat_to_nested;
pub mod nested_to_flat;

pub use flat_to_nested::{events_to_tree, BuildError, TreeBuilder};
pub use nested_to_flat::tree_to_events;
