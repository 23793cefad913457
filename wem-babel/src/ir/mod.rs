//! Intermediate Representation (IR) shared by every stage of a conversion.
//!
//! This module defines the format-agnostic vocabulary: the flat event stream
//! exchanged between scanner, listeners and tree, the node kinds stored in the
//! document tree, and the payload types both of them carry.

pub mod events;
pub mod format;
pub mod nodes;
pub mod parameters;

pub use events::Event;
pub use format::{Format, Reference, Style};
pub use nodes::{NodeKind, NodeType};
pub use parameters::Parameters;
