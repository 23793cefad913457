//! Document model and scanning engine for wiki markup conversion
//!
//!     This crate provides the syntax-agnostic core shared by every markup conversion: a document
//!     tree, the event protocol used to stream document structure between stages, and the scanning
//!     state machine that turns loose tokenizer calls into well-nested events.
//!
//!     TLDR: For tokenizer and renderer authors:
//!         - Babel never parses or serializes any concrete syntax. Tokenizers drive the scanner,
//!           renderers implement Listener.
//!         - Tokenizers call WikiScanner methods in whatever order the markup gives them; the
//!           scanner guarantees the output is well nested.
//!         - Renderers consume events, never walk the tree directly: DocumentTree::traverse
//!           replays a tree as events.
//!         - Transformations are listeners too: wrap, fan out, queue or look ahead as needed.
//!
//! Architecture
//!
//!     The goal here is to keep everything that does not depend on a concrete syntax in one
//!     place. The event vocabulary (./ir/events.rs) is the contract between stages, and both the
//!     flat (event) and nested (tree) representations convert into each other through the common
//!     code in ./common/mod.rs.
//!
//!     This is a pure lib: no code here supposes a shell environment, be it std print, env vars
//!     etc. Diagnostics go through `tracing`; installing a subscriber is up to the application.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # TreeError
//!     ├── ir                      # Shared vocabulary
//!     │   ├── events.rs           # The Event enum
//!     │   ├── nodes.rs            # Node kinds stored in the tree
//!     │   ├── format.rs           # Styles, formats and references
//!     │   └── parameters.rs       # Ordered string parameters
//!     ├── tree                    # Arena document tree
//!     │   ├── axes.rs             # XPath-like axis queries
//!     │   └── clone.rs            # Filtered cloning, structural equality
//!     ├── listener                # Listener trait and chain stages
//!     ├── scanner                 # Scanning state machine
//!     ├── common                  # Tree <-> event conversion
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common
//!     ├── tree
//!     ├── listener
//!     └── scanner
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//!
//! Core Algorithms
//!
//!     The most complex part of the work is producing a well-nested stream from input that is
//!     not. The scanner (./scanner/mod.rs) keeps a typed context per open document and routes
//!     every block transition through a single close_block step, so at most one top-level block
//!     is ever open. Lists and quotations are rebuilt from flat line paths, sections from header
//!     levels.
//!
//!     Reconstructing a tree from the stream and replaying a tree as a stream are the two
//!     directions of the same mapping (see ./common/flat_to_nested.rs and
//!     ./common/nested_to_flat.rs), so trees survive the trip unchanged.

pub mod common;
pub mod error;
pub mod ir;
pub mod listener;
pub mod scanner;
pub mod tree;

pub use common::{events_to_tree, tree_to_events, BuildError, TreeBuilder};
pub use error::TreeError;
pub use ir::{Event, Format, NodeKind, NodeType, Parameters, Reference, Style};
pub use listener::{
    EventQueue, EventTrace, FanOut, Intercept, Listener, Lookahead, TraceOptions, Upcoming, Wrapper,
};
pub use scanner::{BlockType, ScannerOptions, WikiScanner};
pub use tree::{Axis, DocumentTree, NodeId};
