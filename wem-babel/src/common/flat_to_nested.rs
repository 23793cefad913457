//! Converts a flat event stream back into a document tree.
//!
//! # The High-Level Concept
//!
//! The core challenge is to reconstruct a tree from a linear sequence of
//! events. A stack keeps track of the "open" containers. A `Begin*` event
//! creates a node, attaches it to the container on top of the stack and
//! pushes it. Its end event pops it again. Leaf events attach a node to the
//! top of the stack without touching the stack.
//!
//! # The Algorithm
//!
//! 1. **Initialization:**
//!    - The first event must be `BeginDocument`; it becomes the root node
//!
//! 2. **Processing `Begin*` Events:**
//!    - Create a node from the event payload
//!    - Append it to the current parent (top of stack)
//!    - Push it, remembering the exact end event that must close it
//!
//! 3. **Processing Leaf Events:**
//!    - Append a leaf node to the current parent
//!
//! 4. **Processing End Events:**
//!    - Pop the stack and check that the event equals the remembered one,
//!      payload included
//!
//! 5. **Completion:**
//!    - The root document must be closed and nothing may follow it
//!
//! The builder is a [`Listener`], so it can sit at the end of any chain. The
//! first structural error is kept and every later event ignored.

use crate::error::TreeError;
use crate::ir::events::Event;
use crate::ir::format::Format;
use crate::ir::nodes::NodeKind;
use crate::ir::parameters::Parameters;
use crate::listener::Listener;
use crate::tree::{DocumentTree, NodeId};

/// Error type for flat-to-nested conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The stream did not start with `begin_document`
    MissingDocument(String),
    /// An end event arrived while nothing was open
    UnexpectedEnd(String),
    /// An end event does not match the innermost open container
    MismatchedEvents { expected: String, found: String },
    /// Events remaining after the root document was closed
    ExtraEvents(String),
    /// Containers still open when the stream ended
    UnclosedContainers(usize),
    /// The tree refused a mutation
    Tree(TreeError),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::MissingDocument(found) => {
                write!(f, "Expected begin_document, found {found}")
            }
            BuildError::UnexpectedEnd(found) => write!(f, "Unexpected end event: {found}"),
            BuildError::MismatchedEvents { expected, found } => {
                write!(f, "Mismatched events: expected {expected}, found {found}")
            }
            BuildError::ExtraEvents(found) => {
                write!(f, "Extra event after end of document: {found}")
            }
            BuildError::UnclosedContainers(count) => {
                write!(f, "Unclosed containers: {count} still open")
            }
            BuildError::Tree(err) => write!(f, "Tree error: {err}"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<TreeError> for BuildError {
    fn from(err: TreeError) -> Self {
        BuildError::Tree(err)
    }
}

/// Builds a [`DocumentTree`] from the events it receives.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: Option<DocumentTree>,
    stack: Vec<(NodeId, Event)>,
    closed: bool,
    error: Option<BuildError>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first error encountered, if any.
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// The finished tree, or the first error.
    ///
    /// An empty stream yields an empty document.
    pub fn finish(self) -> Result<DocumentTree, BuildError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        match self.tree {
            None => Ok(DocumentTree::new()),
            Some(_) if !self.closed => Err(BuildError::UnclosedContainers(self.stack.len())),
            Some(tree) => Ok(tree),
        }
    }

    fn handle(&mut self, event: &Event) -> Result<(), BuildError> {
        if self.closed {
            return Err(BuildError::ExtraEvents(event.name().to_string()));
        }
        let Some(tree) = self.tree.as_mut() else {
            return self.start(event);
        };

        if event.is_end() {
            let (_, expected) = self
                .stack
                .pop()
                .ok_or_else(|| BuildError::UnexpectedEnd(event.name().to_string()))?;
            if &expected != event {
                return Err(BuildError::MismatchedEvents {
                    expected: format!("{expected:?}"),
                    found: format!("{event:?}"),
                });
            }
            self.closed = self.stack.is_empty();
            return Ok(());
        }

        let Some(&(parent, _)) = self.stack.last() else {
            return Err(BuildError::ExtraEvents(event.name().to_string()));
        };
        if let Some((kind, params)) = container_node(event) {
            let node = tree.create_node_with(kind, params);
            tree.append_child(parent, node)?;
            if let Some(end) = event.matching_end() {
                self.stack.push((node, end));
            }
        } else if let Some((kind, params)) = leaf_node(event) {
            let node = tree.create_node_with(kind, params);
            tree.append_child(parent, node)?;
        }
        Ok(())
    }

    fn start(&mut self, event: &Event) -> Result<(), BuildError> {
        let Event::BeginDocument(params) = event else {
            return Err(BuildError::MissingDocument(event.name().to_string()));
        };
        let tree = DocumentTree::with_root(NodeKind::Document, params.clone());
        self.stack
            .push((tree.root(), Event::EndDocument(params.clone())));
        self.tree = Some(tree);
        Ok(())
    }
}

impl Listener for TreeBuilder {
    fn on_event(&mut self, event: &Event) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(event) {
            tracing::warn!(error = %err, "ill-formed event stream, ignoring the rest");
            self.error = Some(err);
        }
    }
}

/// Builds a tree from a complete event stream.
pub fn events_to_tree(events: &[Event]) -> Result<DocumentTree, BuildError> {
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.on_event(event);
    }
    builder.finish()
}

/// Node kind and parameters for a begin event.
fn container_node(event: &Event) -> Option<(NodeKind, Parameters)> {
    let none = Parameters::new;
    let node = match event {
        Event::BeginDocument(p) => (NodeKind::Document, p.clone()),
        Event::BeginSection { level, params } => (NodeKind::Section { level: *level }, params.clone()),
        Event::BeginHeader { level, id, params } => (
            NodeKind::Header {
                level: *level,
                id: id.clone(),
            },
            params.clone(),
        ),
        Event::BeginParagraph(p) => (NodeKind::Paragraph, p.clone()),
        Event::BeginInfoBlock { info_type, params } => (
            NodeKind::InfoBlock {
                info_type: info_type.clone(),
            },
            params.clone(),
        ),
        Event::BeginQuotation(p) => (NodeKind::Quotation, p.clone()),
        Event::BeginQuotationLine => (NodeKind::QuotationLine, none()),
        Event::BeginList { ordered, params } => (NodeKind::List { ordered: *ordered }, params.clone()),
        Event::BeginListItem(p) => (NodeKind::ListItem, p.clone()),
        Event::BeginDefinitionList(p) => (NodeKind::DefinitionList, p.clone()),
        Event::BeginDefinitionTerm => (NodeKind::DefinitionTerm, none()),
        Event::BeginDefinitionDescription => (NodeKind::DefinitionDescription, none()),
        Event::BeginTable(p) => (NodeKind::Table, p.clone()),
        Event::BeginTableRow(p) => (NodeKind::TableRow, p.clone()),
        Event::BeginTableCell { head, params } => (NodeKind::TableCell { head: *head }, params.clone()),
        Event::BeginFigure(p) => (NodeKind::Figure, p.clone()),
        Event::BeginFigureCaption(p) => (NodeKind::FigureCaption, p.clone()),
        Event::BeginMetadata(p) => (NodeKind::Metadata, p.clone()),
        Event::BeginFormat(format) => format_node(format),
        _ => return None,
    };
    Some(node)
}

fn format_node(format: &Format) -> (NodeKind, Parameters) {
    (
        NodeKind::Format {
            styles: format.style_set().clone(),
        },
        format.params().clone(),
    )
}

/// Node kind and parameters for a leaf event.
fn leaf_node(event: &Event) -> Option<(NodeKind, Parameters)> {
    let none = Parameters::new;
    let node = match event {
        Event::OnEmptyLines(count) => (NodeKind::EmptyLines(*count), none()),
        Event::OnHorizontalLine(p) => (NodeKind::HorizontalLine, p.clone()),
        Event::OnVerbatimBlock { content, params } | Event::OnVerbatimInline { content, params } => (
            NodeKind::Verbatim {
                content: content.clone(),
                inline: matches!(event, Event::OnVerbatimInline { .. }),
            },
            params.clone(),
        ),
        Event::OnMacroBlock {
            name,
            params,
            content,
        }
        | Event::OnMacroInline {
            name,
            params,
            content,
        } => (
            NodeKind::Macro {
                name: name.clone(),
                content: content.clone(),
                inline: matches!(event, Event::OnMacroInline { .. }),
            },
            params.clone(),
        ),
        Event::OnRawText { content, syntax } => (
            NodeKind::RawText {
                content: content.clone(),
                syntax: syntax.clone(),
            },
            none(),
        ),
        Event::OnReference {
            reference,
            freestanding,
        } => (
            NodeKind::Link {
                reference: reference.clone(),
                freestanding: *freestanding,
            },
            none(),
        ),
        Event::OnImage {
            reference,
            freestanding,
        } => (
            NodeKind::Image {
                reference: reference.clone(),
                freestanding: *freestanding,
            },
            none(),
        ),
        Event::OnWord(text) => (NodeKind::Word(text.clone()), none()),
        Event::OnSpace(text) => (NodeKind::Space(text.clone()), none()),
        Event::OnSpecialSymbol(text) => (NodeKind::SpecialSymbol(text.clone()), none()),
        Event::OnEscape(text) => (NodeKind::Escape(text.clone()), none()),
        Event::OnNewLine => (NodeKind::NewLine, none()),
        Event::OnLineBreak => (NodeKind::LineBreak, none()),
        Event::OnId(id) => (NodeKind::Id(id.clone()), none()),
        _ => return None,
    };
    Some(node)
}
