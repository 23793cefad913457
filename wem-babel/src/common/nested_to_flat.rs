//! Converts a document tree into a flat event stream.
//!
//! # The High-Level Concept
//!
//! Traversing the tree in pre-order emits a sequence of begin/content/end
//! events that can later be reassembled into the same tree. Container nodes
//! produce a begin event, the events of their children, then the matching end
//! event. Leaf nodes produce exactly one event. `Composite` nodes are
//! transparent: only their children are emitted.
//!
//! # The Algorithm
//!
//! 1. **Entering Containers:**
//!    - Emit the `Begin*` event built from the node kind and its parameters
//!    - Recurse into child nodes, first to last
//!    - Emit the end event derived from the begin event, so payloads always agree
//!
//! 2. **Handling Leaves:**
//!    - Emit the single `On*` event carrying the node's payload
//!
//! This mirrors the reverse process performed in `flat_to_nested`, so a tree
//! survives a trip through the event stream unchanged. The exception is
//! parameters on kinds whose events have no room for them (quotation lines,
//! definition terms and descriptions, text leaves): see
//! [`NodeKind::carries_parameters`].

use crate::ir::events::Event;
use crate::ir::format::Format;
use crate::ir::nodes::NodeKind;
use crate::ir::parameters::Parameters;
use crate::listener::Listener;
use crate::tree::{DocumentTree, NodeId};

/// Collects the events of the subtree rooted at `node`.
pub fn tree_to_events(tree: &DocumentTree, node: NodeId) -> Vec<Event> {
    let mut events = Vec::new();
    tree.traverse(node, &mut events);
    events
}

impl DocumentTree {
    /// Emits the events of the subtree rooted at `node` to `listener`.
    pub fn traverse<L: Listener + ?Sized>(&self, node: NodeId, listener: &mut L) {
        let Some(data) = self.node(node) else {
            return;
        };
        if !data.params.is_empty() && !data.kind.carries_parameters() {
            tracing::debug!(
                node = %node,
                kind = ?data.kind.node_type(),
                "parameters not representable in events, skipping them"
            );
        }
        if !data.kind.is_container() {
            if let Some(event) = leaf_event(&data.kind, &data.params) {
                listener.on_event(&event);
            }
            return;
        }

        let begin = begin_event(&data.kind, &data.params);
        if let Some(begin) = &begin {
            listener.on_event(begin);
        }
        for child in self.children(node) {
            self.traverse(child, listener);
        }
        if let Some(end) = begin.as_ref().and_then(Event::matching_end) {
            listener.on_event(&end);
        }
    }
}

/// The begin event of a container kind; `None` for composites and leaves.
pub(crate) fn begin_event(kind: &NodeKind, params: &Parameters) -> Option<Event> {
    let params = params.clone();
    let event = match kind {
        NodeKind::Document => Event::BeginDocument(params),
        NodeKind::Section { level } => Event::BeginSection {
            level: *level,
            params,
        },
        NodeKind::Header { level, id } => Event::BeginHeader {
            level: *level,
            id: id.clone(),
            params,
        },
        NodeKind::Paragraph => Event::BeginParagraph(params),
        NodeKind::InfoBlock { info_type } => Event::BeginInfoBlock {
            info_type: info_type.clone(),
            params,
        },
        NodeKind::Quotation => Event::BeginQuotation(params),
        NodeKind::QuotationLine => Event::BeginQuotationLine,
        NodeKind::List { ordered } => Event::BeginList {
            ordered: *ordered,
            params,
        },
        NodeKind::ListItem => Event::BeginListItem(params),
        NodeKind::DefinitionList => Event::BeginDefinitionList(params),
        NodeKind::DefinitionTerm => Event::BeginDefinitionTerm,
        NodeKind::DefinitionDescription => Event::BeginDefinitionDescription,
        NodeKind::Table => Event::BeginTable(params),
        NodeKind::TableRow => Event::BeginTableRow(params),
        NodeKind::TableCell { head } => Event::BeginTableCell {
            head: *head,
            params,
        },
        NodeKind::Figure => Event::BeginFigure(params),
        NodeKind::FigureCaption => Event::BeginFigureCaption(params),
        NodeKind::Format { styles } => {
            Event::BeginFormat(Format::new(styles.iter().copied(), params))
        }
        NodeKind::Metadata => Event::BeginMetadata(params),
        _ => return None,
    };
    Some(event)
}

/// The single event of a leaf kind; `None` for containers.
pub(crate) fn leaf_event(kind: &NodeKind, params: &Parameters) -> Option<Event> {
    let event = match kind {
        NodeKind::EmptyLines(count) => Event::OnEmptyLines(*count),
        NodeKind::HorizontalLine => Event::OnHorizontalLine(params.clone()),
        NodeKind::Verbatim { content, inline } => {
            let (content, params) = (content.clone(), params.clone());
            if *inline {
                Event::OnVerbatimInline { content, params }
            } else {
                Event::OnVerbatimBlock { content, params }
            }
        }
        NodeKind::Macro {
            name,
            content,
            inline,
        } => {
            let (name, content, params) = (name.clone(), content.clone(), params.clone());
            if *inline {
                Event::OnMacroInline {
                    name,
                    params,
                    content,
                }
            } else {
                Event::OnMacroBlock {
                    name,
                    params,
                    content,
                }
            }
        }
        NodeKind::RawText { content, syntax } => Event::OnRawText {
            content: content.clone(),
            syntax: syntax.clone(),
        },
        NodeKind::Link {
            reference,
            freestanding,
        } => Event::OnReference {
            reference: reference.clone(),
            freestanding: *freestanding,
        },
        NodeKind::Image {
            reference,
            freestanding,
        } => Event::OnImage {
            reference: reference.clone(),
            freestanding: *freestanding,
        },
        NodeKind::Word(text) => Event::OnWord(text.clone()),
        NodeKind::Space(text) => Event::OnSpace(text.clone()),
        NodeKind::SpecialSymbol(text) => Event::OnSpecialSymbol(text.clone()),
        NodeKind::Escape(text) => Event::OnEscape(text.clone()),
        NodeKind::NewLine => Event::OnNewLine,
        NodeKind::LineBreak => Event::OnLineBreak,
        NodeKind::Id(id) => Event::OnId(id.clone()),
        _ => return None,
    };
    Some(event)
}
