//! Core data structures for the document tree nodes.
//!
//! A node's kind is a tagged union carrying only its own payload. Generic
//! string parameters live next to the kind in the tree (see
//! [`crate::tree::NodeData`]), so every kind can carry them.

use crate::ir::format::{Reference, Style};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The kind of a document node together with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    Section {
        level: usize,
    },
    /// Headings with level 1-6 and an optional anchor id.
    Header {
        level: usize,
        id: Option<String>,
    },
    Paragraph,
    InfoBlock {
        info_type: String,
    },
    Quotation,
    QuotationLine,
    List {
        ordered: bool,
    },
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Table,
    TableRow,
    TableCell {
        head: bool,
    },
    Figure,
    FigureCaption,
    /// Inline formatting span. Its parameters are the node parameters.
    Format {
        styles: BTreeSet<Style>,
    },
    /// Metadata container wrapping arbitrary content.
    Metadata,
    /// Grouping node without events of its own; only its children are emitted.
    Composite,
    EmptyLines(usize),
    HorizontalLine,
    Verbatim {
        content: String,
        inline: bool,
    },
    Macro {
        name: String,
        content: Option<String>,
        inline: bool,
    },
    RawText {
        content: String,
        syntax: String,
    },
    Link {
        reference: Reference,
        freestanding: bool,
    },
    Image {
        reference: Reference,
        freestanding: bool,
    },
    Word(String),
    Space(String),
    SpecialSymbol(String),
    Escape(String),
    NewLine,
    LineBreak,
    /// Anchor id.
    Id(String),
}

/// Payload-free tag of a [`NodeKind`], used by matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Document,
    Section,
    Header,
    Paragraph,
    InfoBlock,
    Quotation,
    QuotationLine,
    List,
    ListItem,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Table,
    TableRow,
    TableCell,
    Figure,
    FigureCaption,
    Format,
    Metadata,
    Composite,
    EmptyLines,
    HorizontalLine,
    Verbatim,
    Macro,
    RawText,
    Link,
    Image,
    Word,
    Space,
    SpecialSymbol,
    Escape,
    NewLine,
    LineBreak,
    Id,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Document => NodeType::Document,
            NodeKind::Section { .. } => NodeType::Section,
            NodeKind::Header { .. } => NodeType::Header,
            NodeKind::Paragraph => NodeType::Paragraph,
            NodeKind::InfoBlock { .. } => NodeType::InfoBlock,
            NodeKind::Quotation => NodeType::Quotation,
            NodeKind::QuotationLine => NodeType::QuotationLine,
            NodeKind::List { .. } => NodeType::List,
            NodeKind::ListItem => NodeType::ListItem,
            NodeKind::DefinitionList => NodeType::DefinitionList,
            NodeKind::DefinitionTerm => NodeType::DefinitionTerm,
            NodeKind::DefinitionDescription => NodeType::DefinitionDescription,
            NodeKind::Table => NodeType::Table,
            NodeKind::TableRow => NodeType::TableRow,
            NodeKind::TableCell { .. } => NodeType::TableCell,
            NodeKind::Figure => NodeType::Figure,
            NodeKind::FigureCaption => NodeType::FigureCaption,
            NodeKind::Format { .. } => NodeType::Format,
            NodeKind::Metadata => NodeType::Metadata,
            NodeKind::Composite => NodeType::Composite,
            NodeKind::EmptyLines(_) => NodeType::EmptyLines,
            NodeKind::HorizontalLine => NodeType::HorizontalLine,
            NodeKind::Verbatim { .. } => NodeType::Verbatim,
            NodeKind::Macro { .. } => NodeType::Macro,
            NodeKind::RawText { .. } => NodeType::RawText,
            NodeKind::Link { .. } => NodeType::Link,
            NodeKind::Image { .. } => NodeType::Image,
            NodeKind::Word(_) => NodeType::Word,
            NodeKind::Space(_) => NodeType::Space,
            NodeKind::SpecialSymbol(_) => NodeType::SpecialSymbol,
            NodeKind::Escape(_) => NodeType::Escape,
            NodeKind::NewLine => NodeType::NewLine,
            NodeKind::LineBreak => NodeType::LineBreak,
            NodeKind::Id(_) => NodeType::Id,
        }
    }

    /// Container kinds emit begin/end events around their children; all other
    /// kinds are leaves emitting a single event.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Section { .. }
                | NodeKind::Header { .. }
                | NodeKind::Paragraph
                | NodeKind::InfoBlock { .. }
                | NodeKind::Quotation
                | NodeKind::QuotationLine
                | NodeKind::List { .. }
                | NodeKind::ListItem
                | NodeKind::DefinitionList
                | NodeKind::DefinitionTerm
                | NodeKind::DefinitionDescription
                | NodeKind::Table
                | NodeKind::TableRow
                | NodeKind::TableCell { .. }
                | NodeKind::Figure
                | NodeKind::FigureCaption
                | NodeKind::Format { .. }
                | NodeKind::Metadata
                | NodeKind::Composite
        )
    }

    /// Whether the events of this kind carry the node's parameters.
    ///
    /// Parameters set on other kinds stay in the tree but are not emitted by
    /// [`DocumentTree::traverse`](crate::tree::DocumentTree::traverse), so
    /// they do not survive a trip through the event stream.
    pub fn carries_parameters(&self) -> bool {
        matches!(
            self,
            NodeKind::Document
                | NodeKind::Section { .. }
                | NodeKind::Header { .. }
                | NodeKind::Paragraph
                | NodeKind::InfoBlock { .. }
                | NodeKind::Quotation
                | NodeKind::List { .. }
                | NodeKind::ListItem
                | NodeKind::DefinitionList
                | NodeKind::Table
                | NodeKind::TableRow
                | NodeKind::TableCell { .. }
                | NodeKind::Figure
                | NodeKind::FigureCaption
                | NodeKind::Format { .. }
                | NodeKind::Metadata
                | NodeKind::HorizontalLine
                | NodeKind::Verbatim { .. }
                | NodeKind::Macro { .. }
        )
    }

    /// Plain text carried by textual leaves.
    pub fn text(&self) -> Option<&str> {
        match self {
            NodeKind::Word(text)
            | NodeKind::Space(text)
            | NodeKind::SpecialSymbol(text)
            | NodeKind::Escape(text) => Some(text),
            _ => None,
        }
    }
}
