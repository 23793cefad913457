//! Inline formatting styles and resource references.

use crate::ir::parameters::Parameters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single inline formatting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Style {
    Strong,
    Emphasis,
    Strike,
    Underline,
    Inserted,
    Deleted,
    Monospace,
    Superscript,
    Subscript,
    Code,
    Citation,
}

impl Style {
    pub fn name(self) -> &'static str {
        match self {
            Style::Strong => "strong",
            Style::Emphasis => "emphasis",
            Style::Strike => "strike",
            Style::Underline => "underline",
            Style::Inserted => "inserted",
            Style::Deleted => "deleted",
            Style::Monospace => "monospace",
            Style::Superscript => "superscript",
            Style::Subscript => "subscript",
            Style::Code => "code",
            Style::Citation => "citation",
        }
    }
}

/// The set of styles active for a run of inline content, plus its parameters.
///
/// Formats are values: toggling a style returns a new format. Two formats are
/// equal when they carry the same styles and the same parameters, which is what
/// the scanner compares to decide whether a span has to be reopened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Format {
    styles: BTreeSet<Style>,
    params: Parameters,
}

impl Format {
    pub fn new(styles: impl IntoIterator<Item = Style>, params: Parameters) -> Self {
        Self {
            styles: styles.into_iter().collect(),
            params,
        }
    }

    /// A format with a single style and no parameters.
    pub fn of(style: Style) -> Self {
        Self::new([style], Parameters::new())
    }

    /// True when the format would not produce a span at all.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.params.is_empty()
    }

    pub fn has_style(&self, style: Style) -> bool {
        self.styles.contains(&style)
    }

    pub fn styles(&self) -> impl Iterator<Item = Style> + '_ {
        self.styles.iter().copied()
    }

    pub fn style_set(&self) -> &BTreeSet<Style> {
        &self.styles
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Returns this format with `style` toggled.
    pub fn switch_style(&self, style: Style) -> Self {
        let mut styles = self.styles.clone();
        if !styles.remove(&style) {
            styles.insert(style);
        }
        Self {
            styles,
            params: self.params.clone(),
        }
    }

    /// Returns this format with its parameters replaced.
    pub fn with_params(&self, params: Parameters) -> Self {
        Self {
            styles: self.styles.clone(),
            params,
        }
    }
}

/// A reference to a resource, used by links and images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub link: String,
    pub label: Option<String>,
    pub params: Parameters,
}

impl Reference {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            label: None,
            params: Parameters::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
