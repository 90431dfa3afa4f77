//! Value snapshots of citations and references, and their serialization.
//!
//! Values are derived from the syntax tree on every action and discarded after
//! the action produced its edit. Offsets inside them are only meaningful for
//! the text they were parsed from.

use rowan::TextRange;

use crate::parser::{parse, parse_citation_key};
use crate::styles::style_suffix;
use crate::syntax::{AstNode, Citation, CiteReference};

/// One key with its prefix/suffix annotations.
///
/// Structural identity is `(key, prefix, suffix)`; the range is not part of
/// it. Two references with the same triple cannot be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub key: String,
    pub prefix: String,
    pub suffix: String,
    pub range: TextRange,
}

impl Reference {
    /// A reference that is not (yet) anchored in any text.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prefix: String::new(),
            suffix: String::new(),
            range: TextRange::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn from_node(node: &CiteReference) -> Self {
        Self {
            key: node.key(),
            prefix: node.prefix(),
            suffix: node.suffix(),
            range: node.syntax().text_range(),
        }
    }

    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.key, &self.prefix, &self.suffix)
    }

    /// Structural equality on `(key, prefix, suffix)`.
    pub fn same_as(&self, other: &Reference) -> bool {
        self.identity() == other.identity()
    }

    pub fn begin(&self) -> usize {
        self.range.start().into()
    }

    pub fn end(&self) -> usize {
        self.range.end().into()
    }
}

/// A citation: its style, optional common prefix/suffix and ordered references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationData {
    pub style: Option<String>,
    pub global_prefix: Option<String>,
    pub global_suffix: Option<String>,
    pub references: Vec<Reference>,
    pub range: TextRange,
}

impl CitationData {
    pub fn from_node(node: &Citation) -> Self {
        Self {
            style: node.style(),
            global_prefix: node.global_prefix().map(|prefix| prefix.text()),
            global_suffix: node.global_suffix().map(|suffix| suffix.text()),
            references: node.references().map(|r| Reference::from_node(&r)).collect(),
            range: node.syntax().text_range(),
        }
    }

    /// Same citation with a different reference list.
    pub fn with_references(&self, references: Vec<Reference>) -> Self {
        Self {
            references,
            ..self.clone()
        }
    }

    pub fn with_style(&self, style: Option<&str>) -> Self {
        Self {
            style: style.filter(|s| !s.is_empty()).map(str::to_string),
            ..self.clone()
        }
    }

    pub fn begin(&self) -> usize {
        self.range.start().into()
    }

    pub fn end(&self) -> usize {
        self.range.end().into()
    }

    /// Serialized form of the whole citation.
    pub fn to_text(&self) -> String {
        serialize_citation(
            self.style.as_deref(),
            self.global_prefix.as_deref(),
            &self.references,
            self.global_suffix.as_deref(),
        )
    }
}

pub fn serialize_reference(reference: &Reference) -> String {
    format!("{}@{}{}", reference.prefix, reference.key, reference.suffix)
}

/// References joined with `"; "`.
pub fn serialize_references(references: &[Reference]) -> String {
    references
        .iter()
        .map(serialize_reference)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn serialize_citation(
    style: Option<&str>,
    global_prefix: Option<&str>,
    references: &[Reference],
    global_suffix: Option<&str>,
) -> String {
    let mut parts = Vec::with_capacity(references.len() + 2);
    if let Some(prefix) = global_prefix.filter(|p| !p.trim().is_empty()) {
        parts.push(prefix.trim().to_string());
    }
    parts.push(serialize_references(references));
    if let Some(suffix) = global_suffix.filter(|s| !s.trim().is_empty()) {
        parts.push(suffix.trim().to_string());
    }

    format!("[cite{}:{}]", style_suffix(style), parts.join("; "))
}

/// Re-derive references from a serialized reference list.
///
/// This is the inverse of [`serialize_references`]. Returns `None` if the text
/// does not form a valid citation body.
pub fn parse_references(text: &str) -> Option<Vec<Reference>> {
    let wrapped = format!("[cite:{text}]");
    let tree = parse(&wrapped);
    let citation = tree.children().find_map(Citation::cast)?;
    if citation.syntax().text_range().len() != rowan::TextSize::of(wrapped.as_str()) {
        return None;
    }
    Some(
        citation
            .references()
            .map(|r| Reference::from_node(&r))
            .collect(),
    )
}

/// Collect every citation in the tree, in document order.
pub fn citations_in(tree: &crate::syntax::SyntaxNode) -> Vec<CitationData> {
    tree.descendants()
        .filter_map(Citation::cast)
        .map(|c| CitationData::from_node(&c))
        .collect()
}

/// Whether `key` would survive a serialize/parse round trip unchanged.
pub fn is_valid_key(key: &str) -> bool {
    parse_citation_key(key) == Some(key.len())
}
