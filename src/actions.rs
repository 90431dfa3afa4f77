//! Document-level editing actions.
//!
//! Each action parses the document, locates the citation (and reference) at
//! the cursor, runs the engine and returns an [`Outcome`]. An action produces
//! at most one [`TextEdit`]; applying it is up to the caller. Nothing is kept
//! between calls.

use rowan::{TextRange, TextSize};

use crate::citation::{CitationData, Reference, citations_in};
use crate::config::Config;
use crate::edit::TextEdit;
use crate::engine::{Warning, index_of};
use crate::error::CiteError;
use crate::parser::parse;
use crate::syntax::{AstNode, Citation, CiteReference, SyntaxNode};

mod keys;
mod motion;
mod references;
mod reorder;
mod style;

pub use keys::{
    Candidate, Completion, complete_key, insert_keys, key_candidates, replace_key_with_suggestion,
};
pub use motion::{goto_citation_end, goto_citation_start, next_reference, previous_reference};
pub use references::{
    copy_reference, delete_reference, kill_reference, mark_reference, update_annotation,
};
pub use reorder::{shift_left, shift_right, sort_by_year};
pub use style::{select_style, update_style};

/// The document, the cursor and the configuration an action runs against.
pub struct Context<'a> {
    pub text: &'a str,
    pub offset: usize,
    pub config: &'a Config,
    tree: SyntaxNode,
}

impl<'a> Context<'a> {
    /// `offset` is clamped to the text and moved back to a char boundary.
    pub fn new(text: &'a str, offset: usize, config: &'a Config) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }

        Self {
            text,
            offset,
            config,
            tree: parse(text),
        }
    }

    pub fn tree(&self) -> &SyntaxNode {
        &self.tree
    }

    /// Outcome that leaves the document and the cursor as they are.
    fn unchanged(&self) -> Outcome {
        Outcome::at(self.offset)
    }

    fn locate(&self) -> Result<Located, CiteError> {
        let node = find_citation_at(&self.tree, self.offset).ok_or(CiteError::NotOnCitation)?;
        let range = node.syntax().text_range();

        let citations = citations_in(&self.tree);
        let current = citations
            .iter()
            .position(|c| c.range == range)
            .ok_or(CiteError::NotOnCitation)?;

        let reference = find_reference_at(&self.tree, self.offset).and_then(|r| {
            let range = r.syntax().text_range();
            citations[current]
                .references
                .iter()
                .position(|x| x.range == range)
        });

        log::debug!(
            "offset {} is on citation {current} (reference {reference:?})",
            self.offset
        );
        Ok(Located {
            citations,
            current,
            reference,
        })
    }

    /// Replace `old` with the serialization of `new`. Returns the edit and the
    /// edited document.
    fn replace_citation(&self, old: &CitationData, new: &CitationData) -> (TextEdit, String) {
        let edit = TextEdit::replace(old.range, new.to_text());
        let text = edit.apply(self.text);
        (edit, text)
    }
}

/// What an action wants done to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub edit: Option<TextEdit>,
    /// Cursor offset in the document after `edit` is applied.
    pub cursor: usize,
    pub warnings: Vec<Warning>,
    /// Text extracted by copy/kill.
    pub text: Option<String>,
    /// Region to select, for mark.
    pub selection: Option<TextRange>,
}

impl Outcome {
    pub fn at(cursor: usize) -> Self {
        Self {
            cursor,
            ..Self::default()
        }
    }

    fn edited(edit: TextEdit, cursor: usize) -> Self {
        Self {
            edit: Some(edit),
            cursor,
            ..Self::default()
        }
    }

    /// The document after this outcome's edit.
    pub fn apply(&self, text: &str) -> String {
        match &self.edit {
            Some(edit) => edit.apply(text),
            None => text.to_string(),
        }
    }
}

struct Located {
    citations: Vec<CitationData>,
    current: usize,
    reference: Option<usize>,
}

impl Located {
    fn citation(&self) -> &CitationData {
        &self.citations[self.current]
    }

    fn reference(&self) -> Option<&Reference> {
        self.reference
            .and_then(|index| self.citation().references.get(index))
    }

    fn require_reference(&self) -> Result<(usize, &Reference), CiteError> {
        let index = self.reference.ok_or(CiteError::NotOnReference)?;
        let reference = self
            .citation()
            .references
            .get(index)
            .ok_or(CiteError::NotOnReference)?;
        Ok((index, reference))
    }
}

fn tokens_at(tree: &SyntaxNode, offset: usize) -> Vec<crate::syntax::SyntaxToken> {
    let Ok(at) = TextSize::try_from(offset) else {
        return Vec::new();
    };
    if !tree.text_range().contains_inclusive(at) {
        return Vec::new();
    }
    let tokens = tree.token_at_offset(at);
    [tokens.clone().right_biased(), tokens.left_biased()]
        .into_iter()
        .flatten()
        .collect()
}

/// The citation containing `offset`. An offset just past the closing bracket
/// still counts as on the citation.
pub fn find_citation_at(tree: &SyntaxNode, offset: usize) -> Option<Citation> {
    tokens_at(tree, offset)
        .into_iter()
        .find_map(|token| token.parent_ancestors().find_map(Citation::cast))
}

/// The reference containing `offset`, including its end boundary.
pub fn find_reference_at(tree: &SyntaxNode, offset: usize) -> Option<CiteReference> {
    tokens_at(tree, offset)
        .into_iter()
        .find_map(|token| token.parent_ancestors().find_map(CiteReference::cast))
}

/// Begin offset of reference `index` in the citation that starts at `begin`.
fn reference_begin(text: &str, begin: usize, index: usize) -> Option<usize> {
    citation_starting_at(text, begin)?
        .references
        .get(index)
        .map(Reference::begin)
}

/// Begin offset of `target`, found again by content in the citation that
/// starts at `begin`.
fn refocus(text: &str, begin: usize, target: &Reference) -> Option<usize> {
    let citation = citation_starting_at(text, begin)?;
    let index = index_of(&citation.references, target)?;
    Some(citation.references[index].begin())
}

fn citation_starting_at(text: &str, begin: usize) -> Option<CitationData> {
    citations_in(&parse(text))
        .into_iter()
        .find(|c| c.begin() == begin)
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(text: &str, offset: usize) -> usize {
    text[offset..].find('\n').map_or(text.len(), |i| offset + i)
}
