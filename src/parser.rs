//! Document scanner building the citation CST.
//!
//! Only org-cite citations get structure; everything else in the document is
//! kept as opaque `TEXT` so that offsets in the tree are offsets in the input.

use rowan::GreenNodeBuilder;

use crate::syntax::{SyntaxKind, SyntaxNode};

mod citations;

pub(crate) use citations::{is_valid_style, parse_citation_key};
use citations::{emit_citation, try_parse_citation};

const CITE_OPEN: &str = "[cite";

/// Parses a document into a lossless syntax tree.
///
/// Unlike a markup parser this does not normalize line endings: the caller's
/// byte offsets must stay valid against the tree.
///
/// # Examples
///
/// ```rust
/// use citedit::parse;
///
/// let tree = parse("As shown in [cite/t:@doe99], ...");
/// println!("{:#?}", tree);
/// ```
pub fn parse(input: &str) -> SyntaxNode {
    let mut builder = GreenNodeBuilder::new();
    builder.start_node(SyntaxKind::ROOT.into());

    let mut pos = 0;
    let mut text_start = 0;

    while let Some(found) = input[pos..].find(CITE_OPEN) {
        let start = pos + found;

        match try_parse_citation(&input[start..]) {
            Some(citation) => {
                if text_start < start {
                    builder.token(SyntaxKind::TEXT.into(), &input[text_start..start]);
                }
                emit_citation(&mut builder, &citation);
                pos = start + citation.len;
                text_start = pos;
            }
            None => {
                pos = start + CITE_OPEN.len();
            }
        }
    }

    if text_start < input.len() {
        builder.token(SyntaxKind::TEXT.into(), &input[text_start..]);
    }

    builder.finish_node();
    SyntaxNode::new_root(builder.finish())
}
