//! Reports citation keys that are missing from the bibliography.

use crate::bibliography::Bibliography;
use crate::citation::citations_in;
use crate::config::Config;
use crate::diagnostics::{Diagnostic, Fix, Location};
use crate::edit::TextEdit;
use crate::engine::suggest_keys;
use crate::syntax::{AstNode, CiteReference, SyntaxKind, SyntaxNode};

pub const UNKNOWN_KEY: &str = "unknown-citation-key";

/// One warning per reference whose key the bibliography does not know. When
/// the bibliography has keys, the warning carries a fix replacing the key with
/// the closest one.
pub fn check_keys(
    tree: &SyntaxNode,
    input: &str,
    bibliography: &dyn Bibliography,
    config: &Config,
) -> Vec<Diagnostic> {
    let pool = bibliography.keys();
    let mut diagnostics = Vec::new();

    for reference in tree.descendants().filter_map(CiteReference::cast) {
        let key = reference.key();
        if bibliography.contains(&key) {
            continue;
        }

        let Some(key_token) = reference
            .syntax()
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| token.kind() == SyntaxKind::CITATION_KEY)
        else {
            continue;
        };
        let range = key_token.text_range();

        let mut diagnostic = Diagnostic::warning(
            Location::from_range(range, input),
            UNKNOWN_KEY,
            format!("Citation key '{key}' not found in bibliography"),
        );

        let best = suggest_keys(&key, pool.iter().map(String::as_str), &config.ranker)
            .into_iter()
            .next();
        if let Some(best) = best {
            diagnostic = diagnostic.with_fix(Fix {
                message: format!("Replace with '{best}'"),
                edits: vec![TextEdit::replace(range, best)],
            });
        }

        diagnostics.push(diagnostic);
    }

    log::debug!(
        "checked {} citations, {} unknown keys",
        citations_in(tree).len(),
        diagnostics.len()
    );
    diagnostics
}
