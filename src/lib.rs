pub mod actions;
pub mod bibliography;
pub mod check;
pub mod citation;
pub mod config;
pub mod diagnostics;
pub mod edit;
pub mod engine;
pub mod error;
pub mod parser;
pub mod select;
pub mod styles;
pub mod syntax;

pub use actions::{Context, Outcome};
pub use bibliography::{Bibliography, BibtexIndex};
pub use citation::{CitationData, Reference};
pub use config::Config;
pub use config::ConfigBuilder;
pub use edit::TextEdit;
pub use error::{BibliographyError, CiteError};
pub use parser::parse;
pub use styles::StyleTable;
pub use syntax::SyntaxNode;

/// Parse `input` and return every citation in document order.
///
/// # Examples
///
/// ```rust
/// let citations = citedit::citations("See [cite/t:@doe99; @roe2001, p. 5].");
/// assert_eq!(citations[0].references[1].suffix, ", p. 5");
/// ```
pub fn citations(input: &str) -> Vec<CitationData> {
    citation::citations_in(&parse(input))
}
