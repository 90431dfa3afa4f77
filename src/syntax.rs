//! Lossless syntax tree for documents containing org-cite citations.
//!
//! The tree is a rowan CST: every byte of the input is owned by exactly one
//! token, so `tree.text() == input` always holds. Typed wrappers in
//! [`citations`] give structured access to citation and reference nodes.

mod ast;
mod citations;
mod kind;

pub use ast::AstNode;
pub use citations::{Citation, CiteReference, GlobalPrefix, GlobalSuffix};
pub use kind::{CiteLanguage, SyntaxKind};

pub type SyntaxNode = rowan::SyntaxNode<CiteLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CiteLanguage>;
