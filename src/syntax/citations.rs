//! Citation and reference AST node wrappers.

use super::ast::support;
use super::{AstNode, SyntaxKind, SyntaxNode};

pub struct Citation(SyntaxNode);

impl AstNode for Citation {
    fn kind() -> SyntaxKind {
        SyntaxKind::CITATION
    }

    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::CITATION
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        if Self::can_cast(syntax.kind()) {
            Some(Self(syntax))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl Citation {
    /// Returns the style token (`t` in `[cite/t:@key]`), if any.
    pub fn style(&self) -> Option<String> {
        support::token(&self.0, SyntaxKind::CITE_STYLE).map(|token| token.text().to_string())
    }

    /// Returns the references in document order.
    pub fn references(&self) -> impl Iterator<Item = CiteReference> + '_ {
        support::children(&self.0)
    }

    pub fn global_prefix(&self) -> Option<GlobalPrefix> {
        support::child(&self.0)
    }

    pub fn global_suffix(&self) -> Option<GlobalSuffix> {
        support::child(&self.0)
    }
}

pub struct CiteReference(SyntaxNode);

impl AstNode for CiteReference {
    fn kind() -> SyntaxKind {
        SyntaxKind::CITE_REFERENCE
    }

    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::CITE_REFERENCE
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        if Self::can_cast(syntax.kind()) {
            Some(Self(syntax))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl CiteReference {
    /// Extracts the citation key (without the `@` marker).
    pub fn key(&self) -> String {
        support::token_text(&self.0, SyntaxKind::CITATION_KEY)
    }

    /// Text before the `@` marker. Empty when the reference has no prefix.
    pub fn prefix(&self) -> String {
        support::token_text(&self.0, SyntaxKind::REFERENCE_PREFIX)
    }

    /// Text after the key. Empty when the reference has no suffix.
    pub fn suffix(&self) -> String {
        support::token_text(&self.0, SyntaxKind::REFERENCE_SUFFIX)
    }
}

pub struct GlobalPrefix(SyntaxNode);

impl AstNode for GlobalPrefix {
    fn kind() -> SyntaxKind {
        SyntaxKind::GLOBAL_PREFIX
    }

    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::GLOBAL_PREFIX
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        if Self::can_cast(syntax.kind()) {
            Some(Self(syntax))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl GlobalPrefix {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

pub struct GlobalSuffix(SyntaxNode);

impl AstNode for GlobalSuffix {
    fn kind() -> SyntaxKind {
        SyntaxKind::GLOBAL_SUFFIX
    }

    fn can_cast(kind: SyntaxKind) -> bool {
        kind == SyntaxKind::GLOBAL_SUFFIX
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        if Self::can_cast(syntax.kind()) {
            Some(Self(syntax))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl GlobalSuffix {
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}
