//! Syntax kinds and language definition for the citation CST.

use rowan::Language;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    WHITESPACE = 0,
    TEXT,

    // Citation delimiters
    CITE_OPEN,         // [cite
    CITE_STYLE_MARKER, // /
    CITE_STYLE,        // t, p, a/f, ...
    CITE_COLON,        // :
    CITE_CLOSE,        // ]

    // Reference parts
    REFERENCE_PREFIX,   // text before @key
    CITATION_MARKER,    // @
    CITATION_KEY,       // The citation key identifier
    REFERENCE_SUFFIX,   // text after the key
    CITATION_SEPARATOR, // ; between references

    // Composite nodes
    CITATION,      // [cite/style:...]
    CITE_REFERENCE, // prefix @key suffix
    GLOBAL_PREFIX, // common prefix before the first reference
    GLOBAL_SUFFIX, // common suffix after the last reference
    ROOT,
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CiteLanguage {}

impl Language for CiteLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ROOT as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}
