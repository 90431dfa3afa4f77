//! Errors surfaced to the user by editing actions.

use std::path::PathBuf;

use thiserror::Error;

/// A user-facing abort. No edit is produced when an action returns one of
/// these; the message is meant to be shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CiteError {
    #[error("only one reference, cannot shift")]
    SingleReference,

    #[error("nothing to shift here")]
    NothingToShift,

    #[error("not on a citation")]
    NotOnCitation,

    #[error("not on a citation reference")]
    NotOnReference,

    #[error("nothing found after reorder")]
    NotFoundAfterReorder,

    #[error("no key selected")]
    NoSelection,

    #[error("invalid citation key '{0}'")]
    InvalidKey(String),

    #[error("invalid citation style '{0}'")]
    InvalidStyle(String),

    #[error("annotation would change the citation: '{0}'")]
    InvalidAnnotation(String),

    #[error("offset {0} is outside the document")]
    OffsetOutOfRange(usize),

    #[error("reference index {index} out of range for {len} references")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure to load a bibliography database.
#[derive(Debug, Error)]
pub enum BibliographyError {
    #[error("failed to read bibliography {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse bibliography {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}
