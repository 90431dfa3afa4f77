//! Prefix/suffix editing for a single reference.
//!
//! Export backends in the natbib family only render a prefix in front of the
//! whole citation and a suffix after it, so a prefix on a later reference or a
//! suffix on an earlier one is flagged. The edit is applied either way.

use std::fmt;

use crate::citation::{Reference, parse_references, serialize_reference, serialize_references};
use crate::error::CiteError;

use super::identity::index_of;

/// Advisory warning; the edit it refers to was still applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    PrefixNotSupported,
    SuffixNotSupported,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrefixNotSupported => write!(f, "prefix not supported here"),
            Self::SuffixNotSupported => write!(f, "suffix not supported here"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    /// The full reference list with the edit applied.
    pub references: Vec<Reference>,
    /// Position of the edited reference.
    pub index: usize,
    /// Serialized form of the edited reference.
    pub text: String,
    pub warnings: Vec<Warning>,
}

/// Replace the prefix and suffix of `target`.
///
/// Empty strings remove the annotation. A non-empty prefix is separated from
/// the key by a space; a suffix gets a leading space unless it starts with
/// punctuation (`, p. 3`).
///
/// Annotation text that would change the structure of the citation once
/// serialized (a `;`, an unbalanced `]`, another `@key`) is rejected with
/// [`CiteError::InvalidAnnotation`].
pub fn update_annotation(
    refs: &[Reference],
    target: &Reference,
    prefix: &str,
    suffix: &str,
) -> Result<Annotated, CiteError> {
    let index = index_of(refs, target).ok_or(CiteError::NotOnReference)?;

    let prefix = normalize_prefix(prefix);
    let suffix = normalize_suffix(suffix);

    let mut warnings = Vec::new();
    if !prefix.is_empty() && index > 0 {
        warnings.push(Warning::PrefixNotSupported);
    }
    if !suffix.is_empty() && index + 1 != refs.len() {
        warnings.push(Warning::SuffixNotSupported);
    }

    let mut references = refs.to_vec();
    let edited = &mut references[index];
    edited.prefix = prefix;
    edited.suffix = suffix;
    let text = serialize_reference(edited);

    if !survives_round_trip(&references) {
        log::debug!("annotation {text:?} does not re-parse as the same reference");
        return Err(CiteError::InvalidAnnotation(text));
    }

    Ok(Annotated {
        references,
        index,
        text,
        warnings,
    })
}

fn survives_round_trip(references: &[Reference]) -> bool {
    let Some(reparsed) = parse_references(&serialize_references(references)) else {
        return false;
    };
    reparsed.len() == references.len()
        && reparsed.iter().zip(references).all(|(a, b)| a.same_as(b))
}

fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim_start();
    if prefix.is_empty() || prefix.ends_with(char::is_whitespace) {
        prefix.to_string()
    } else {
        format!("{prefix} ")
    }
}

fn normalize_suffix(suffix: &str) -> String {
    let suffix = suffix.trim_end();
    match suffix.chars().next() {
        None => String::new(),
        Some(first) if first.is_whitespace() || first.is_ascii_punctuation() => suffix.to_string(),
        Some(_) => format!(" {suffix}"),
    }
}
