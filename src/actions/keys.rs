use rowan::TextSize;

use crate::bibliography::Bibliography;
use crate::citation::{Reference, is_valid_key, serialize_citation};
use crate::config::{CandidateAnnotation, Config};
use crate::edit::TextEdit;
use crate::engine::suggest_keys;
use crate::error::CiteError;
use crate::select::Selector;

use super::{Context, Outcome, reference_begin};

/// How many keys a completion may insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Single,
    Multiple,
}

/// A completion candidate with its display annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub annotation: Option<String>,
}

/// Every bibliography key, annotated as configured.
pub fn key_candidates(bibliography: &dyn Bibliography, config: &Config) -> Vec<Candidate> {
    bibliography
        .keys()
        .into_iter()
        .map(|key| {
            let annotation = match config.candidate_annotation {
                CandidateAnnotation::None => None,
                CandidateAnnotation::Year => bibliography.year(&key).map(|y| y.to_string()),
                CandidateAnnotation::Title => bibliography.title(&key),
            };
            Candidate { key, annotation }
        })
        .collect()
}

/// Rank the bibliography against the key at point and replace the key with
/// the selected suggestion. Prefix and suffix are kept.
pub fn replace_key_with_suggestion(
    ctx: &Context,
    bibliography: &dyn Bibliography,
    selector: &mut dyn Selector,
) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let citation = located.citation();
    let (index, reference) = located.require_reference()?;

    let pool = bibliography.keys();
    let mut suggestions = suggest_keys(
        &reference.key,
        pool.iter().map(String::as_str),
        &ctx.config.ranker,
    );
    suggestions.truncate(ctx.config.max_suggestions);

    let prompt = format!("Replace {}", reference.key);
    let key = selector
        .select_one(&prompt, &suggestions)
        .filter(|key| !key.is_empty())
        .ok_or(CiteError::NoSelection)?;
    if !is_valid_key(&key) {
        return Err(CiteError::InvalidKey(key));
    }

    let mut references = citation.references.clone();
    references[index].key = key;

    let (edit, text) = ctx.replace_citation(citation, &citation.with_references(references));
    let cursor = reference_begin(&text, citation.begin(), index).unwrap_or(citation.begin());
    Ok(Outcome::edited(edit, cursor))
}

/// Prompt for one or more bibliography keys and insert them at point.
pub fn complete_key(
    ctx: &Context,
    bibliography: &dyn Bibliography,
    selector: &mut dyn Selector,
    mode: Completion,
) -> Result<Outcome, CiteError> {
    let candidates = bibliography.keys();
    let keys = match mode {
        Completion::Single => selector
            .select_one("Key", &candidates)
            .into_iter()
            .collect(),
        Completion::Multiple => selector.select_many("Keys", &candidates),
    };

    insert_keys(ctx, &keys)
}

/// Insert references for `keys` at point.
///
/// On a reference the new references go right after it; elsewhere in a
/// citation they are appended; outside any citation a new citation is
/// inserted. The cursor lands on the first inserted reference.
pub fn insert_keys(ctx: &Context, keys: &[String]) -> Result<Outcome, CiteError> {
    if keys.is_empty() {
        return Err(CiteError::NoSelection);
    }
    if let Some(bad) = keys.iter().find(|key| !is_valid_key(key)) {
        return Err(CiteError::InvalidKey(bad.clone()));
    }
    let inserted: Vec<Reference> = keys.iter().map(Reference::new).collect();

    let located = match ctx.locate() {
        Ok(located) => located,
        Err(CiteError::NotOnCitation) => {
            let at = TextSize::try_from(ctx.offset)
                .map_err(|_| CiteError::OffsetOutOfRange(ctx.offset))?;
            let citation = serialize_citation(None, None, &inserted, None);
            let cursor = ctx.offset + "[cite:".len();
            log::debug!("inserting new citation at {}", ctx.offset);
            return Ok(Outcome::edited(TextEdit::insert(at, citation), cursor));
        }
        Err(err) => return Err(err),
    };

    let citation = located.citation();
    let at = located
        .reference
        .map_or(citation.references.len(), |index| index + 1);

    let mut references = citation.references.clone();
    references.splice(at..at, inserted);

    let (edit, text) = ctx.replace_citation(citation, &citation.with_references(references));
    let cursor = reference_begin(&text, citation.begin(), at).unwrap_or(citation.begin());
    Ok(Outcome::edited(edit, cursor))
}
