use crate::citation::serialize_reference;
use crate::edit::TextEdit;
use crate::engine;
use crate::error::CiteError;

use super::{Context, Outcome, reference_begin};

/// Remove the reference at point. Removing the only reference removes the
/// whole citation.
pub fn delete_reference(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let citation = located.citation();
    let (index, _) = located.require_reference()?;

    if citation.references.len() == 1 {
        log::debug!("deleting citation at {}", citation.begin());
        return Ok(Outcome::edited(
            TextEdit::delete(citation.range),
            citation.begin(),
        ));
    }

    let mut references = citation.references.clone();
    references.remove(index);
    let focus = index.min(references.len() - 1);

    let (edit, text) = ctx.replace_citation(citation, &citation.with_references(references));
    let cursor = reference_begin(&text, citation.begin(), focus).unwrap_or(citation.begin());

    Ok(Outcome::edited(edit, cursor))
}

/// Delete the reference at point and return its text.
pub fn kill_reference(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let (_, reference) = located.require_reference()?;
    let killed = serialize_reference(reference);

    let mut outcome = delete_reference(ctx)?;
    outcome.text = Some(killed);
    Ok(outcome)
}

/// Return the text of the reference at point without editing.
pub fn copy_reference(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let (_, reference) = located.require_reference()?;

    let mut outcome = ctx.unchanged();
    outcome.text = Some(serialize_reference(reference));
    Ok(outcome)
}

/// Select the reference at point, leaving the cursor at its end.
pub fn mark_reference(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let (_, reference) = located.require_reference()?;

    let mut outcome = Outcome::at(reference.end());
    outcome.selection = Some(reference.range);
    Ok(outcome)
}

/// Replace the prefix and suffix of the reference at point.
pub fn update_annotation(ctx: &Context, prefix: &str, suffix: &str) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let citation = located.citation();
    let (_, reference) = located.require_reference()?;

    let annotated = engine::update_annotation(&citation.references, reference, prefix, suffix)?;
    for warning in &annotated.warnings {
        log::debug!("{warning}");
    }

    let (edit, text) =
        ctx.replace_citation(citation, &citation.with_references(annotated.references));
    let cursor = reference_begin(&text, citation.begin(), annotated.index)
        .ok_or(CiteError::NotFoundAfterReorder)?;

    let mut outcome = Outcome::edited(edit, cursor);
    outcome.warnings = annotated.warnings;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::Warning;

    const DOC: &str = "x [cite/t:@a; see @b; @c, p. 1] y";

    fn at(needle: &str) -> usize {
        DOC.find(needle).unwrap()
    }

    #[test]
    fn test_delete_middle_reference() {
        let config = Config::default();
        let ctx = Context::new(DOC, at("@b"), &config);
        let outcome = delete_reference(&ctx).unwrap();
        let text = outcome.apply(DOC);
        assert_eq!(text, "x [cite/t:@a; @c, p. 1] y");
        assert_eq!(&text[outcome.cursor..outcome.cursor + 2], "@c");
    }

    #[test]
    fn test_delete_last_reference_moves_to_previous() {
        let config = Config::default();
        let ctx = Context::new(DOC, at("@c"), &config);
        let outcome = delete_reference(&ctx).unwrap();
        let text = outcome.apply(DOC);
        assert_eq!(text, "x [cite/t:@a; see @b] y");
        assert_eq!(&text[outcome.cursor..outcome.cursor + 6], "see @b");
    }

    #[test]
    fn test_delete_only_reference_removes_citation() {
        let config = Config::default();
        let doc = "a [cite:@only] b";
        let ctx = Context::new(doc, 9, &config);
        let outcome = delete_reference(&ctx).unwrap();
        assert_eq!(outcome.apply(doc), "a  b");
        assert_eq!(outcome.cursor, 2);
    }

    #[test]
    fn test_delete_requires_reference() {
        let config = Config::default();
        let ctx = Context::new(DOC, at("[cite"), &config);
        assert_eq!(delete_reference(&ctx), Err(CiteError::NotOnReference));
    }

    #[test]
    fn test_kill_returns_text() {
        let config = Config::default();
        let ctx = Context::new(DOC, at("@c"), &config);
        let outcome = kill_reference(&ctx).unwrap();
        assert_eq!(outcome.text.as_deref(), Some("@c, p. 1"));
        assert!(outcome.edit.is_some());
    }

    #[test]
    fn test_copy_does_not_edit() {
        let config = Config::default();
        let ctx = Context::new(DOC, at("@b"), &config);
        let outcome = copy_reference(&ctx).unwrap();
        assert_eq!(outcome.text.as_deref(), Some("see @b"));
        assert!(outcome.edit.is_none());
        assert_eq!(outcome.cursor, at("@b"));
    }

    #[test]
    fn test_mark_selects_reference() {
        let config = Config::default();
        let ctx = Context::new(DOC, at("@b"), &config);
        let outcome = mark_reference(&ctx).unwrap();
        let range = outcome.selection.unwrap();
        assert_eq!(&DOC[range], "see @b");
        assert_eq!(outcome.cursor, usize::from(range.end()));
    }

    #[test]
    fn test_annotation_with_warning() {
        let config = Config::default();
        let ctx = Context::new(DOC, at("@c"), &config);
        let outcome = update_annotation(&ctx, "cf.", "").unwrap();
        assert_eq!(outcome.warnings, vec![Warning::PrefixNotSupported]);
        let text = outcome.apply(DOC);
        assert_eq!(text, "x [cite/t:@a; see @b; cf. @c] y");
        assert_eq!(&text[outcome.cursor..outcome.cursor + 6], "cf. @c");
    }

    #[test]
    fn test_annotation_that_breaks_citation_is_refused() {
        let config = Config::default();
        let doc = "x [cite:@a; @b; @c] y";
        let on = |needle: &str| doc.find(needle).unwrap();

        for (offset, prefix, suffix) in [
            (on("@c"), "", "; ch. 2"),
            (on("@b"), "", ", [p.] 3]"),
            (on("@a"), "cf. @smith and", ""),
        ] {
            let ctx = Context::new(doc, offset, &config);
            assert!(
                matches!(
                    update_annotation(&ctx, prefix, suffix),
                    Err(CiteError::InvalidAnnotation(_))
                ),
                "prefix {prefix:?} suffix {suffix:?} should be refused"
            );
        }
    }
}
