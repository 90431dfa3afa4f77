use crate::bibliography::Bibliography;
use crate::engine::{self, Direction, Order};
use crate::error::CiteError;

use super::{Context, Outcome, reference_begin, refocus};

pub fn shift_left(ctx: &Context) -> Result<Outcome, CiteError> {
    shift(ctx, Direction::Left)
}

pub fn shift_right(ctx: &Context) -> Result<Outcome, CiteError> {
    shift(ctx, Direction::Right)
}

fn shift(ctx: &Context, direction: Direction) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let citation = located.citation();

    let shifted = engine::shift(direction, &citation.references, located.reference())?;
    if !shifted.moved {
        return Ok(ctx.unchanged());
    }

    let (edit, text) = ctx.replace_citation(citation, &citation.with_references(shifted.references));
    let cursor = reference_begin(&text, citation.begin(), shifted.focus)
        .ok_or(CiteError::NotFoundAfterReorder)?;

    Ok(Outcome::edited(edit, cursor))
}

/// Sort the references of the citation at point by year. The cursor stays on
/// the reference it was on.
pub fn sort_by_year(
    ctx: &Context,
    bibliography: &dyn Bibliography,
    order: Order,
) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let citation = located.citation();

    let sorted = engine::sort_by_year(&citation.references, |key| bibliography.year(key), order);
    let unchanged = sorted
        .iter()
        .zip(&citation.references)
        .all(|(a, b)| a.same_as(b));
    if unchanged {
        log::debug!("citation already sorted");
        return Ok(ctx.unchanged());
    }

    let (edit, text) = ctx.replace_citation(citation, &citation.with_references(sorted));
    let cursor = located
        .reference()
        .and_then(|reference| refocus(&text, citation.begin(), reference))
        .unwrap_or(citation.begin());

    Ok(Outcome::edited(edit, cursor))
}
