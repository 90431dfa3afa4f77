use crate::engine::{self, Motion};
use crate::error::CiteError;

use super::{Context, Outcome, line_end, line_start};

fn resolve(ctx: &Context, motion: Motion) -> Outcome {
    let cursor = match motion {
        Motion::Stay => ctx.offset,
        Motion::Goto(offset) => offset,
        Motion::LineStart => line_start(ctx.text, ctx.offset),
        Motion::LineEnd => line_end(ctx.text, ctx.offset),
    };
    log::debug!("{motion:?} from {} to {cursor}", ctx.offset);
    Outcome::at(cursor)
}

pub fn next_reference(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let motion = engine::next(&located.citations, located.current, located.reference);
    Ok(resolve(ctx, motion))
}

pub fn previous_reference(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    let motion = engine::previous(&located.citations, located.current, located.reference);
    Ok(resolve(ctx, motion))
}

pub fn goto_citation_start(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    Ok(resolve(ctx, engine::goto_start(located.citation(), ctx.offset)))
}

pub fn goto_citation_end(ctx: &Context) -> Result<Outcome, CiteError> {
    let located = ctx.locate()?;
    Ok(resolve(ctx, engine::goto_end(located.citation(), ctx.offset)))
}
