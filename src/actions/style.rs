use crate::error::CiteError;
use crate::parser::is_valid_style;
use crate::select::Selector;

use super::{Context, Outcome, refocus};

/// Set the style of the citation at point. `None` or an empty token removes
/// the style marker.
pub fn update_style(ctx: &Context, style: Option<&str>) -> Result<Outcome, CiteError> {
    if let Some(token) = style.filter(|t| !t.is_empty())
        && !is_valid_style(token)
    {
        return Err(CiteError::InvalidStyle(token.to_string()));
    }

    let located = ctx.locate()?;
    let citation = located.citation();
    let updated = citation.with_style(style);
    if updated.style == citation.style {
        return Ok(ctx.unchanged());
    }

    log::debug!(
        "restyling citation at {} to {:?} ({})",
        citation.begin(),
        updated.style,
        ctx.config
            .style_table()
            .resolve_command(updated.style.as_deref())
    );

    let (edit, text) = ctx.replace_citation(citation, &updated);
    let cursor = located
        .reference()
        .and_then(|reference| refocus(&text, citation.begin(), reference))
        .unwrap_or(citation.begin());

    Ok(Outcome::edited(edit, cursor))
}

/// Offer the configured style table and apply the chosen token.
pub fn select_style(ctx: &Context, selector: &mut dyn Selector) -> Result<Outcome, CiteError> {
    ctx.locate()?;

    let tokens = ctx.config.style_table().tokens();
    let choice = selector
        .select_one("Style", &tokens)
        .ok_or(CiteError::NoSelection)?;

    update_style(ctx, Some(&choice))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigBuilder};
    use crate::select::Preselected;

    const DOC: &str = "As [cite:see @a; @b] shows.";

    #[test]
    fn test_update_style_adds_marker() {
        let config = Config::default();
        let offset = DOC.find("@b").unwrap();
        let ctx = Context::new(DOC, offset, &config);
        let outcome = update_style(&ctx, Some("t")).unwrap();
        let text = outcome.apply(DOC);
        assert_eq!(text, "As [cite/t:see @a; @b] shows.");
        assert_eq!(&text[outcome.cursor..outcome.cursor + 2], "@b");
    }

    #[test]
    fn test_update_style_removes_marker() {
        let config = Config::default();
        let doc = "[cite/p/b:@a]";
        let ctx = Context::new(doc, 2, &config);
        let outcome = update_style(&ctx, None).unwrap();
        assert_eq!(outcome.apply(doc), "[cite:@a]");
        assert_eq!(outcome.cursor, 0);
    }

    #[test]
    fn test_update_style_same_style_is_noop() {
        let config = Config::default();
        let doc = "[cite/t:@a]";
        let ctx = Context::new(doc, 9, &config);
        let outcome = update_style(&ctx, Some("t")).unwrap();
        assert!(outcome.edit.is_none());
        assert_eq!(outcome.cursor, 9);
    }

    #[test]
    fn test_update_style_rejects_invalid_token() {
        let config = Config::default();
        let ctx = Context::new(DOC, 5, &config);
        assert_eq!(
            update_style(&ctx, Some("t:x")),
            Err(CiteError::InvalidStyle("t:x".to_string()))
        );
    }

    #[test]
    fn test_select_style_uses_configured_table() {
        let config = ConfigBuilder::default().style("footnote", "\\footcite").build();
        let ctx = Context::new(DOC, 5, &config);

        let mut selector = Preselected(vec!["footnote".to_string()]);
        let outcome = select_style(&ctx, &mut selector).unwrap();
        assert_eq!(outcome.apply(DOC), "As [cite/footnote:see @a; @b] shows.");

        let mut unknown = Preselected(vec!["not-a-style".to_string()]);
        assert_eq!(select_style(&ctx, &mut unknown), Err(CiteError::NoSelection));
    }
}
