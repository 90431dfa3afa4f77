//! Citation parsing for org-cite citations.
//!
//! Syntax:
//! - Single reference: `[cite:@doe99]`
//! - Multiple references: `[cite:@doe99; @smith2000]`
//! - Style: `[cite/t:@doe99]`, `[cite/a/f:@doe99]`
//! - Annotations: `[cite:see @doe99, pp. 33-35]`
//! - Common prefix/suffix: `[cite:See; @doe99; @smith2000; and others]`

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

/// A citation recognized at the start of some text.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedCitation<'a> {
    /// Length of the whole construct, including the closing bracket.
    pub len: usize,
    pub style: Option<&'a str>,
    pub segments: Vec<Segment<'a>>,
}

/// One `;`-separated piece of the citation body.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub leading: &'a str,
    pub body: SegmentBody<'a>,
    pub trailing: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SegmentBody<'a> {
    Reference {
        prefix: &'a str,
        key: &'a str,
        suffix: &'a str,
    },
    /// Keyless text; only valid as the first (common prefix) or last (common
    /// suffix) segment.
    Text(&'a str),
}

/// Try to parse a citation starting at the current position.
///
/// Returns `None` when the text does not start with a well-formed citation;
/// the caller then treats it as plain text.
pub(crate) fn try_parse_citation(text: &str) -> Option<ParsedCitation<'_>> {
    let rest = text.strip_prefix("[cite")?;
    let mut pos = "[cite".len();

    let mut style = None;
    if let Some(after_slash) = rest.strip_prefix('/') {
        let style_len = after_slash.bytes().take_while(|&b| is_style_byte(b)).count();
        if style_len == 0 {
            return None;
        }
        style = Some(&after_slash[..style_len]);
        pos += 1 + style_len;
    }

    if text.as_bytes().get(pos) != Some(&b':') {
        return None;
    }
    pos += 1;

    let body_len = find_closing_bracket(&text[pos..])?;
    let segments = parse_segments(&text[pos..pos + body_len])?;

    Some(ParsedCitation {
        len: pos + body_len + 1,
        style,
        segments,
    })
}

fn is_style_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'/' | b'-' | b'_')
}

pub(crate) fn is_valid_style(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(is_style_byte)
}

/// Find the `]` closing the citation body. Nested brackets must balance and
/// the body may not contain a blank line.
fn find_closing_bracket(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut pos = 0;
    let mut depth = 0usize;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                // Skip escaped character
                pos += 2;
                continue;
            }
            b'[' => depth += 1,
            b']' => {
                if depth == 0 {
                    return Some(pos);
                }
                depth -= 1;
            }
            b'\n' if bytes.get(pos + 1) == Some(&b'\n') => return None,
            _ => {}
        }
        pos += 1;
    }

    None
}

/// Split the body on top-level `;` and classify every segment.
fn parse_segments(body: &str) -> Option<Vec<Segment<'_>>> {
    let raw_segments = split_top_level(body);
    let last = raw_segments.len() - 1;
    let mut segments = Vec::with_capacity(raw_segments.len());
    let mut reference_count = 0;

    for (index, raw) in raw_segments.into_iter().enumerate() {
        let trimmed_start = raw.trim_start();
        let leading = &raw[..raw.len() - trimmed_start.len()];
        let core = trimmed_start.trim_end();
        let trailing = &trimmed_start[core.len()..];

        let body = match find_reference(core) {
            Some((at, key_len)) => {
                reference_count += 1;
                SegmentBody::Reference {
                    prefix: &core[..at],
                    key: &core[at + 1..at + 1 + key_len],
                    suffix: &core[at + 1 + key_len..],
                }
            }
            None => {
                if core.is_empty() || (index != 0 && index != last) {
                    return None;
                }
                SegmentBody::Text(core)
            }
        };

        segments.push(Segment {
            leading,
            body,
            trailing,
        });
    }

    if reference_count == 0 {
        return None;
    }

    Some(segments)
}

fn split_top_level(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    let mut depth = 0usize;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                pos += 2;
                continue;
            }
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => {
                parts.push(&body[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
        pos += 1;
    }

    parts.push(&body[start.min(body.len())..]);
    parts
}

/// Locate the first `@` that is followed by a valid key.
/// Returns `(marker offset, key length)`.
fn find_reference(segment: &str) -> Option<(usize, usize)> {
    segment
        .match_indices('@')
        .find_map(|(at, _)| parse_citation_key(&segment[at + 1..]).map(|len| (at, len)))
}

/// Parse a citation key.
/// Returns the length of the key in bytes, or None if invalid.
///
/// Citation keys:
/// - Must start with a letter, digit, or _
/// - Can contain alphanumerics and single internal punctuation: :.#$%&-+?<>~/
/// - Double internal punctuation terminates the key
/// - Trailing punctuation is not included
pub(crate) fn parse_citation_key(text: &str) -> Option<usize> {
    let mut chars = text.char_indices();

    let (_, first) = chars.next()?;
    if !first.is_alphanumeric() && first != '_' {
        return None;
    }

    let mut end = first.len_utf8();
    let mut prev_was_punct = false;

    for (pos, ch) in chars {
        if ch.is_alphanumeric() || ch == '_' {
            prev_was_punct = false;
        } else if is_internal_punctuation(ch) {
            if prev_was_punct {
                // Double punctuation - terminate key before the first one
                end = pos - 1;
                break;
            }
            prev_was_punct = true;
        } else {
            break;
        }
        end = pos + ch.len_utf8();
    }

    // Remove trailing punctuation
    while end > 0 && text[..end].ends_with(is_internal_punctuation) {
        end -= 1;
    }

    if end == 0 { None } else { Some(end) }
}

/// Check if a character is valid internal punctuation in citation keys.
fn is_internal_punctuation(ch: char) -> bool {
    matches!(
        ch,
        ':' | '.' | '#' | '$' | '%' | '&' | '-' | '+' | '?' | '<' | '>' | '~' | '/'
    )
}

/// Emit a citation node to the builder.
pub(crate) fn emit_citation(builder: &mut GreenNodeBuilder, citation: &ParsedCitation) {
    builder.start_node(SyntaxKind::CITATION.into());

    builder.token(SyntaxKind::CITE_OPEN.into(), "[cite");
    if let Some(style) = citation.style {
        builder.token(SyntaxKind::CITE_STYLE_MARKER.into(), "/");
        builder.token(SyntaxKind::CITE_STYLE.into(), style);
    }
    builder.token(SyntaxKind::CITE_COLON.into(), ":");

    for (index, segment) in citation.segments.iter().enumerate() {
        if index > 0 {
            builder.token(SyntaxKind::CITATION_SEPARATOR.into(), ";");
        }
        emit_whitespace(builder, segment.leading);

        match segment.body {
            SegmentBody::Reference {
                prefix,
                key,
                suffix,
            } => emit_reference(builder, prefix, key, suffix),
            SegmentBody::Text(text) => {
                let kind = if index == 0 {
                    SyntaxKind::GLOBAL_PREFIX
                } else {
                    SyntaxKind::GLOBAL_SUFFIX
                };
                builder.start_node(kind.into());
                builder.token(SyntaxKind::TEXT.into(), text);
                builder.finish_node();
            }
        }

        emit_whitespace(builder, segment.trailing);
    }

    builder.token(SyntaxKind::CITE_CLOSE.into(), "]");
    builder.finish_node();
}

fn emit_reference(builder: &mut GreenNodeBuilder, prefix: &str, key: &str, suffix: &str) {
    builder.start_node(SyntaxKind::CITE_REFERENCE.into());
    if !prefix.is_empty() {
        builder.token(SyntaxKind::REFERENCE_PREFIX.into(), prefix);
    }
    builder.token(SyntaxKind::CITATION_MARKER.into(), "@");
    builder.token(SyntaxKind::CITATION_KEY.into(), key);
    if !suffix.is_empty() {
        builder.token(SyntaxKind::REFERENCE_SUFFIX.into(), suffix);
    }
    builder.finish_node();
}

fn emit_whitespace(builder: &mut GreenNodeBuilder, text: &str) {
    if !text.is_empty() {
        builder.token(SyntaxKind::WHITESPACE.into(), text);
    }
}
