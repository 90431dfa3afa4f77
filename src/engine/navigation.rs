//! Cursor motion between references and citation boundaries.
//!
//! Every function takes the citations of the document in order, the index of
//! the citation at point, and the index of the reference at point if the
//! cursor is on one. Offsets are byte offsets into the document.

use crate::citation::{CitationData, Reference};

/// Where the cursor should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// No movement: there is nothing further in that direction.
    Stay,
    Goto(usize),
    /// Already on the boundary; fall back to a line-boundary motion.
    LineStart,
    LineEnd,
}

/// Motion to the next reference.
///
/// Off any reference (style marker, separators, common prefix) this goes to
/// the first reference. From the last reference it continues into the next
/// citation of the document.
pub fn next(citations: &[CitationData], current: usize, reference: Option<usize>) -> Motion {
    let Some(citation) = citations.get(current) else {
        return Motion::Stay;
    };
    let refs = &citation.references;

    match reference {
        None => goto_begin(refs.first()),
        Some(index) if index + 1 >= refs.len() => {
            goto_begin(citations.get(current + 1).and_then(|c| c.references.first()))
        }
        Some(index) => goto_begin(refs.get((index + 1).min(refs.len() - 1))),
    }
}

/// Motion to the previous reference.
///
/// From the first reference, or from anywhere in the citation that is not a
/// reference, this goes to the last reference of the previous citation.
pub fn previous(citations: &[CitationData], current: usize, reference: Option<usize>) -> Motion {
    let Some(citation) = citations.get(current) else {
        return Motion::Stay;
    };

    match reference {
        Some(index) if index > 0 => goto_begin(citation.references.get(index - 1)),
        _ => goto_begin(
            current
                .checked_sub(1)
                .and_then(|prev| citations.get(prev))
                .and_then(|c| c.references.last()),
        ),
    }
}

pub fn goto_start(citation: &CitationData, offset: usize) -> Motion {
    if offset == citation.begin() {
        Motion::LineStart
    } else {
        Motion::Goto(citation.begin())
    }
}

/// The citation node never owns trailing blanks, so its end is the offset
/// just past the closing bracket.
pub fn goto_end(citation: &CitationData, offset: usize) -> Motion {
    if offset == citation.end() {
        Motion::LineEnd
    } else {
        Motion::Goto(citation.end())
    }
}

fn goto_begin(reference: Option<&Reference>) -> Motion {
    reference.map_or(Motion::Stay, |r| Motion::Goto(r.begin()))
}
