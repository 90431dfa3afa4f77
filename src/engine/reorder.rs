//! Moving a reference one slot left or right inside its citation.

use crate::citation::{Reference, parse_references, serialize_references};
use crate::error::CiteError;

use super::identity::index_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Result of a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shifted {
    /// References re-derived from the serialized, reordered list.
    pub references: Vec<Reference>,
    /// Where the shifted reference ended up.
    pub focus: usize,
    /// False when the reference was already at the boundary in the requested
    /// direction and nothing changed.
    pub moved: bool,
}

/// Swap two references in place.
pub fn swap(refs: &mut [Reference], i: usize, j: usize) -> Result<(), CiteError> {
    let len = refs.len();
    for index in [i, j] {
        if index >= len {
            return Err(CiteError::IndexOutOfRange { index, len });
        }
    }
    refs.swap(i, j);
    Ok(())
}

/// Shift `current` one position in `direction`.
///
/// Shifting left at the first position and right at the last position are
/// no-ops. After the swap the list is serialized and parsed again, and the
/// moved reference is looked up by content to report its new index.
pub fn shift(
    direction: Direction,
    refs: &[Reference],
    current: Option<&Reference>,
) -> Result<Shifted, CiteError> {
    if refs.len() == 1 {
        return Err(CiteError::SingleReference);
    }

    let index = current
        .and_then(|current| index_of(refs, current))
        .ok_or(CiteError::NothingToShift)?;

    let target = match direction {
        Direction::Left => index.checked_sub(1),
        Direction::Right => Some(index + 1).filter(|&next| next < refs.len()),
    };

    let Some(target) = target else {
        log::debug!("reference {index} already at the {direction:?} boundary");
        return Ok(Shifted {
            references: refs.to_vec(),
            focus: index,
            moved: false,
        });
    };

    let mut swapped = refs.to_vec();
    swap(&mut swapped, index, target)?;

    let serialized = serialize_references(&swapped);
    let references = parse_references(&serialized).ok_or(CiteError::NotFoundAfterReorder)?;
    let focus = current
        .and_then(|current| index_of(&references, current))
        .ok_or(CiteError::NotFoundAfterReorder)?;

    Ok(Shifted {
        references,
        focus,
        moved: true,
    })
}
