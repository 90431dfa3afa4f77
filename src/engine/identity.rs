use crate::citation::Reference;

/// Position of the first reference structurally equal to `target`.
///
/// Offsets change after every edit, so references are found again by their
/// `(key, prefix, suffix)` content. When the same triple occurs twice the
/// first occurrence wins, which may not be the one the caller had in mind.
pub fn index_of(refs: &[Reference], target: &Reference) -> Option<usize> {
    refs.iter().position(|r| r.same_as(target))
}
