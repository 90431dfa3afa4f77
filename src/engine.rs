//! Pure reference-editing computations.
//!
//! Nothing here touches a document. Every function takes value snapshots
//! (see [`crate::citation`]) and returns new values; the document-level glue
//! lives in [`crate::actions`].

pub mod annotation;
pub mod fuzzy;
pub mod identity;
pub mod navigation;
pub mod reorder;
pub mod sort;

pub use annotation::{Annotated, Warning, update_annotation};
pub use fuzzy::{JaroWinkler, KeyRanker, Levenshtein, suggest_keys};
pub use identity::index_of;
pub use navigation::{Motion, goto_end, goto_start, next, previous};
pub use reorder::{Direction, Shifted, shift, swap};
pub use sort::{Order, sort_by_year};
