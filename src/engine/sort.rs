use std::cmp::Reverse;

use crate::citation::Reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    Ascending,
    #[default]
    Descending,
}

/// Stable sort of `refs` by publication year.
///
/// `year` looks a key up in the bibliography; keys without a usable year count
/// as year 0, so in descending order they end up after every dated reference.
/// References with equal years keep their relative order.
pub fn sort_by_year<F>(refs: &[Reference], year: F, order: Order) -> Vec<Reference>
where
    F: Fn(&str) -> Option<i32>,
{
    let mut keyed: Vec<(i32, Reference)> = refs
        .iter()
        .map(|r| (year(&r.key).unwrap_or(0), r.clone()))
        .collect();

    match order {
        Order::Ascending => keyed.sort_by_key(|(year, _)| *year),
        Order::Descending => keyed.sort_by_key(|(year, _)| Reverse(*year)),
    }

    keyed.into_iter().map(|(_, r)| r).collect()
}
