//! Builder-side wrapper pairing an item with its criteria.

use crate::tree::classifier::Criteria;

/// An item, its extracted criteria and its position in the input.
///
/// `index` is dense over the input, so per-level bookkeeping can use a flat
/// bitmap instead of identity hashing.
#[derive(Debug)]
pub struct ItemDescriptor<'a, T, V> {
    pub item: &'a T,
    pub index: usize,
    pub criteria: Criteria<V>,
}

impl<'a, T, V> ItemDescriptor<'a, T, V> {
    pub fn new(item: &'a T, index: usize, criteria: Criteria<V>) -> Self {
        Self { item, index, criteria }
    }
}
