//! The classifier capability: how the builder learns an item's constraints.

use indexmap::IndexMap;

use crate::tree::key::CriterionKey;
use crate::tree::value::{CriterionValue, ValueComparer};

/// Constraints extracted from one item, keyed case-insensitively.
///
/// Iteration follows insertion order, which breaks ties between equally
/// populated keys when the builder orders branches.
pub type Criteria<V> = IndexMap<CriterionKey, CriterionValue<V>>;

/// Turns candidate items into criteria for tree construction.
///
/// A missing key means the item places no constraint on that dimension.
/// Implementations must be deterministic: classifying the same item twice
/// yields equal maps.
pub trait Classifier<T, V> {
    /// Extract the constraints for `item`.
    fn criteria(&self, item: &T) -> Criteria<V>;

    /// Equality over raw criterion values, used for bucketing and lookups.
    fn value_comparer(&self) -> &dyn ValueComparer<V>;
}

impl<T, V, C: Classifier<T, V> + ?Sized> Classifier<T, V> for &C {
    fn criteria(&self, item: &T) -> Criteria<V> {
        (**self).criteria(item)
    }

    fn value_comparer(&self) -> &dyn ValueComparer<V> {
        (**self).value_comparer()
    }
}
