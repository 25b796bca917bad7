//! Criterion values and the equality capability used to bucket them.
//!
//! # Catch-all equality
//! `CriterionValueComparer` treats two values as equal when their catch-all
//! flags agree OR the inner comparer says the raw values match. All catch-all
//! values hash to `0`. Buckets are resolved on the full hash first (see
//! `ComparerMap`), so concrete values with different hashes never share a
//! bucket even though `equals` reports them equal.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Pluggable equality + hash pair over raw values.
pub trait ValueComparer<V: ?Sized> {
    /// Returns true if `a` and `b` are equal under this comparer.
    fn equals(&self, a: &V, b: &V) -> bool;

    /// Hash consistent with `equals` for values this comparer considers equal.
    fn hash(&self, value: &V) -> u64;
}

/// Comparer delegating to `Eq` and `Hash`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparer;

impl<V: Eq + Hash + ?Sized> ValueComparer<V> for DefaultComparer {
    fn equals(&self, a: &V, b: &V) -> bool {
        a == b
    }

    fn hash(&self, value: &V) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }
}

/// Ordinal string comparison that ignores case.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalIgnoreCase;

impl<V: AsRef<str> + ?Sized> ValueComparer<V> for OrdinalIgnoreCase {
    fn equals(&self, a: &V, b: &V) -> bool {
        let a = a.as_ref().chars().flat_map(char::to_lowercase);
        let b = b.as_ref().chars().flat_map(char::to_lowercase);
        a.eq(b)
    }

    fn hash(&self, value: &V) -> u64 {
        let mut hasher = DefaultHasher::new();
        for c in value.as_ref().chars().flat_map(char::to_lowercase) {
            c.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// A constraint value for one key: concrete, or a catch-all marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionValue<V> {
    value: V,
    is_catch_all: bool,
}

impl<V> CriterionValue<V> {
    pub fn new(value: V, is_catch_all: bool) -> Self {
        Self { value, is_catch_all }
    }

    /// A concrete value that must match.
    pub fn exact(value: V) -> Self {
        Self::new(value, false)
    }

    /// A catch-all. `value` is carried but never compared.
    pub fn catch_all(value: V) -> Self {
        Self::new(value, true)
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn is_catch_all(&self) -> bool {
        self.is_catch_all
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

/// Wraps a raw-value comparer to compare `CriterionValue`s.
pub struct CriterionValueComparer<'a, V: ?Sized> {
    inner: &'a dyn ValueComparer<V>,
}

impl<'a, V: ?Sized> CriterionValueComparer<'a, V> {
    pub fn new(inner: &'a dyn ValueComparer<V>) -> Self {
        Self { inner }
    }

    /// The raw-value comparer this one wraps.
    pub fn inner(&self) -> &'a dyn ValueComparer<V> {
        self.inner
    }
}

impl<V> ValueComparer<CriterionValue<V>> for CriterionValueComparer<'_, V> {
    fn equals(&self, a: &CriterionValue<V>, b: &CriterionValue<V>) -> bool {
        // OR, not AND: matching flags alone make two values equal.
        a.is_catch_all == b.is_catch_all || self.inner.equals(&a.value, &b.value)
    }

    fn hash(&self, value: &CriterionValue<V>) -> u64 {
        if value.is_catch_all {
            0
        } else {
            self.inner.hash(&value.value)
        }
    }
}
