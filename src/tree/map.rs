//! Insertion-ordered map keyed through a caller-supplied `ValueComparer`.
//!
//! Keys need neither `Eq` nor `Hash`: the comparer supplies both at every
//! call. An entry matches only when the full 64-bit hashes agree and then
//! `equals` agrees, mirroring hash tables that compare stored hash codes
//! before invoking the equality delegate.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::tree::value::ValueComparer;

struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

/// Map with pluggable key equality, iterated in insertion order.
pub struct ComparerMap<K, V> {
    entries: Vec<Entry<K, V>>,
    buckets: HashMap<u64, Vec<usize>>,
}

impl<K, V> ComparerMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find<C>(&self, hash: u64, key: &K, comparer: &C) -> Option<usize>
    where
        C: ValueComparer<K> + ?Sized,
    {
        self.buckets.get(&hash)?.iter().copied().find(|&i| {
            let entry = &self.entries[i];
            entry.hash == hash && comparer.equals(&entry.key, key)
        })
    }

    /// Look up `key` under `comparer`.
    pub fn get<C>(&self, key: &K, comparer: &C) -> Option<&V>
    where
        C: ValueComparer<K> + ?Sized,
    {
        let hash = comparer.hash(key);
        self.find(hash, key, comparer).map(|i| &self.entries[i].value)
    }

    /// Return the value for `key`, inserting `f()` first if absent.
    ///
    /// When an equal key already exists the stored key is kept and `key` is
    /// dropped.
    pub fn get_or_insert_with<C, F>(&mut self, key: K, comparer: &C, f: F) -> &mut V
    where
        C: ValueComparer<K> + ?Sized,
        F: FnOnce() -> V,
    {
        let hash = comparer.hash(&key);
        let index = match self.find(hash, &key, comparer) {
            Some(i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push(Entry { hash, key, value: f() });
                self.buckets.entry(hash).or_default().push(i);
                i
            }
        };
        &mut self.entries[index].value
    }

    /// Insert or replace. Returns the previous value for an equal key.
    pub fn insert<C>(&mut self, key: K, value: V, comparer: &C) -> Option<V>
    where
        C: ValueComparer<K> + ?Sized,
    {
        let hash = comparer.hash(&key);
        match self.find(hash, &key, comparer) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].value, value)),
            None => {
                self.buckets.entry(hash).or_default().push(self.entries.len());
                self.entries.push(Entry { hash, key, value });
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|e| (&e.key, &e.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|e| &e.value)
    }

    /// Consume the map, yielding entries in insertion order.
    pub fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.entries.into_iter().map(|e| (e.key, e.value))
    }
}

impl<K, V> Default for ComparerMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ComparerMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Serialize, V: Serialize> Serialize for ComparerMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::value::{CriterionValue, CriterionValueComparer, OrdinalIgnoreCase};

    /// Every value lands in the same hash bucket.
    struct Colliding;

    impl ValueComparer<u32> for Colliding {
        fn equals(&self, a: &u32, b: &u32) -> bool {
            a == b
        }

        fn hash(&self, _: &u32) -> u64 {
            7
        }
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut map = ComparerMap::new();
        for key in ["b", "a", "c"] {
            map.insert(key.to_string(), key.len(), &OrdinalIgnoreCase);
        }
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_lookup_uses_comparer() {
        let mut map = ComparerMap::new();
        map.insert("Home".to_string(), 1, &OrdinalIgnoreCase);
        assert_eq!(map.get(&"HOME".to_string(), &OrdinalIgnoreCase), Some(&1));
        assert_eq!(map.insert("home".to_string(), 2, &OrdinalIgnoreCase), Some(1));
        assert_eq!(map.len(), 1);
        // First spelling wins.
        assert_eq!(map.keys().next().map(String::as_str), Some("Home"));
    }

    #[test]
    fn test_hash_collisions_fall_back_to_equals() {
        let mut map = ComparerMap::new();
        *map.get_or_insert_with(1, &Colliding, || 0) += 10;
        *map.get_or_insert_with(2, &Colliding, || 0) += 20;
        *map.get_or_insert_with(1, &Colliding, || 0) += 1;
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1, &Colliding), Some(&11));
        assert_eq!(map.get(&2, &Colliding), Some(&20));
    }

    #[test]
    fn test_criterion_values_bucket_by_hash_first() {
        let cmp: CriterionValueComparer<'_, String> = CriterionValueComparer::new(&OrdinalIgnoreCase);
        let mut map: ComparerMap<CriterionValue<String>, Vec<&str>> = ComparerMap::new();
        let items = [
            (CriterionValue::exact("Home".to_string()), "a"),
            (CriterionValue::exact("Products".to_string()), "b"),
            (CriterionValue::catch_all("x".to_string()), "c"),
            (CriterionValue::exact("home".to_string()), "d"),
            (CriterionValue::catch_all("y".to_string()), "e"),
        ];
        for (value, item) in items {
            map.get_or_insert_with(value, &cmp, Vec::new).push(item);
        }
        let buckets: Vec<_> = map.values().cloned().collect();
        assert_eq!(buckets, vec![vec!["a", "d"], vec!["b"], vec!["c", "e"]]);
    }
}
