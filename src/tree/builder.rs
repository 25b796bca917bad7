//! Decision tree construction.
//!
//! # Algorithm
//! ```text
//! generate_node(decided keys, items):
//!     for each item:
//!         bucket every undecided (key, value) → criteria[key][value]
//!         no undecided keys left → item is a match here
//!     for each key, most populated first:
//!         for each value bucket:
//!             drop items already claimed at this level
//!             recurse on the rest with key added to the decided set
//!             catch-all bucket → fallback, otherwise → branches[value]
//!         key produced no branch and no fallback → drop it
//! ```
//!
//! Claimed-item tracking is a bitmap over the positions of the items handed
//! to the current call; each child call starts with a fresh one.

use std::cmp::Reverse;

use indexmap::{IndexMap, IndexSet};

use crate::tree::classifier::Classifier;
use crate::tree::descriptor::ItemDescriptor;
use crate::tree::key::CriterionKey;
use crate::tree::map::ComparerMap;
use crate::tree::node::{DecisionCriterion, DecisionNode};
use crate::tree::value::{CriterionValue, CriterionValueComparer};

/// Per-call builder state.
struct TreeBuilderContext<'d> {
    /// Keys decided on the path from the root to the node being built.
    current_criteria: IndexSet<&'d CriterionKey>,
    /// Items already placed under a branch of the node being built, by position.
    matched_items: Vec<bool>,
}

impl<'d> TreeBuilderContext<'d> {
    fn new(current_criteria: IndexSet<&'d CriterionKey>, item_count: usize) -> Self {
        Self {
            current_criteria,
            matched_items: vec![false; item_count],
        }
    }

    fn child(&self, key: &'d CriterionKey, item_count: usize) -> Self {
        let mut current_criteria = self.current_criteria.clone();
        current_criteria.insert(key);
        Self::new(current_criteria, item_count)
    }

    /// Claim the item at `position`. False if a sibling branch already did.
    fn claim(&mut self, position: usize) -> bool {
        !std::mem::replace(&mut self.matched_items[position], true)
    }
}

/// Value buckets for one key: criterion value → positions of the items that
/// carry it.
type ValueBuckets<V> = ComparerMap<CriterionValue<V>, Vec<usize>>;

/// Build the decision tree for `items`.
///
/// Every item ends up in the `matches` of exactly one node, reached by the
/// path of its own criteria. Items with no criteria match at the root.
/// Items with identical criteria share a node and keep their input order.
pub fn generate_tree<T, V, C>(items: &[T], classifier: &C) -> DecisionNode<T, V>
where
    T: Clone,
    V: Clone,
    C: Classifier<T, V> + ?Sized,
{
    let descriptors: Vec<ItemDescriptor<'_, T, V>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| ItemDescriptor::new(item, index, classifier.criteria(item)))
        .collect();

    let comparer = CriterionValueComparer::new(classifier.value_comparer());
    let refs: Vec<&ItemDescriptor<'_, T, V>> = descriptors.iter().collect();
    let context = TreeBuilderContext::new(IndexSet::new(), refs.len());
    let root = generate_node(context, &comparer, &refs);

    tracing::debug!(
        items = items.len(),
        nodes = root.node_count(),
        depth = root.depth(),
        "Decision tree generated"
    );

    root
}

fn generate_node<'d, T, V>(
    mut context: TreeBuilderContext<'d>,
    comparer: &CriterionValueComparer<'_, V>,
    items: &[&'d ItemDescriptor<'_, T, V>],
) -> DecisionNode<T, V>
where
    T: Clone,
    V: Clone,
{
    let mut matches = Vec::new();
    let mut criteria: IndexMap<&'d CriterionKey, ValueBuckets<V>> = IndexMap::new();

    for (position, &item) in items.iter().enumerate() {
        let mut unsatisfied = 0usize;
        for (key, value) in &item.criteria {
            if context.current_criteria.contains(&key) {
                continue;
            }
            unsatisfied += 1;
            criteria
                .entry(key)
                .or_default()
                .get_or_insert_with(value.clone(), comparer, Vec::new)
                .push(position);
        }

        if unsatisfied == 0 {
            matches.push(item.item.clone());
        }
    }

    let mut ordered: Vec<(&'d CriterionKey, ValueBuckets<V>)> = criteria.into_iter().collect();
    // Stable: equally populated keys keep first-seen order.
    ordered.sort_by_key(|(_, buckets)| Reverse(buckets.values().map(Vec::len).sum::<usize>()));

    let mut reduced = Vec::with_capacity(ordered.len());
    for (key, buckets) in ordered {
        let mut branches = ComparerMap::new();
        let mut fallback = None;

        for (value, positions) in buckets.into_entries() {
            let claimed: Vec<&'d ItemDescriptor<'_, T, V>> = positions
                .into_iter()
                .filter(|&position| context.claim(position))
                .map(|position| items[position])
                .collect();

            if claimed.is_empty() {
                continue;
            }

            let child = context.child(key, claimed.len());
            let node = generate_node(child, comparer, &claimed);

            if value.is_catch_all() {
                fallback = Some(node);
            } else {
                branches.insert(value.into_value(), node, comparer.inner());
            }
        }

        if branches.is_empty() && fallback.is_none() {
            continue;
        }
        reduced.push(DecisionCriterion::new(key.clone(), branches, fallback));
    }

    tracing::trace!(
        depth = context.current_criteria.len(),
        items = items.len(),
        matches = matches.len(),
        criteria = reduced.len(),
        "Decision node generated"
    );

    DecisionNode::new(matches, reduced)
}
