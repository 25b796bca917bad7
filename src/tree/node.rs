//! Decision tree nodes and the walker.
//!
//! A node holds the items fully satisfied by the path that reached it, plus
//! the criteria to branch on next. Nodes are immutable once built.

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::Serialize;

use crate::tree::key::CriterionKey;
use crate::tree::map::ComparerMap;
use crate::tree::value::ValueComparer;

/// Source of concrete route values for a walk.
pub trait ValueLookup<V> {
    /// The value supplied for `key`, if any.
    fn lookup(&self, key: &CriterionKey) -> Option<&V>;
}

impl<V, S: BuildHasher> ValueLookup<V> for IndexMap<CriterionKey, V, S> {
    fn lookup(&self, key: &CriterionKey) -> Option<&V> {
        self.get(key)
    }
}

impl<V, S: BuildHasher> ValueLookup<V> for HashMap<CriterionKey, V, S> {
    fn lookup(&self, key: &CriterionKey) -> Option<&V> {
        self.get(key)
    }
}

/// One node of the decision tree.
#[derive(Debug, Serialize)]
pub struct DecisionNode<T, V> {
    matches: Vec<T>,
    criteria: Vec<DecisionCriterion<T, V>>,
}

/// A branching dimension: concrete-value branches plus an optional catch-all
/// fallback.
#[derive(Debug, Serialize)]
pub struct DecisionCriterion<T, V> {
    key: CriterionKey,
    branches: ComparerMap<V, DecisionNode<T, V>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<Box<DecisionNode<T, V>>>,
}

impl<T, V> DecisionNode<T, V> {
    pub(crate) fn new(matches: Vec<T>, criteria: Vec<DecisionCriterion<T, V>>) -> Self {
        Self { matches, criteria }
    }

    /// Items satisfied by the path leading here.
    pub fn matches(&self) -> &[T] {
        &self.matches
    }

    /// Branches to explore, most populated dimension first.
    pub fn criteria(&self) -> &[DecisionCriterion<T, V>] {
        &self.criteria
    }

    pub fn is_leaf(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .criteria
            .iter()
            .flat_map(|c| c.children())
            .map(DecisionNode::node_count)
            .sum::<usize>()
    }

    /// Longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        1 + self
            .criteria
            .iter()
            .flat_map(|c| c.children())
            .map(DecisionNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Total number of match entries in this subtree.
    pub fn match_count(&self) -> usize {
        self.matches.len()
            + self
                .criteria
                .iter()
                .flat_map(|c| c.children())
                .map(DecisionNode::match_count)
                .sum::<usize>()
    }

    /// Collect every item reachable for `values`.
    ///
    /// For each criterion the branch for the supplied value is taken; when no
    /// value is supplied or no branch exists the fallback is taken instead.
    /// Keys the tree never branches on are ignored.
    pub fn walk<'t, L, C>(&'t self, values: &L, comparer: &C) -> Vec<&'t T>
    where
        L: ValueLookup<V> + ?Sized,
        C: ValueComparer<V> + ?Sized,
    {
        let mut results = Vec::new();
        self.walk_into(values, comparer, &mut results);
        results
    }

    /// Like [`walk`](Self::walk), appending to `results`.
    pub fn walk_into<'t, L, C>(&'t self, values: &L, comparer: &C, results: &mut Vec<&'t T>)
    where
        L: ValueLookup<V> + ?Sized,
        C: ValueComparer<V> + ?Sized,
    {
        results.extend(self.matches.iter());

        for criterion in &self.criteria {
            let branch = values
                .lookup(&criterion.key)
                .and_then(|value| criterion.branches.get(value, comparer))
                .or(criterion.fallback.as_deref());

            if let Some(node) = branch {
                node.walk_into(values, comparer, results);
            }
        }
    }
}

impl<T, V> DecisionCriterion<T, V> {
    pub(crate) fn new(
        key: CriterionKey,
        branches: ComparerMap<V, DecisionNode<T, V>>,
        fallback: Option<DecisionNode<T, V>>,
    ) -> Self {
        Self {
            key,
            branches,
            fallback: fallback.map(Box::new),
        }
    }

    pub fn key(&self) -> &CriterionKey {
        &self.key
    }

    /// Subtrees keyed by concrete value.
    pub fn branches(&self) -> &ComparerMap<V, DecisionNode<T, V>> {
        &self.branches
    }

    /// Subtree for items that declared this key as catch-all.
    pub fn fallback(&self) -> Option<&DecisionNode<T, V>> {
        self.fallback.as_deref()
    }

    /// All child nodes: branches in insertion order, then the fallback.
    pub fn children(&self) -> impl Iterator<Item = &DecisionNode<T, V>> {
        self.branches.values().chain(self.fallback.as_deref())
    }
}
