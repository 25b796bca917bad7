//! Action selection over a hot-swappable decision tree.
//!
//! # Responsibilities
//! - Build the decision tree for the current action collection
//! - Publish it as an immutable, versioned snapshot
//! - Answer candidate lookups for route values
//!
//! # Design Decisions
//! - Readers load the snapshot without locking (`ArcSwap`)
//! - Writers rebuild the whole tree and swap it in; a reader holding the
//!   previous snapshot finishes its walk against it
//! - A collection whose version matches the cached snapshot is not rebuilt
//! - Every candidate is returned; ambiguity is the caller's to resolve

use std::sync::{Arc, Mutex};
use std::time::Instant;

use arc_swap::ArcSwap;

use crate::config::SelectorConfig;
use crate::observability::metrics::{self, SelectionOutcome};
use crate::routing::action::ActionDescriptor;
use crate::routing::matcher::{ActionRouteClassifier, RouteValues};
use crate::tree::{generate_tree, DecisionNode, OrdinalIgnoreCase};

/// An action collection as published by its provider.
#[derive(Debug, Clone, Default)]
pub struct ActionDescriptorCollection {
    /// Bumped by the provider whenever `items` changes.
    pub version: u64,
    pub items: Vec<Arc<ActionDescriptor>>,
}

impl ActionDescriptorCollection {
    pub fn new(version: u64, items: Vec<Arc<ActionDescriptor>>) -> Self {
        Self { version, items }
    }
}

/// An immutable action collection together with its decision tree.
#[derive(Debug)]
pub struct TreeSnapshot {
    version: u64,
    source_version: Option<u64>,
    actions: Vec<Arc<ActionDescriptor>>,
    root: DecisionNode<Arc<ActionDescriptor>, String>,
}

impl TreeSnapshot {
    /// Build the tree for `actions`, published as `version`.
    ///
    /// `source_version` is the provider's collection version, if the actions
    /// came from one.
    pub fn build(version: u64, source_version: Option<u64>, actions: Vec<Arc<ActionDescriptor>>) -> Self {
        let start = Instant::now();
        let root = generate_tree(&actions, &ActionRouteClassifier);
        let elapsed = start.elapsed();
        let nodes = root.node_count();

        metrics::record_tree_build(actions.len(), nodes, elapsed);
        tracing::info!(
            version,
            source_version = ?source_version,
            actions = actions.len(),
            nodes,
            depth = root.depth(),
            elapsed_us = elapsed.as_micros() as u64,
            "Action selection tree built"
        );

        Self {
            version,
            source_version,
            actions,
            root,
        }
    }

    /// Published version, bumped on every rebuild.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Version of the provider collection this tree was built from.
    pub fn source_version(&self) -> Option<u64> {
        self.source_version
    }

    pub fn actions(&self) -> &[Arc<ActionDescriptor>] {
        &self.actions
    }

    pub fn root(&self) -> &DecisionNode<Arc<ActionDescriptor>, String> {
        &self.root
    }

    /// Every action whose route constraints are met by `values`, in walk order.
    pub fn select(&self, values: &RouteValues) -> Vec<Arc<ActionDescriptor>> {
        self.root
            .walk(values, &OrdinalIgnoreCase)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// Selects candidate actions for route values.
#[derive(Debug)]
pub struct ActionSelector {
    snapshot: ArcSwap<TreeSnapshot>,
    /// Serializes writers so versions stay monotonic.
    update_lock: Mutex<()>,
}

impl ActionSelector {
    /// Create a selector over `actions` at version 1.
    pub fn new(actions: Vec<Arc<ActionDescriptor>>) -> Self {
        Self::with_snapshot(TreeSnapshot::build(1, None, actions))
    }

    /// Create a selector at version 1 that caches against `collection.version`.
    pub fn from_collection(collection: ActionDescriptorCollection) -> Self {
        Self::with_snapshot(TreeSnapshot::build(1, Some(collection.version), collection.items))
    }

    /// Create a selector over the endpoints of a loaded configuration.
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::new(config.actions())
    }

    fn with_snapshot(snapshot: TreeSnapshot) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(snapshot),
            update_lock: Mutex::new(()),
        }
    }

    /// The current snapshot. Stays valid after later updates.
    pub fn snapshot(&self) -> Arc<TreeSnapshot> {
        self.snapshot.load_full()
    }

    pub fn version(&self) -> u64 {
        self.snapshot.load().version
    }

    /// Replace the action set, returning the new version.
    ///
    /// The result is not tied to any provider collection, so the next
    /// `update_if_changed` always rebuilds.
    pub fn update(&self, actions: Vec<Arc<ActionDescriptor>>) -> u64 {
        let _guard = self.update_lock.lock().unwrap_or_else(|e| e.into_inner());
        let version = self.snapshot.load().version + 1;
        self.snapshot.store(Arc::new(TreeSnapshot::build(version, None, actions)));
        version
    }

    /// Rebuild from `collection` unless the current tree was built from the
    /// same provider version.
    ///
    /// Returns true if a new snapshot was published.
    pub fn update_if_changed(&self, collection: &ActionDescriptorCollection) -> bool {
        let _guard = self.update_lock.lock().unwrap_or_else(|e| e.into_inner());
        let (current, source_version) = {
            let snapshot = self.snapshot.load();
            (snapshot.version, snapshot.source_version)
        };
        if source_version == Some(collection.version) {
            tracing::trace!(
                version = current,
                source_version = collection.version,
                "Action collection unchanged, reusing tree"
            );
            return false;
        }
        let version = current + 1;
        self.snapshot.store(Arc::new(TreeSnapshot::build(
            version,
            Some(collection.version),
            collection.items.clone(),
        )));
        true
    }

    /// Every action compatible with `values`.
    pub fn select_candidates(&self, values: &RouteValues) -> Vec<Arc<ActionDescriptor>> {
        let snapshot = self.snapshot.load();
        let candidates = snapshot.select(values);

        let outcome = SelectionOutcome::from_count(candidates.len());
        metrics::record_selection(outcome);
        tracing::debug!(
            version = snapshot.version,
            route_values = values.len(),
            candidates = candidates.len(),
            outcome = outcome.as_str(),
            "Candidates selected"
        );

        candidates
    }
}
