//! Metrics collection.
//!
//! # Metrics
//! - `decision_tree_builds_total` (counter): trees built
//! - `decision_tree_build_duration_seconds` (histogram): build latency
//! - `decision_tree_nodes` (gauge): node count of the latest tree
//! - `decision_tree_actions` (gauge): action count of the latest tree
//! - `route_selections_total` (counter): lookups by outcome
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; the host installs a recorder
//! - Without a recorder every call is a no-op

use std::time::Duration;

/// Result of a candidate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    NoMatch,
    Single,
    Ambiguous,
}

impl SelectionOutcome {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => SelectionOutcome::NoMatch,
            1 => SelectionOutcome::Single,
            _ => SelectionOutcome::Ambiguous,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionOutcome::NoMatch => "no_match",
            SelectionOutcome::Single => "single",
            SelectionOutcome::Ambiguous => "ambiguous",
        }
    }
}

/// Record a completed tree build.
pub fn record_tree_build(actions: usize, nodes: usize, elapsed: Duration) {
    ::metrics::counter!("decision_tree_builds_total").increment(1);
    ::metrics::histogram!("decision_tree_build_duration_seconds").record(elapsed.as_secs_f64());
    ::metrics::gauge!("decision_tree_nodes").set(nodes as f64);
    ::metrics::gauge!("decision_tree_actions").set(actions as f64);
}

/// Record a candidate lookup.
pub fn record_selection(outcome: SelectionOutcome) {
    ::metrics::counter!("route_selections_total", "outcome" => outcome.as_str()).increment(1);
}
