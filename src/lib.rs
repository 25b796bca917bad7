//! Route decision trees for action selection.
//!
//! Endpoints declare the route values they require (`controller`, `action`,
//! `area`, ...). A decision tree built over those constraints answers, per
//! lookup, which endpoints are compatible with a set of route values without
//! scanning every endpoint.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod tree;

pub use config::schema::SelectorConfig;
pub use routing::{ActionDescriptor, ActionSelector, RouteValues};
pub use tree::{generate_tree, Classifier, DecisionNode};
