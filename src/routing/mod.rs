//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming lookup (route values: controller, action, area, ...)
//!     → router.rs (load current snapshot)
//!     → tree walk (decision tree over route constraints)
//!     → Return: every candidate action, possibly none
//!
//! Tree Compilation (at startup and on reload):
//!     EndpointConfig[]
//!     → action.rs (ActionDescriptor with route constraints)
//!     → matcher.rs (classify constraints into criteria)
//!     → generate_tree
//!     → Freeze as immutable snapshot, swap in atomically
//! ```
//!
//! # Design Decisions
//! - Trees compiled up front, immutable at runtime
//! - No regex, no per-lookup scan of all actions
//! - Deterministic: same collection always builds the same tree
//! - All candidates returned, in tree walk order

pub mod action;
pub mod matcher;
pub mod router;

pub use action::{ActionDescriptor, RouteConstraint};
pub use matcher::{ActionRouteClassifier, RouteValueError, RouteValues};
pub use router::{ActionDescriptorCollection, ActionSelector, TreeSnapshot};
