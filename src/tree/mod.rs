//! Decision tree for matching route values against candidate items.
//!
//! # Data Flow
//! ```text
//! Tree construction (whenever the item set changes):
//!     items[]
//!     → classifier.rs (item → criteria: key → CriterionValue)
//!     → descriptor.rs (item + criteria + index)
//!     → builder.rs (recursive partition by undecided keys)
//!     → DecisionNode (immutable, shareable)
//!
//! Lookup (per request):
//!     route values
//!     → node.rs walk (branch on value, else fallback)
//!     → every item found in `matches` along the way
//! ```
//!
//! # Design Decisions
//! - Keys compare case-insensitively (`CriterionKey`)
//! - Value equality is pluggable (`ValueComparer`), never `Eq` on `V`
//! - Trees are rebuilt from scratch, never mutated after construction
//! - Ambiguity is left to the caller: a walk returns every candidate

pub mod builder;
pub mod classifier;
pub mod descriptor;
pub mod key;
pub mod map;
pub mod node;
pub mod value;

pub use builder::generate_tree;
pub use classifier::{Classifier, Criteria};
pub use key::CriterionKey;
pub use map::ComparerMap;
pub use node::{DecisionCriterion, DecisionNode, ValueLookup};
pub use value::{
    CriterionValue, CriterionValueComparer, DefaultComparer, OrdinalIgnoreCase, ValueComparer,
};
