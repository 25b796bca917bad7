//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load endpoints → Validate → Init logging → Build tree
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop watching → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     SIGHUP → Trigger endpoint reload
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then logging, then the tree
//! - A failed reload never replaces a working tree

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use signals::{LifecycleSignal, SignalListener};
