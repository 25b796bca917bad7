//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! endpoints file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SelectorConfig (validated, immutable)
//!     → SelectorConfig::actions() → ActionSelector
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → ActionSelector::update rebuilds and swaps the tree
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{EndpointConfig, LogFormat, ObservabilityConfig, SelectorConfig};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
