//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate the endpoint file
//! - Initialize logging from it
//! - Build the first action selection tree
//!
//! # Design Decisions
//! - Fail fast: an unreadable or invalid file is fatal at startup
//! - Logging comes up before the first tree build so the build is logged
//! - Later reloads keep the current tree on failure instead

use std::path::Path;

use crate::config::{load_config, ConfigError, SelectorConfig};
use crate::observability::logging;
use crate::routing::ActionSelector;

/// Load `path`, install logging, and build the selector.
pub fn bootstrap(path: &Path) -> Result<(SelectorConfig, ActionSelector), ConfigError> {
    let config = load_config(path)?;

    if let Err(e) = logging::init(&config.observability) {
        // Already installed by the host; keep it.
        tracing::debug!(error = %e, "Tracing subscriber already set");
    }

    tracing::info!(
        path = %path.display(),
        endpoints = config.endpoints.len(),
        "Endpoint configuration loaded"
    );

    let selector = ActionSelector::from_config(&config);
    Ok((config, selector))
}

/// Reload `path` into `selector`, keeping the current tree if the file is bad.
///
/// Returns the new version on success.
pub fn reload(path: &Path, selector: &ActionSelector) -> Result<u64, ConfigError> {
    match load_config(path) {
        Ok(config) => Ok(selector.update(config.actions())),
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                version = selector.version(),
                "Reload failed. Keeping current tree."
            );
            Err(e)
        }
    }
}
