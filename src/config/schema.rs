//! Configuration schema definitions.
//!
//! This module defines the endpoint file structure.
//! All types derive Serde traits for deserialization from config files.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::routing::action::{ActionDescriptor, RouteConstraint};

/// Root configuration: the endpoints to select between.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SelectorConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Endpoint definitions, in selection order.
    pub endpoints: Vec<EndpointConfig>,
}

impl SelectorConfig {
    /// Convert endpoints to action descriptors, preserving file order.
    ///
    /// Route values map as: `*` → catch-all, `""` → deny, else → require.
    pub fn actions(&self) -> Vec<Arc<ActionDescriptor>> {
        self.endpoints
            .iter()
            .enumerate()
            .map(|(id, endpoint)| Arc::new(endpoint.to_action(id)))
            .collect()
    }
}

/// A single endpoint definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Endpoint identifier for logging and output.
    pub name: String,

    /// Route values this endpoint requires (e.g. controller, action, area).
    #[serde(default)]
    pub route_values: IndexMap<String, String>,

    /// Allowed HTTP methods (empty = any).
    #[serde(default)]
    pub http_methods: Vec<String>,
}

impl EndpointConfig {
    fn to_action(&self, id: usize) -> ActionDescriptor {
        self.route_values
            .iter()
            .fold(ActionDescriptor::new(id, self.name.clone()), |action, (key, value)| {
                action.with_constraint(key.as_str(), RouteConstraint::parse(value))
            })
            .with_http_methods(self.http_methods.iter().cloned())
    }
}

/// Output format for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
