//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Endpoint names present and unique
//! - Route keys non-empty and unique per endpoint, ignoring case
//! - Log level recognised
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SelectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Identical route values across endpoints are allowed; they select together

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::SelectorConfig;
use crate::tree::CriterionKey;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint #{index} has an empty name")]
    EmptyEndpointName { index: usize },

    #[error("endpoint name `{0}` is used more than once")]
    DuplicateEndpointName(String),

    #[error("endpoint `{endpoint}` has an empty route key")]
    EmptyRouteKey { endpoint: String },

    #[error("endpoint `{endpoint}` declares route key `{key}` more than once (keys ignore case)")]
    DuplicateRouteKey { endpoint: String, key: String },

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

/// Check `config` for semantic errors, collecting every one found.
pub fn validate_config(config: &SelectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut names = HashSet::new();
    for (index, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.name.trim().is_empty() {
            errors.push(ValidationError::EmptyEndpointName { index });
        } else if !names.insert(endpoint.name.as_str()) {
            errors.push(ValidationError::DuplicateEndpointName(endpoint.name.clone()));
        }

        let mut keys = HashSet::new();
        for key in endpoint.route_values.keys() {
            if key.trim().is_empty() {
                errors.push(ValidationError::EmptyRouteKey {
                    endpoint: endpoint.name.clone(),
                });
            } else if !keys.insert(CriterionKey::from(key.as_str())) {
                errors.push(ValidationError::DuplicateRouteKey {
                    endpoint: endpoint.name.clone(),
                    key: key.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::EndpointConfig;

    fn endpoint(name: &str, pairs: &[(&str, &str)]) -> EndpointConfig {
        EndpointConfig {
            name: name.to_string(),
            route_values: pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            http_methods: Vec::new(),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = SelectorConfig::default();
        config.endpoints.push(endpoint("Home.Index", &[("controller", "Home")]));
        config.endpoints.push(endpoint("Home.Index2", &[("controller", "Home")]));
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SelectorConfig::default();
        config.observability.log_level = "loud".to_string();
        config.endpoints.push(endpoint("", &[]));
        config.endpoints.push(endpoint("A", &[("controller", "x"), ("Controller", "y")]));
        config.endpoints.push(endpoint("A", &[(" ", "x")]));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidLogLevel("loud".into()),
                ValidationError::EmptyEndpointName { index: 0 },
                ValidationError::DuplicateRouteKey {
                    endpoint: "A".into(),
                    key: "Controller".into()
                },
                ValidationError::DuplicateEndpointName("A".into()),
                ValidationError::EmptyRouteKey { endpoint: "A".into() },
            ]
        );
    }
}
