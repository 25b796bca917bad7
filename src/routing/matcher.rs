//! Route value matching against action constraints.
//!
//! # Responsibilities
//! - Classify actions into decision tree criteria
//! - Hold the route values of a lookup
//!
//! # Design Decisions
//! - Keys and values are case-insensitive
//! - A missing route value reads as the empty string, so `Deny` constraints
//!   (classified as `""`) match absent keys
//! - Catch-all constraints become fallback branches

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::routing::action::{ActionDescriptor, RouteConstraint};
use crate::tree::{Classifier, CriterionKey, CriterionValue, Criteria, OrdinalIgnoreCase, ValueComparer, ValueLookup};

static EMPTY: String = String::new();

/// Errors parsing route values from `key=value` text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteValueError {
    #[error("route value `{0}` is not of the form key=value")]
    MissingSeparator(String),

    #[error("route value `{0}` has an empty key")]
    EmptyKey(String),
}

/// The route values of one lookup, keyed case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RouteValues {
    values: IndexMap<CriterionKey, String>,
}

impl RouteValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` pairs. Later pairs replace earlier ones for the same key.
    pub fn parse_pairs<I, S>(pairs: I) -> Result<Self, RouteValueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| RouteValueError::MissingSeparator(pair.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(RouteValueError::EmptyKey(pair.to_string()));
            }
            values.insert(key, value.trim());
        }
        Ok(values)
    }

    pub fn insert(&mut self, key: impl Into<CriterionKey>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&CriterionKey::from(key)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CriterionKey, &str)> {
        self.values.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<CriterionKey>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

impl ValueLookup<String> for RouteValues {
    fn lookup(&self, key: &CriterionKey) -> Option<&String> {
        Some(self.values.get(key).unwrap_or(&EMPTY))
    }
}

/// Classifies actions by their route constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionRouteClassifier;

impl Classifier<Arc<ActionDescriptor>, String> for ActionRouteClassifier {
    fn criteria(&self, action: &Arc<ActionDescriptor>) -> Criteria<String> {
        action
            .route_constraints
            .iter()
            .map(|(key, constraint)| {
                let value = match constraint {
                    RouteConstraint::Require(value) => CriterionValue::exact(value.clone()),
                    RouteConstraint::Deny => CriterionValue::exact(String::new()),
                    RouteConstraint::CatchAll => CriterionValue::catch_all(String::new()),
                };
                (key.clone(), value)
            })
            .collect()
    }

    fn value_comparer(&self) -> &dyn ValueComparer<String> {
        &OrdinalIgnoreCase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let values = RouteValues::parse_pairs(["controller=Home", "Action = Index"]).unwrap();
        assert_eq!(values.get("CONTROLLER"), Some("Home"));
        assert_eq!(values.get("action"), Some("Index"));
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_later_pair_replaces_earlier_in_place() {
        let values = RouteValues::parse_pairs(["controller=Home", "action=Index", "CONTROLLER=Users"]).unwrap();
        let pairs: Vec<_> = values.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(pairs, vec![("controller", "Users"), ("action", "Index")]);
    }

    #[test]
    fn test_parse_pairs_rejects_malformed() {
        assert_eq!(
            RouteValues::parse_pairs(["controller"]).unwrap_err(),
            RouteValueError::MissingSeparator("controller".into())
        );
        assert_eq!(
            RouteValues::parse_pairs(["=Home"]).unwrap_err(),
            RouteValueError::EmptyKey("=Home".into())
        );
    }

    #[test]
    fn test_missing_key_reads_as_empty() {
        let values: RouteValues = [("controller", "Home")].into_iter().collect();
        assert_eq!(values.lookup(&CriterionKey::from("area")), Some(&String::new()));
        assert_eq!(
            values.lookup(&CriterionKey::from("Controller")).map(String::as_str),
            Some("Home")
        );
    }

    #[test]
    fn test_classifier_maps_constraints() {
        let action = Arc::new(
            ActionDescriptor::new(0, "Admin.Users")
                .require("controller", "Users")
                .with_constraint("area", RouteConstraint::Deny)
                .with_constraint("page", RouteConstraint::CatchAll),
        );
        let criteria = ActionRouteClassifier.criteria(&action);
        let keys: Vec<_> = criteria.keys().map(CriterionKey::as_str).collect();
        assert_eq!(keys, vec!["controller", "area", "page"]);
        assert_eq!(criteria[&CriterionKey::from("controller")].value(), "Users");
        assert!(!criteria[&CriterionKey::from("area")].is_catch_all());
        assert!(criteria[&CriterionKey::from("page")].is_catch_all());

        // Classification is deterministic.
        assert_eq!(criteria, ActionRouteClassifier.criteria(&action));
    }
}
