//! Action descriptors: the candidates the decision tree selects between.

use indexmap::IndexMap;
use serde::Serialize;

use crate::tree::CriterionKey;

/// Marker for a catch-all constraint in endpoint files and CLI input.
pub const CATCH_ALL_MARKER: &str = "*";

/// How an action constrains a single route key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RouteConstraint {
    /// The route value must equal this value (ignoring case).
    Require(String),
    /// The route key must be absent or empty.
    Deny,
    /// Any value, or none.
    CatchAll,
}

impl RouteConstraint {
    /// Parse the endpoint-file form: `*` is catch-all, an empty string denies
    /// the key, anything else is required verbatim.
    pub fn parse(raw: &str) -> Self {
        match raw {
            CATCH_ALL_MARKER => RouteConstraint::CatchAll,
            "" => RouteConstraint::Deny,
            value => RouteConstraint::Require(value.to_string()),
        }
    }
}

/// A routable endpoint and the route values it requires.
#[derive(Debug, Clone, Serialize)]
pub struct ActionDescriptor {
    /// Position in the source collection.
    pub id: usize,
    /// Display name, e.g. `Home.Index`.
    pub name: String,
    /// Constraints keyed case-insensitively, in declaration order.
    pub route_constraints: IndexMap<CriterionKey, RouteConstraint>,
    /// Allowed HTTP methods. Not part of route matching; carried so callers
    /// can break ties between candidates sharing the same route values.
    pub http_methods: Vec<String>,
}

impl ActionDescriptor {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            route_constraints: IndexMap::new(),
            http_methods: Vec::new(),
        }
    }

    /// Add (or replace) the constraint for `key`.
    pub fn with_constraint(mut self, key: impl Into<CriterionKey>, constraint: RouteConstraint) -> Self {
        self.route_constraints.insert(key.into(), constraint);
        self
    }

    /// Require `key` to equal `value`.
    pub fn require(self, key: impl Into<CriterionKey>, value: impl Into<String>) -> Self {
        self.with_constraint(key, RouteConstraint::Require(value.into()))
    }

    pub fn with_http_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.http_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// True if the action accepts `method`. No declared methods accepts all.
    pub fn allows_method(&self, method: &str) -> bool {
        self.http_methods.is_empty()
            || self.http_methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint() {
        assert_eq!(RouteConstraint::parse("*"), RouteConstraint::CatchAll);
        assert_eq!(RouteConstraint::parse(""), RouteConstraint::Deny);
        assert_eq!(
            RouteConstraint::parse("Home"),
            RouteConstraint::Require("Home".into())
        );
    }

    #[test]
    fn test_constraints_keyed_case_insensitively() {
        let action = ActionDescriptor::new(0, "Home.Index")
            .require("Controller", "Home")
            .require("controller", "Other");
        assert_eq!(action.route_constraints.len(), 1);
        assert_eq!(
            action.route_constraints[&CriterionKey::from("CONTROLLER")],
            RouteConstraint::Require("Other".into())
        );
    }

    #[test]
    fn test_allows_method() {
        let any = ActionDescriptor::new(0, "a");
        assert!(any.allows_method("DELETE"));

        let get_only = ActionDescriptor::new(1, "b").with_http_methods(["GET"]);
        assert!(get_only.allows_method("get"));
        assert!(!get_only.allows_method("POST"));
    }
}
