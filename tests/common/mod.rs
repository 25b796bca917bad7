//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use route_decision::routing::{ActionDescriptor, RouteConstraint};
use route_decision::tree::{
    Classifier, CriterionKey, CriterionValue, Criteria, OrdinalIgnoreCase, ValueComparer,
};

/// A plain test item: a name plus `(key, value)` constraints, `*` = catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub pairs: Vec<(String, String)>,
}

pub fn item(name: &str, pairs: &[(&str, &str)]) -> Item {
    Item {
        name: name.to_string(),
        pairs: pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Classifies `Item`s with ordinal ignore-case value comparison.
pub struct ItemClassifier;

impl Classifier<Item, String> for ItemClassifier {
    fn criteria(&self, item: &Item) -> Criteria<String> {
        item.pairs
            .iter()
            .map(|(k, v)| {
                let value = if v == "*" {
                    CriterionValue::catch_all(String::new())
                } else {
                    CriterionValue::exact(v.clone())
                };
                (CriterionKey::from(k.as_str()), value)
            })
            .collect()
    }

    fn value_comparer(&self) -> &dyn ValueComparer<String> {
        &OrdinalIgnoreCase
    }
}

/// Lookup map for core-level walks: missing keys stay missing.
pub fn lookup(pairs: &[(&str, &str)]) -> indexmap::IndexMap<CriterionKey, String> {
    pairs
        .iter()
        .map(|&(k, v)| (CriterionKey::from(k), v.to_string()))
        .collect()
}

pub fn names<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a str> {
    items.into_iter().map(|i| i.name.as_str()).collect()
}

/// Build an action from endpoint-file style pairs (`*` catch-all, `""` deny).
pub fn action(id: usize, name: &str, pairs: &[(&str, &str)]) -> Arc<ActionDescriptor> {
    let action = pairs.iter().fold(ActionDescriptor::new(id, name), |a, &(k, v)| {
        a.with_constraint(k, RouteConstraint::parse(v))
    });
    Arc::new(action)
}

pub fn action_names(actions: &[Arc<ActionDescriptor>]) -> Vec<&str> {
    actions.iter().map(|a| a.name.as_str()).collect()
}

/// The four-endpoint MVC fixture.
pub fn mvc_items() -> Vec<Item> {
    vec![
        item("Home.Index", &[("controller", "Home"), ("action", "Index")]),
        item("Products.Index", &[("controller", "Products"), ("action", "Index")]),
        item("Products.Buy", &[("controller", "Products"), ("action", "Buy")]),
        item(
            "Admin.Users.AddUser",
            &[("area", "Admin"), ("controller", "Users"), ("action", "AddUser")],
        ),
    ]
}
