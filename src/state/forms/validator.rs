//! Whole-form validation

use super::rules::RuleSet;
use std::collections::BTreeMap;

/// Field name to its single active error message. Empty means submit-ready.
pub type ErrorMap = BTreeMap<String, String>;

/// Raw values of every field at the moment of validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    values: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Value of a field, empty when the field is absent
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }
}

/// Runs a [`RuleSet`] against snapshots
#[derive(Debug, Clone)]
pub struct FormValidator {
    rules: RuleSet,
}

impl FormValidator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Build the error map for every declared field.
    ///
    /// Recomputed from scratch on each call, so the same snapshot always
    /// produces the same map.
    pub fn validate(&self, snapshot: &FormSnapshot) -> ErrorMap {
        self.rules
            .field_names()
            .filter_map(|field| {
                self.rules
                    .validate_field(field, snapshot.get(field), snapshot)
                    .map(|message| (field.to_string(), message))
            })
            .collect()
    }
}
