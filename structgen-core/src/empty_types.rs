//! Sentinel wrapper types for optional scalar fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lookup table from a base type to the wrapper type that records presence.
///
/// An optional `string` field cannot tell "absent" from `""`; substituting
/// `EmptyString` keeps that distinction in the generated code.
///
/// # Example
///
/// ```
/// use structgen_core::EmptyTypes;
///
/// let table = EmptyTypes::default().with("int64", "EmptyInt64");
/// assert_eq!(table.get("string"), Some("EmptyString"));
/// assert_eq!(table.get("int64"), Some("EmptyInt64"));
/// assert_eq!(table.get("[]string"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmptyTypes {
    /// Base type -> wrapper type (sorted for deterministic output)
    types: BTreeMap<String, String>,
}

impl EmptyTypes {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Add or replace a mapping.
    pub fn with(mut self, base: impl Into<String>, wrapper: impl Into<String>) -> Self {
        self.insert(base, wrapper);
        self
    }

    /// Add or replace a mapping (mutable).
    pub fn insert(&mut self, base: impl Into<String>, wrapper: impl Into<String>) {
        self.types.insert(base.into(), wrapper.into());
    }

    /// Wrapper type for a base type.
    pub fn get(&self, base: &str) -> Option<&str> {
        self.types.get(base).map(String::as_str)
    }

    /// Iterate over (base, wrapper) pairs in base type order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(b, w)| (b.as_str(), w.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
}

impl Default for EmptyTypes {
    fn default() -> Self {
        Self::new()
            .with("string", "EmptyString")
            .with("bool", "EmptyBool")
            .with("int", "EmptyInt")
            .with("float64", "EmptyFloat64")
    }
}
