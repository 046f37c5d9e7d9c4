//! Import path registration.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::debug;

/// Go import paths referenced by a generated file.
///
/// Keyed by path, so registering the same path twice keeps a single entry;
/// a later registration replaces the alias. Paths iterate in ascending
/// order for a stable import block.
///
/// # Example
///
/// ```
/// use structgen_codegen::generation::ImportRegistry;
///
/// let mut imports = ImportRegistry::new();
/// assert_eq!(imports.pkg("encoding/json"), "json");
/// assert_eq!(imports.pkg_as("yaml", "gopkg.in/yaml.v3"), "yaml");
///
/// let entries: Vec<_> = imports.iter().collect();
/// assert_eq!(
///     entries,
///     vec![("encoding/json", None), ("gopkg.in/yaml.v3", Some("yaml"))]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRegistry {
    /// Import path -> explicit alias
    imports: BTreeMap<String, Option<String>>,
}

impl ImportRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` without an alias and return the name code should use
    /// to refer to it: the last `/`-separated segment.
    pub fn pkg<'a>(&mut self, path: &'a str) -> &'a str {
        let name = path.rsplit('/').next().unwrap_or(path);
        self.register(path, None);
        name
    }

    /// Register `path` under an explicit `alias` and return the alias.
    pub fn pkg_as<'a>(&mut self, alias: &'a str, path: &str) -> &'a str {
        self.register(path, Some(alias.to_string()));
        alias
    }

    /// Record an import, replacing any alias previously registered for `path`.
    pub fn register(&mut self, path: &str, alias: Option<String>) {
        debug!(path, alias = alias.as_deref(), "registered import");
        self.imports.insert(path.to_string(), alias);
    }

    /// Merge another registry into this one; its aliases win.
    pub fn merge(&mut self, other: &ImportRegistry) {
        for (path, alias) in &other.imports {
            self.imports.insert(path.clone(), alias.clone());
        }
    }

    /// Check if a path is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.imports.contains_key(path)
    }

    /// Explicit alias of a registered path.
    pub fn alias(&self, path: &str) -> Option<&str> {
        self.imports.get(path).and_then(|a| a.as_deref())
    }

    /// Iterate over (path, alias) pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.imports
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_deref()))
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of import paths.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

#[derive(Serialize)]
struct ImportEntry<'a> {
    path: &'a str,
    alias: Option<&'a str>,
}

/// Serializes as a list of `{ path, alias }` entries for templates.
impl Serialize for ImportRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(path, alias)| ImportEntry { path, alias }))
    }
}
