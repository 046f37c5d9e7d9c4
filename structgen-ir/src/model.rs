//! Struct, field, alias and one-of definitions.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Value of `additional_type` that means additional properties are disallowed.
const ADDITIONAL_FALSE: &str = "false";

/// A single schema property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Go identifier of the field (or of the alias, for aliased fields).
    pub name: String,
    /// Key used in the JSON document. Empty means "same as `name`".
    #[serde(default)]
    pub json_name: String,
    /// Type descriptor, e.g. `string`, `*Address`, `[]int`.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl Field {
    /// Create an optional field whose JSON key equals its name.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            json_name: name.clone(),
            name,
            type_name: type_name.into(),
            required: false,
            description: None,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the JSON key.
    pub fn with_json_name(mut self, json_name: impl Into<String>) -> Self {
        self.json_name = json_name.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the type is a pointer (`*T`).
    pub fn is_pointer(&self) -> bool {
        self.type_name.starts_with('*')
    }

    /// JSON key, falling back to the field name.
    pub fn json_key(&self) -> &str {
        if self.json_name.is_empty() {
            &self.name
        } else {
            &self.json_name
        }
    }
}

/// A named record type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Properties keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
    /// Type of additional properties. Empty or `"false"` means none declared.
    #[serde(default)]
    pub additional_type: String,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a field, keyed by its name.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Set the additional-properties type.
    pub fn with_additional_type(mut self, additional_type: impl Into<String>) -> Self {
        self.additional_type = additional_type.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Additional-properties type, if one is declared.
    pub fn additional(&self) -> Option<&str> {
        match self.additional_type.as_str() {
            "" | ADDITIONAL_FALSE => None,
            other => Some(other),
        }
    }

    /// Returns true if the struct has no property at all.
    pub fn no_prop(&self) -> bool {
        self.fields.is_empty() && self.additional().is_none()
    }

    /// Returns true if any field is required.
    pub fn has_required(&self) -> bool {
        self.fields.values().any(|f| f.required)
    }
}

/// A tagged-union group: one of several named types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OneOf {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Names of the member types.
    #[serde(default)]
    pub variants: Vec<String>,
}

impl OneOf {
    pub fn new(name: impl Into<String>, variants: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output of schema parsing, consumed by code generation.
///
/// The maps are unordered; generators must sort names before emitting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaModel {
    #[serde(default)]
    pub structs: HashMap<String, Struct>,
    #[serde(default)]
    pub aliases: HashMap<String, Field>,
    #[serde(default, rename = "one_of")]
    pub one_ofs: HashMap<String, OneOf>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a struct, keyed by its name.
    pub fn with_struct(mut self, s: Struct) -> Self {
        self.structs.insert(s.name.clone(), s);
        self
    }

    /// Add an alias, keyed by the field name.
    pub fn with_alias(mut self, alias: Field) -> Self {
        self.aliases.insert(alias.name.clone(), alias);
        self
    }

    /// Add a one-of group, keyed by its name.
    pub fn with_one_of(mut self, one_of: OneOf) -> Self {
        self.one_ofs.insert(one_of.name.clone(), one_of);
        self
    }

    /// Check if the model defines nothing.
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty() && self.aliases.is_empty() && self.one_ofs.is_empty()
    }
}
