//! Manifest types and parsing for structgen.toml files.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use structgen_core::{EmptyTypes, clean_package_name};

use crate::{Error, Result, error::SourceContext};

/// Root manifest for structgen.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generated package settings
    pub output: OutputConfig,

    /// Custom header/body templates; the built-in Go renderer is used when absent
    #[serde(default)]
    pub templates: Option<TemplatesConfig>,

    /// Extra or overriding sentinel wrapper types (base type -> wrapper type)
    #[serde(default)]
    pub empty_types: BTreeMap<String, String>,
}

/// `[output]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Candidate package name (sanitized before use)
    pub package: String,
    #[serde(default)]
    pub always_accept_false: bool,
    #[serde(default)]
    pub use_empty_types: bool,
}

/// `[templates]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    pub header: PathBuf,
    pub body: PathBuf,
}

impl TemplatesConfig {
    /// Resolve relative template paths against `base`.
    pub fn resolve(&self, base: &Path) -> Self {
        Self {
            header: base.join(&self.header),
            body: base.join(&self.body),
        }
    }
}

impl Manifest {
    /// Parse a structgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        manifest.validate(&ctx)?;
        Ok(manifest)
    }

    /// Default sentinel table with the `[empty_types]` entries applied on top.
    pub fn empty_types(&self) -> EmptyTypes {
        self.empty_types
            .iter()
            .fold(EmptyTypes::default(), |table, (base, wrapper)| {
                table.with(base, wrapper)
            })
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if clean_package_name(&self.output.package).is_empty() {
            return Err(ctx.validation_error(
                format!(
                    "package name '{}' is empty once '.', '_' and '-' are removed",
                    self.output.package
                ),
                &format!("\"{}\"", self.output.package),
            ));
        }

        for (base, wrapper) in &self.empty_types {
            if base.trim().is_empty() {
                return Err(ctx.validation_error("empty_types key must not be empty", "\"\""));
            }
            if wrapper.trim().is_empty() {
                return Err(ctx.validation_error(
                    format!("empty_types.{base} must name a wrapper type"),
                    base,
                ));
            }
        }

        Ok(())
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "structgen.toml")
    }
}
