//! User-supplied templates rendered with minijinja.

use std::{
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use minijinja::{
    Environment, ErrorKind, Output, State, UndefinedBehavior,
    value::{Value, ValueKind, ViaDeserialize},
};
use structgen_ir::{Field, Struct};

use super::{Stage, Templates};
use crate::{Error, OutputData, Result, generation::ImportRegistry};

/// Header and body templates in Jinja syntax.
///
/// Templates see every [`OutputData`] field by name (`package_name`,
/// `structs`, `aliases`, `one_ofs`, `empty_types`, `use_empty_types`,
/// `always_accept_false`, `backquote`, `imports`) and can call:
///
/// - `pkg(path)` / `pkg(alias, path)` - register an import (body only)
/// - `no_prop(struct)` - struct has no fields and no additional type
/// - `is_pointer(field)` - field type starts with `*`
///
/// Undefined variables are errors. Booleans print as Go literals
/// (`true` / `false`).
///
/// # Example
///
/// ```
/// use structgen_codegen::{JinjaTemplates, OutputOptions, output};
/// use structgen_ir::{SchemaModel, Struct};
///
/// let templates = JinjaTemplates::new(
///     "package {{ package_name }}\n{% for i in imports %}import \"{{ i.path }}\"\n{% endfor %}",
///     "{% for s in structs %}var _ {{ pkg('fmt') }}.Stringer // {{ s.name }}\n{% endfor %}",
/// )
/// .unwrap();
///
/// let model = SchemaModel::new().with_struct(Struct::new("User"));
/// let mut out = Vec::new();
/// output(&mut out, &model, &templates, &OutputOptions::new("models")).unwrap();
///
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "package models\nimport \"fmt\"\nvar _ fmt.Stringer // User\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JinjaTemplates {
    header: String,
    body: String,
}

impl JinjaTemplates {
    /// Compile-check and store the two templates.
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Result<Self> {
        let templates = Self {
            header: header.into(),
            body: body.into(),
        };
        templates.environment(Stage::Header)?;
        templates.environment(Stage::Body)?;
        Ok(templates)
    }

    /// Load both templates from disk.
    pub fn from_files(header: &Path, body: &Path) -> Result<Self> {
        let read = |stage: Stage, path: &Path| {
            std::fs::read_to_string(path).map_err(|source| Error::ReadTemplate {
                stage,
                path: path.to_path_buf(),
                source,
            })
        };
        Self::new(read(Stage::Header, header)?, read(Stage::Body, body)?)
    }

    fn source(&self, stage: Stage) -> &str {
        match stage {
            Stage::Header => &self.header,
            Stage::Body => &self.body,
        }
    }

    /// Environment holding the template for `stage` plus the read-only helpers.
    fn environment(&self, stage: Stage) -> Result<Environment<'_>> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_formatter(format_value);
        env.add_function("no_prop", |s: ViaDeserialize<Struct>| s.no_prop());
        env.add_function("is_pointer", |f: ViaDeserialize<Field>| f.is_pointer());
        env.add_template(stage.as_str(), self.source(stage))
            .map_err(|source| Error::InvalidTemplate { stage, source })?;
        Ok(env)
    }

    fn render(&self, env: &Environment<'_>, stage: Stage, data: &OutputData) -> Result<String> {
        env.get_template(stage.as_str())
            .and_then(|template| template.render(data))
            .map_err(|e| Error::render(stage, e))
    }
}

/// Print booleans as Go literals instead of `True` / `False`.
fn format_value(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    if value.kind() == ValueKind::Bool {
        write!(out, "{}", value.is_true())?;
        Ok(())
    } else {
        minijinja::escape_formatter(out, state, value)
    }
}

/// `pkg()` in the header: imports are already final by then.
fn pkg_in_header(_: String, _: Option<String>) -> std::result::Result<String, minijinja::Error> {
    Err(minijinja::Error::new(
        ErrorKind::InvalidOperation,
        "pkg() registers imports and is only available in the body template",
    ))
}

impl Templates for JinjaTemplates {
    fn render_body(&self, data: &mut OutputData) -> Result<String> {
        let registry = Arc::new(Mutex::new(ImportRegistry::new()));
        let mut env = self.environment(Stage::Body)?;

        let shared = Arc::clone(&registry);
        env.add_function("pkg", move |first: String, path: Option<String>| {
            let mut imports = shared.lock().unwrap_or_else(PoisonError::into_inner);
            match path {
                Some(path) => imports.pkg_as(&first, &path).to_string(),
                None => imports.pkg(&first).to_string(),
            }
        });

        let body = self.render(&env, Stage::Body, data)?;
        let imports = registry.lock().unwrap_or_else(PoisonError::into_inner);
        data.imports.merge(&imports);
        Ok(body)
    }

    fn render_header(&self, data: &OutputData) -> Result<String> {
        let mut env = self.environment(Stage::Header)?;
        env.add_function("pkg", pkg_in_header);
        self.render(&env, Stage::Header, data)
    }
}
