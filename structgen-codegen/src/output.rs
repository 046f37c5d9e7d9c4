//! Rendering context assembly and the two-pass output protocol.

use std::{collections::BTreeMap, io::Write};

use serde::Serialize;
use structgen_core::{EmptyTypes, clean_package_name, sorted_keys};
use structgen_ir::{Field, OneOf, SchemaModel, Struct};
use tracing::{debug, info};

use crate::{Result, Templates, generation::ImportRegistry};

/// Caller-supplied settings for one [`output`] call.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Candidate package name; sanitized before use.
    pub package_name: String,
    /// Forwarded to templates: accept a bare `false` document as an empty value.
    pub always_accept_false: bool,
    /// Substitute sentinel wrapper types on optional fields.
    pub use_empty_types: bool,
    /// Base type -> sentinel wrapper type.
    pub empty_types: EmptyTypes,
}

impl OutputOptions {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            always_accept_false: false,
            use_empty_types: false,
            empty_types: EmptyTypes::default(),
        }
    }

    pub fn always_accept_false(mut self, enabled: bool) -> Self {
        self.always_accept_false = enabled;
        self
    }

    pub fn use_empty_types(mut self, enabled: bool) -> Self {
        self.use_empty_types = enabled;
        self
    }

    pub fn empty_types(mut self, table: EmptyTypes) -> Self {
        self.empty_types = table;
        self
    }
}

/// Everything the templates see.
///
/// Built fresh for every [`output`] call and never shared between calls.
#[derive(Debug, Clone, Serialize)]
pub struct OutputData {
    /// Filled while the body renders, read by the header.
    pub imports: ImportRegistry,
    pub package_name: String,
    /// Structs in ascending name order.
    pub structs: Vec<Struct>,
    /// Aliases in ascending name order.
    pub aliases: Vec<Field>,
    pub one_ofs: BTreeMap<String, OneOf>,
    pub empty_types: EmptyTypes,
    /// Whether optional fields were rewritten to sentinel wrapper types.
    pub use_empty_types: bool,
    pub always_accept_false: bool,
    /// A literal backquote, for templates emitting struct tags.
    pub backquote: &'static str,
}

impl OutputData {
    /// Build the rendering context for `model`.
    ///
    /// Structs are cloned before substitution; `model` is left untouched.
    pub fn assemble(model: &SchemaModel, options: &OutputOptions) -> Self {
        let mut structs = Vec::with_capacity(model.structs.len());
        for name in sorted_keys(&model.structs) {
            let mut s = model.structs[name].clone();
            if options.use_empty_types {
                let replaced = substitute_empty_types(&mut s, &options.empty_types);
                debug!(name, replaced, "substituted empty types");
            }
            structs.push(s);
        }

        let aliases = sorted_keys(&model.aliases)
            .into_iter()
            .map(|name| model.aliases[name].clone())
            .collect();

        let one_ofs = model
            .one_ofs
            .iter()
            .map(|(name, one_of)| (name.clone(), one_of.clone()))
            .collect();

        Self {
            imports: ImportRegistry::new(),
            package_name: clean_package_name(&options.package_name),
            structs,
            aliases,
            one_ofs,
            empty_types: options.empty_types.clone(),
            use_empty_types: options.use_empty_types,
            always_accept_false: options.always_accept_false,
            backquote: "`",
        }
    }

    /// Register an import and return the name to refer to it by.
    pub fn pkg<'a>(&mut self, path: &'a str) -> &'a str {
        self.imports.pkg(path)
    }

    /// Register an import under an explicit alias and return the alias.
    pub fn pkg_as<'a>(&mut self, alias: &'a str, path: &str) -> &'a str {
        self.imports.pkg_as(alias, path)
    }

    /// Render the body, then the header, and return header + body bytes.
    ///
    /// The header pass runs second because only the body pass discovers
    /// which imports are needed.
    pub fn render<T: Templates + ?Sized>(&mut self, templates: &T) -> Result<Vec<u8>> {
        let body = templates.render_body(self)?;
        let header = templates.render_header(self)?;

        let mut out = Vec::with_capacity(header.len() + body.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(body.as_bytes());
        Ok(out)
    }
}

/// Replace the type of every optional field that has a sentinel wrapper.
///
/// Returns the number of fields rewritten. Required fields are never touched.
pub fn substitute_empty_types(s: &mut Struct, table: &EmptyTypes) -> usize {
    let mut replaced = 0;
    for field in s.fields.values_mut().filter(|f| !f.required) {
        if let Some(wrapper) = table.get(&field.type_name) {
            field.type_name = wrapper.to_string();
            replaced += 1;
        }
    }
    replaced
}

/// Generate source for `model` and write it to `w`.
///
/// Nothing is written unless both passes succeed. `w` is neither flushed
/// nor closed.
pub fn output<W, T>(
    w: &mut W,
    model: &SchemaModel,
    templates: &T,
    options: &OutputOptions,
) -> Result<()>
where
    W: Write + ?Sized,
    T: Templates + ?Sized,
{
    let mut data = OutputData::assemble(model, options);
    let bytes = data.render(templates)?;
    w.write_all(&bytes)?;

    info!(
        package = %data.package_name,
        structs = data.structs.len(),
        aliases = data.aliases.len(),
        imports = data.imports.len(),
        bytes = bytes.len(),
        "generated source"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Stage};

    fn model() -> SchemaModel {
        SchemaModel::new()
            .with_struct(Struct::new("b"))
            .with_struct(Struct::new("a"))
            .with_struct(Struct::new("c"))
            .with_alias(Field::new("z", "int"))
            .with_alias(Field::new("y", "string"))
    }

    /// Body registers the struct names as imports; header lists them.
    struct Recording;

    impl Templates for Recording {
        fn render_body(&self, data: &mut OutputData) -> Result<String> {
            let names: Vec<String> = data.structs.iter().map(|s| s.name.clone()).collect();
            for name in &names {
                data.pkg(&format!("example.com/{name}"));
            }
            Ok(format!("body:{}\n", names.join(",")))
        }

        fn render_header(&self, data: &OutputData) -> Result<String> {
            let paths: Vec<&str> = data.imports.iter().map(|(p, _)| p).collect();
            Ok(format!("header:{}:{}\n", data.package_name, paths.join(",")))
        }
    }

    struct FailingBody;

    impl Templates for FailingBody {
        fn render_body(&self, _: &mut OutputData) -> Result<String> {
            Err(Error::render(Stage::Body, "boom"))
        }

        fn render_header(&self, _: &OutputData) -> Result<String> {
            Ok("header\n".to_string())
        }
    }

    struct FailingHeader;

    impl Templates for FailingHeader {
        fn render_body(&self, _: &mut OutputData) -> Result<String> {
            Ok("body\n".to_string())
        }

        fn render_header(&self, _: &OutputData) -> Result<String> {
            Err(Error::render(Stage::Header, "boom"))
        }
    }

    #[test]
    fn test_assemble_orders_structs_and_aliases() {
        let data = OutputData::assemble(&model(), &OutputOptions::new("models"));

        let structs: Vec<&str> = data.structs.iter().map(|s| s.name.as_str()).collect();
        let aliases: Vec<&str> = data.aliases.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(structs, vec!["a", "b", "c"]);
        assert_eq!(aliases, vec!["y", "z"]);
        assert!(data.imports.is_empty());
        assert_eq!(data.backquote, "`");
    }

    #[test]
    fn test_assemble_sanitizes_package_name() {
        let data = OutputData::assemble(&model(), &OutputOptions::new("my.pkg_name-1"));
        assert_eq!(data.package_name, "mypkgname1");
    }

    #[test]
    fn test_assemble_forwards_flags() {
        let options = OutputOptions::new("m")
            .always_accept_false(true)
            .empty_types(EmptyTypes::new().with("int", "OptInt"));
        let data = OutputData::assemble(&model(), &options);
        assert!(data.always_accept_false);
        assert!(!data.use_empty_types);
        assert_eq!(data.empty_types.get("int"), Some("OptInt"));
    }

    #[test]
    fn test_substitute_empty_types() {
        let mut s = Struct::new("S")
            .with_field(Field::new("Name", "string"))
            .with_field(Field::new("ID", "string").required())
            .with_field(Field::new("Tags", "[]string"));

        let replaced = substitute_empty_types(&mut s, &EmptyTypes::default());

        assert_eq!(replaced, 1);
        assert_eq!(s.fields["Name"].type_name, "EmptyString");
        assert_eq!(s.fields["ID"].type_name, "string");
        assert_eq!(s.fields["Tags"].type_name, "[]string");
    }

    #[test]
    fn test_empty_types_disabled() {
        let model = SchemaModel::new()
            .with_struct(Struct::new("S").with_field(Field::new("Name", "string")));

        let data = OutputData::assemble(&model, &OutputOptions::new("m"));
        assert_eq!(data.structs[0].fields["Name"].type_name, "string");
    }

    #[test]
    fn test_render_runs_body_before_header() {
        let mut data = OutputData::assemble(&model(), &OutputOptions::new("models"));
        let bytes = data.render(&Recording).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "header:models:example.com/a,example.com/b,example.com/c\nbody:a,b,c\n"
        );
        assert_eq!(data.imports.len(), 3);
    }

    #[test]
    fn test_output_writes_header_then_body() {
        let mut out = Vec::new();
        output(&mut out, &model(), &Recording, &OutputOptions::new("models")).unwrap();
        assert!(out.starts_with(b"header:models:"));
        assert!(out.ends_with(b"body:a,b,c\n"));
    }

    #[test]
    fn test_output_body_failure_writes_nothing() {
        let mut out = Vec::new();
        let err = output(&mut out, &model(), &FailingBody, &OutputOptions::new("m")).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Body));
        assert!(out.is_empty());
    }

    #[test]
    fn test_output_header_failure_writes_nothing() {
        let mut out = Vec::new();
        let err =
            output(&mut out, &model(), &FailingHeader, &OutputOptions::new("m")).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Header));
        assert!(out.is_empty());
    }
}
