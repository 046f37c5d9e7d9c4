//! Built-in Go renderer.

use std::collections::BTreeMap;

use structgen_ir::{Field, OneOf, Struct};

use super::Templates;
use crate::{OutputData, Result, builder::CodeBuilder};

const BANNER: &str = "// Code generated by structgen. DO NOT EDIT.";

const JSON_PATH: &str = "encoding/json";
const ERRORS_PATH: &str = "errors";
const BYTES_PATH: &str = "bytes";

/// Renders Go type declarations with `encoding/json` support.
///
/// Body layout: sentinel wrapper types, aliases, one-of interfaces, then
/// structs, each group in name order.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTemplates;

impl GoTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl Templates for GoTemplates {
    fn render_body(&self, data: &mut OutputData) -> Result<String> {
        let wrappers = used_empty_types(data);
        let unmarshalers = data
            .structs
            .iter()
            .any(|s| needs_unmarshal(s, data.always_accept_false));
        let required = data.structs.iter().any(Struct::has_required);
        let accept_false = data.always_accept_false && !data.structs.is_empty();

        let pkgs = Packages {
            json: register(data, JSON_PATH, !wrappers.is_empty() || unmarshalers),
            errors: register(data, ERRORS_PATH, required),
            bytes: register(data, BYTES_PATH, accept_false),
        };

        let mut b = CodeBuilder::new();
        for (wrapper, base) in &wrappers {
            b.push_blank();
            write_empty_type(&mut b, wrapper, base, &pkgs);
        }
        for alias in &data.aliases {
            b.push_blank();
            write_alias(&mut b, alias);
        }
        for one_of in data.one_ofs.values() {
            b.push_blank();
            write_one_of(&mut b, one_of);
        }
        for s in &data.structs {
            b.push_blank();
            write_struct(&mut b, s, data.backquote);
            if needs_unmarshal(s, data.always_accept_false) {
                b.push_blank();
                write_unmarshal(&mut b, s, data.always_accept_false, &pkgs);
            }
        }
        Ok(b.build())
    }

    fn render_header(&self, data: &OutputData) -> Result<String> {
        let mut b = CodeBuilder::new();
        b.push_line(BANNER)
            .push_blank()
            .push_line(&format!("package {}", data.package_name));

        if !data.imports.is_empty() {
            b.push_blank().push_line("import (").push_indent();
            for (path, alias) in data.imports.iter() {
                match alias {
                    Some(alias) => b.push_line(&format!("{alias} {}", go_quote(path))),
                    None => b.push_line(&go_quote(path)),
                };
            }
            b.push_dedent().push_line(")");
        }
        Ok(b.build())
    }
}

/// Names under which the standard packages are referenced.
struct Packages {
    json: &'static str,
    errors: &'static str,
    bytes: &'static str,
}

/// Register `path` when the body will reference it.
///
/// The returned name is only emitted by code paths that required it.
fn register(data: &mut OutputData, path: &'static str, needed: bool) -> &'static str {
    if needed { data.pkg(path) } else { "" }
}

/// Sentinel wrappers referenced by any struct field, keyed by wrapper name.
///
/// Empty when substitution is off: a field typed `EmptyString` then refers
/// to a type the model declares itself.
fn used_empty_types(data: &OutputData) -> BTreeMap<String, String> {
    if !data.use_empty_types {
        return BTreeMap::new();
    }
    data.empty_types
        .iter()
        .filter(|(_, wrapper)| {
            data.structs
                .iter()
                .flat_map(|s| s.fields.values())
                .any(|f| f.type_name == *wrapper)
        })
        .map(|(base, wrapper)| (wrapper.to_string(), base.to_string()))
        .collect()
}

fn needs_unmarshal(s: &Struct, always_accept_false: bool) -> bool {
    always_accept_false || s.has_required()
}

/// Quote a string as a Go interpreted string literal.
fn go_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Pad cells into columns the way gofmt aligns struct fields.
fn align(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(row.len().saturating_sub(1)) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i + 1 < row.len() {
                    line.push_str(&format!("{cell:<width$} ", width = widths[i]));
                } else {
                    line.push_str(cell);
                }
            }
            line
        })
        .collect()
}

fn write_doc(b: &mut CodeBuilder, name: &str, description: Option<&str>) {
    if let Some(description) = description {
        b.push_comment(&format!("{name} {description}"));
    }
}

fn write_empty_type(b: &mut CodeBuilder, wrapper: &str, base: &str, pkgs: &Packages) {
    let json = pkgs.json;
    b.push_comment(&format!(
        "{wrapper} holds an optional {base} and records whether it was set."
    ))
    .push_line(&format!("type {wrapper} struct {{"))
    .push_indent();
    for line in align(&[
        vec!["Value".to_string(), base.to_string()],
        vec!["Set".to_string(), "bool".to_string()],
    ]) {
        b.push_line(&line);
    }
    b.push_dedent().push_line("}");

    b.push_blank()
        .push_comment("MarshalJSON encodes the value, or null when it was never set.")
        .push_line(&format!("func (e {wrapper}) MarshalJSON() ([]byte, error) {{"))
        .push_indent()
        .push_line("if !e.Set {")
        .push_indent()
        .push_line("return []byte(\"null\"), nil")
        .push_dedent()
        .push_line("}")
        .push_line(&format!("return {json}.Marshal(e.Value)"))
        .push_dedent()
        .push_line("}");

    b.push_blank()
        .push_comment("UnmarshalJSON stores the value and marks it as set.")
        .push_line(&format!("func (e *{wrapper}) UnmarshalJSON(b []byte) error {{"))
        .push_indent()
        .push_line("e.Set = true")
        .push_line(&format!("return {json}.Unmarshal(b, &e.Value)"))
        .push_dedent()
        .push_line("}");
}

fn write_alias(b: &mut CodeBuilder, alias: &Field) {
    write_doc(b, &alias.name, alias.description.as_deref());
    b.push_line(&format!("type {} {}", alias.name, alias.type_name));
}

fn write_one_of(b: &mut CodeBuilder, one_of: &OneOf) {
    let name = &one_of.name;
    let marker = format!("is{name}");
    match one_of.description.as_deref() {
        Some(description) => b.push_comment(&format!("{name} {description}")),
        None => b.push_comment(&format!("{name} is one of: {}.", one_of.variants.join(", "))),
    };
    b.push_line(&format!("type {name} interface {{"))
        .push_indent()
        .push_line(&format!("{marker}()"))
        .push_dedent()
        .push_line("}");

    for variant in &one_of.variants {
        b.push_blank()
            .push_line(&format!("func ({variant}) {marker}() {{}}"));
    }
}

fn write_struct(b: &mut CodeBuilder, s: &Struct, backquote: &str) {
    write_doc(b, &s.name, s.description.as_deref());

    if s.fields.is_empty() {
        let value = s.additional().unwrap_or("interface{}");
        b.push_line(&format!("type {} map[string]{value}", s.name));
        return;
    }

    let mut docs = Vec::with_capacity(s.fields.len() + 1);
    let mut rows = Vec::with_capacity(s.fields.len() + 1);
    for field in s.fields.values() {
        let omit = if field.required { "" } else { ",omitempty" };
        docs.push(field.description.as_deref());
        rows.push(vec![
            field.name.clone(),
            field.type_name.clone(),
            format!("{backquote}json:\"{}{omit}\"{backquote}", field.json_key()),
        ]);
    }
    if let Some(additional) = s.additional() {
        docs.push(None);
        rows.push(vec![
            "AdditionalProperties".to_string(),
            format!("map[string]{additional}"),
            format!("{backquote}json:\"-\"{backquote}"),
        ]);
    }

    b.push_line(&format!("type {} struct {{", s.name)).push_indent();
    for (doc, line) in docs.into_iter().zip(align(&rows)) {
        if let Some(doc) = doc {
            b.push_comment(doc);
        }
        b.push_line(&line);
    }
    b.push_dedent().push_line("}");
}

fn write_unmarshal(b: &mut CodeBuilder, s: &Struct, always_accept_false: bool, pkgs: &Packages) {
    let name = &s.name;
    let json = pkgs.json;

    b.push_comment("UnmarshalJSON implements json.Unmarshaler.")
        .push_line(&format!("func (strct *{name}) UnmarshalJSON(b []byte) error {{"))
        .push_indent();

    if always_accept_false {
        let bytes = pkgs.bytes;
        b.push_line(&format!(
            "if {bytes}.Equal({bytes}.TrimSpace(b), []byte(\"false\")) {{"
        ))
        .push_indent()
        .push_line(&format!("*strct = {name}{{}}"))
        .push_line("return nil")
        .push_dedent()
        .push_line("}");
    }

    let required: Vec<String> = s
        .fields
        .values()
        .filter(|f| f.required)
        .map(|f| go_quote(f.json_key()))
        .collect();
    if !required.is_empty() {
        let errors = pkgs.errors;
        b.push_line(&format!("var raw map[string]{json}.RawMessage"))
            .push_line(&format!("if err := {json}.Unmarshal(b, &raw); err != nil {{"))
            .push_indent()
            .push_line("return err")
            .push_dedent()
            .push_line("}")
            .push_line(&format!(
                "for _, key := range []string{{{}}} {{",
                required.join(", ")
            ))
            .push_indent()
            .push_line("if _, ok := raw[key]; !ok {")
            .push_indent()
            .push_line(&format!(
                "return {errors}.New({} + key)",
                go_quote(&format!("{name}: missing required field "))
            ))
            .push_dedent()
            .push_line("}")
            .push_dedent()
            .push_line("}");
    }

    b.push_line(&format!("type plain {name}"))
        .push_line(&format!("return {json}.Unmarshal(b, (*plain)(strct))"))
        .push_dedent()
        .push_line("}");
}
