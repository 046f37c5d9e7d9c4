//! End-to-end tests for context assembly and the two-pass render.

use std::collections::HashMap;

use structgen_codegen::{
    GoTemplates, JinjaTemplates, OutputData, OutputOptions, Result, Templates, output,
};
use structgen_ir::{Field, OneOf, SchemaModel, Struct};

/// The model every test starts from: one optional string, one required int alias.
fn scenario() -> SchemaModel {
    SchemaModel::new()
        .with_struct(Struct::new("S").with_field(Field::new("X", "string")))
        .with_alias(Field::new("A", "int").required())
}

fn render<T>(model: &SchemaModel, templates: &T, options: &OutputOptions) -> String
where
    T: Templates + ?Sized,
{
    let mut out = Vec::new();
    output(&mut out, model, templates, options).expect("render failed");
    String::from_utf8(out).expect("output is not UTF-8")
}

/// Same names inserted in a different order, so the hash maps differ internally.
fn model_in_order(names: &[&str]) -> SchemaModel {
    let mut model = SchemaModel::new();
    for name in names {
        model = model
            .with_struct(
                Struct::new(*name)
                    .with_field(Field::new("Name", "string"))
                    .with_field(Field::new("ID", "int").required()),
            )
            .with_alias(Field::new(format!("{name}ID"), "int"));
    }
    model
}

/// Registers the same import path repeatedly, then lists what the header sees.
struct Repeating;

impl Templates for Repeating {
    fn render_body(&self, data: &mut OutputData) -> Result<String> {
        let mut names = Vec::new();
        for _ in 0..3 {
            names.push(data.pkg("github.com/acme/types").to_string());
        }
        names.push(data.pkg_as("yaml", "gopkg.in/yaml.v3").to_string());
        names.push(data.pkg_as("yml", "gopkg.in/yaml.v3").to_string());
        Ok(names.join(" "))
    }

    fn render_header(&self, data: &OutputData) -> Result<String> {
        let lines: Vec<String> = data
            .imports
            .iter()
            .map(|(path, alias)| format!("{} {path}", alias.unwrap_or("_")))
            .collect();
        Ok(format!("{}\n", lines.join("\n")))
    }
}

#[test]
fn test_scenario_context() {
    let data = OutputData::assemble(&scenario(), &OutputOptions::new("out").use_empty_types(true));

    assert_eq!(data.structs.len(), 1);
    assert_eq!(data.structs[0].fields["X"].type_name, "EmptyString");
    assert_eq!(data.aliases.len(), 1);
    assert_eq!(data.aliases[0].type_name, "int");
    assert!(data.imports.is_empty());
}

#[test]
fn test_scenario_go_output() {
    let source = render(
        &scenario(),
        &GoTemplates::new(),
        &OutputOptions::new("out").use_empty_types(true),
    );

    assert!(source.starts_with(
        "// Code generated by structgen. DO NOT EDIT.\n\npackage out\n\nimport (\n\t\"encoding/json\"\n)\n"
    ));
    assert!(source.contains("type EmptyString struct {\n"));
    assert!(source.contains("\ntype A int\n"));
    assert!(source.contains("\tX EmptyString `json:\"X,omitempty\"`\n"));
    assert!(!source.contains("\"errors\""));
}

#[test]
fn test_output_is_deterministic() {
    let options = OutputOptions::new("models").use_empty_types(true);
    let a = model_in_order(&["Zeta", "alpha", "Beta", "_hidden", "Alpha"]);
    let b = model_in_order(&["Alpha", "_hidden", "Beta", "alpha", "Zeta"]);

    let first = render(&a, &GoTemplates::new(), &options);
    assert_eq!(first, render(&a, &GoTemplates::new(), &options));
    assert_eq!(first, render(&b, &GoTemplates::new(), &options));
}

#[test]
fn test_structs_and_aliases_in_byte_order() {
    let model = model_in_order(&["b", "B", "a", "_x", "A1"]);
    let data = OutputData::assemble(&model, &OutputOptions::new("models"));

    let structs: Vec<&str> = data.structs.iter().map(|s| s.name.as_str()).collect();
    insta::assert_debug_snapshot!(structs, @r#"
    [
        "A1",
        "B",
        "_x",
        "a",
        "b",
    ]
    "#);

    let aliases: Vec<&str> = data.aliases.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(aliases, vec!["A1ID", "BID", "_xID", "aID", "bID"]);
}

#[test]
fn test_empty_model() {
    let source = render(&SchemaModel::new(), &GoTemplates::new(), &OutputOptions::new("empty"));
    assert_eq!(
        source,
        "// Code generated by structgen. DO NOT EDIT.\n\npackage empty\n"
    );
}

#[test]
fn test_source_model_not_mutated() {
    let model = model_in_order(&["User", "Team"]);
    let before = model.clone();

    render(
        &model,
        &GoTemplates::new(),
        &OutputOptions::new("m").use_empty_types(true).always_accept_false(true),
    );

    assert_eq!(model, before);
    assert_eq!(model.structs["User"].fields["Name"].type_name, "string");
}

#[test]
fn test_import_registration_is_idempotent() {
    let source = render(&scenario(), &Repeating, &OutputOptions::new("m"));

    assert_eq!(
        source,
        "_ github.com/acme/types\nyml gopkg.in/yaml.v3\ntypes types types yaml yml"
    );
}

#[test]
fn test_custom_empty_types_table() {
    let model = SchemaModel::new().with_struct(
        Struct::new("S")
            .with_field(Field::new("Count", "int64"))
            .with_field(Field::new("Name", "string")),
    );
    let options = OutputOptions::new("m")
        .use_empty_types(true)
        .empty_types(structgen_core::EmptyTypes::new().with("int64", "OptInt64"));

    let data = OutputData::assemble(&model, &options);
    assert_eq!(data.structs[0].fields["Count"].type_name, "OptInt64");
    assert_eq!(data.structs[0].fields["Name"].type_name, "string");
}

#[test]
fn test_one_ofs_passed_through() {
    let mut one_ofs = HashMap::new();
    one_ofs.insert("Shape".to_string(), OneOf::new("Shape", ["Square", "Circle"]));
    let model = SchemaModel {
        one_ofs,
        ..scenario()
    };

    let data = OutputData::assemble(&model, &OutputOptions::new("m"));
    assert_eq!(data.one_ofs["Shape"].variants, vec!["Square", "Circle"]);
}

#[test]
fn test_jinja_two_pass_render() {
    let templates = JinjaTemplates::new(
        "package {{ package_name }}\n{% if imports %}\nimport (\n{% for i in imports %}\t\"{{ i.path }}\"\n{% endfor %})\n{% endif %}",
        "{% for s in structs %}\ntype {{ s.name }} struct {\n{% for key in s.fields %}{% set f = s.fields[key] %}\t{{ f.name }} {{ f.type }} {{ backquote }}json:\"{{ f.json_name }}\"{{ backquote }}\n{% endfor %}}\n\nvar _ = {{ pkg('encoding/json') }}.Marshal\n{% endfor %}",
    )
    .unwrap();

    let source = render(
        &scenario(),
        &templates,
        &OutputOptions::new("my_pkg").use_empty_types(true),
    );

    assert_eq!(
        source,
        "package mypkg\n\nimport (\n\t\"encoding/json\"\n)\n\ntype S struct {\n\tX EmptyString `json:\"X\"`\n}\n\nvar _ = json.Marshal\n"
    );
}

#[test]
fn test_go_output_snapshot() {
    let model = SchemaModel::new()
        .with_alias(Field::new("ID", "int").with_description("identifies a user."))
        .with_one_of(OneOf::new("Shape", ["Circle", "Square"]))
        .with_struct(Struct::new("Circle").with_field(Field::new("Radius", "float64")))
        .with_struct(
            Struct::new("User")
                .with_description("is an account.")
                .with_field(Field::new("ID", "ID").with_json_name("id").required())
                .with_field(
                    Field::new("Name", "string")
                        .with_json_name("name")
                        .with_description("Display name."),
                )
                .with_field(Field::new("Tags", "[]string").with_json_name("tags")),
        );
    let options = OutputOptions::new("models")
        .use_empty_types(true)
        .always_accept_false(true);

    let source = render(&model, &GoTemplates::new(), &options);
    insta::assert_snapshot!(source, @r#"
// Code generated by structgen. DO NOT EDIT.

package models

import (
	"bytes"
	"encoding/json"
	"errors"
)

// EmptyFloat64 holds an optional float64 and records whether it was set.
type EmptyFloat64 struct {
	Value float64
	Set   bool
}

// MarshalJSON encodes the value, or null when it was never set.
func (e EmptyFloat64) MarshalJSON() ([]byte, error) {
	if !e.Set {
		return []byte("null"), nil
	}
	return json.Marshal(e.Value)
}

// UnmarshalJSON stores the value and marks it as set.
func (e *EmptyFloat64) UnmarshalJSON(b []byte) error {
	e.Set = true
	return json.Unmarshal(b, &e.Value)
}

// EmptyString holds an optional string and records whether it was set.
type EmptyString struct {
	Value string
	Set   bool
}

// MarshalJSON encodes the value, or null when it was never set.
func (e EmptyString) MarshalJSON() ([]byte, error) {
	if !e.Set {
		return []byte("null"), nil
	}
	return json.Marshal(e.Value)
}

// UnmarshalJSON stores the value and marks it as set.
func (e *EmptyString) UnmarshalJSON(b []byte) error {
	e.Set = true
	return json.Unmarshal(b, &e.Value)
}

// ID identifies a user.
type ID int

// Shape is one of: Circle, Square.
type Shape interface {
	isShape()
}

func (Circle) isShape() {}

func (Square) isShape() {}

type Circle struct {
	Radius EmptyFloat64 `json:"Radius,omitempty"`
}

// UnmarshalJSON implements json.Unmarshaler.
func (strct *Circle) UnmarshalJSON(b []byte) error {
	if bytes.Equal(bytes.TrimSpace(b), []byte("false")) {
		*strct = Circle{}
		return nil
	}
	type plain Circle
	return json.Unmarshal(b, (*plain)(strct))
}

// User is an account.
type User struct {
	ID   ID          `json:"id"`
	// Display name.
	Name EmptyString `json:"name,omitempty"`
	Tags []string    `json:"tags,omitempty"`
}

// UnmarshalJSON implements json.Unmarshaler.
func (strct *User) UnmarshalJSON(b []byte) error {
	if bytes.Equal(bytes.TrimSpace(b), []byte("false")) {
		*strct = User{}
		return nil
	}
	var raw map[string]json.RawMessage
	if err := json.Unmarshal(b, &raw); err != nil {
		return err
	}
	for _, key := range []string{"id"} {
		if _, ok := raw[key]; !ok {
			return errors.New("User: missing required field " + key)
		}
	}
	type plain User
	return json.Unmarshal(b, (*plain)(strct))
}
"#);
}
