// Copyright (c) Facebook, Inc. and its affiliates
// SPDX-License-Identifier: MIT OR Apache-2.0

//!
//! Rust code generator for records, derived from serde reflection's generator.
//! Containers become structs with optional fields plus a `Record` impl carrying
//! the field-to-wire-key table, so generated models never rely on serde
//! attributes for their mapping.
//!
use crate::config::CodeGeneratorConfig;
use crate::error::BindgenError;
use crate::record::FieldKind;
use serde_generate::indent::{IndentConfig, IndentedWriter};
use serde_reflection::{ContainerFormat, Format, Named};
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use tracing::debug;

/// Container formats indexed by model name. Field names are wire keys.
pub type Registry = BTreeMap<String, ContainerFormat>;

/// Type name standing for `std::time::Duration` in a registry.
pub const DURATION_TYPE_NAME: &str = "Duration";

/// Strict and reserved keywords of the 2018 edition.
pub const RESERVED_WORDS: [&str; 51] = [
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_WORDS: [&str; 4] = ["crate", "self", "Self", "super"];

/// Main configuration object for code-generation in Rust.
pub struct CodeGenerator<'a> {
    /// Language-independent configuration.
    config: &'a CodeGeneratorConfig,
    /// Which derive macros should be added. `Default` is always added.
    derive_macros: Vec<String>,
    /// Whether definitions and fields should be marked as `pub`.
    track_visibility: bool,
}

/// Shared state for the code generation of a Rust source file.
struct RustEmitter<'a, T> {
    /// Writer.
    out: IndentedWriter<T>,
    /// Generator.
    generator: &'a CodeGenerator<'a>,
    /// Current namespace (e.g. vec!["my_package", "my_module", "MyClass"])
    current_namespace: Vec<String>,
}

/// A struct field resolved from its registry entry.
struct Field {
    wire_key: String,
    /// Rust identifier, possibly raw (`r#type`).
    ident: String,
    /// `ident` without the raw prefix, as used in the mapping table.
    property: String,
    kind: FieldKind,
}

impl<'a> CodeGenerator<'a> {
    /// Create a Rust code generator for the given config.
    pub fn new(config: &'a CodeGeneratorConfig) -> Self {
        Self {
            config,
            derive_macros: vec!["Clone", "Debug", "Default", "PartialEq"]
                .into_iter()
                .map(String::from)
                .collect(),
            track_visibility: true,
        }
    }

    /// Which derive macros should be added.
    pub fn with_derive_macros(mut self, derive_macros: Vec<String>) -> Self {
        self.derive_macros = derive_macros;
        self
    }

    /// Whether definitions and fields should be marked as `pub`.
    pub fn with_track_visibility(mut self, track_visibility: bool) -> Self {
        self.track_visibility = track_visibility;
        self
    }

    fn derive_list(&self) -> String {
        let mut derive_macros = self.derive_macros.clone();
        // Record::from_document starts from Default.
        if !derive_macros.iter().any(|m| m == "Default") {
            derive_macros.push("Default".to_string());
        }
        derive_macros.join(", ")
    }

    /// Write record definitions in Rust.
    pub fn output(&self, out: &mut dyn Write, registry: &Registry) -> Result<(), BindgenError> {
        let current_namespace = self
            .config
            .module_name
            .split('.')
            .map(String::from)
            .collect();
        let mut emitter = RustEmitter {
            out: IndentedWriter::new(out, IndentConfig::Space(4)),
            generator: self,
            current_namespace,
        };

        emitter.output_preamble()?;
        for (name, format) in registry {
            emitter.output_container(name, format)?;
        }
        Ok(())
    }
}

/// Converts a wire key such as `endpointUri` into `endpoint_uri`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '.' || c == ' ' {
            out.push('_');
        } else if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.map_or(false, |n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Turns a property name into a valid Rust identifier.
pub fn escape_identifier(name: &str) -> String {
    if NON_RAW_WORDS.contains(&name) {
        format!("{}_", name)
    } else if RESERVED_WORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

fn field_kind(format: &Format) -> Option<FieldKind> {
    use Format::*;
    match format {
        Option(inner) => field_kind(inner),
        Str => Some(FieldKind::String),
        Seq(inner) if matches!(**inner, Str) => Some(FieldKind::StringList),
        TypeName(name) if name == DURATION_TYPE_NAME => Some(FieldKind::Duration),
        Bool => Some(FieldKind::Boolean),
        I64 => Some(FieldKind::Integer),
        _ => None,
    }
}

fn resolve_field(container: &str, named: &Named<Format>) -> Result<Field, BindgenError> {
    let kind = field_kind(&named.value).ok_or_else(|| BindgenError::UnsupportedType {
        definition: container.to_string(),
        property: named.name.clone(),
        ty: format!("{:?}", named.value),
    })?;
    let ident = escape_identifier(&to_snake_case(&named.name));
    let property = ident.trim_start_matches("r#").to_string();
    Ok(Field {
        wire_key: named.name.clone(),
        ident,
        property,
        kind,
    })
}

impl<'a, T> RustEmitter<'a, T>
where
    T: std::io::Write,
{
    fn visibility(&self) -> &'static str {
        if self.generator.track_visibility {
            "pub "
        } else {
            ""
        }
    }

    fn output_comment(&mut self, path: &[&str]) -> std::io::Result<()> {
        let mut qualified = self.current_namespace.clone();
        qualified.extend(path.iter().map(|s| s.to_string()));
        if let Some(doc) = self.generator.config.comments.get(&qualified) {
            let text = textwrap::indent(doc, "/// ").replace("\n\n", "\n///\n");
            write!(self.out, "{}", text)?;
        }
        Ok(())
    }

    fn output_preamble(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "#![allow(unused_imports)]")?;
        writeln!(self.out, "use std::time::Duration;")?;
        writeln!(
            self.out,
            "use {}::record::{{noop_init, FieldKind, FieldMapping, FieldValue, InitHook, Record}};",
            self.generator.config.crate_path
        )?;
        for (module, definitions) in &self.generator.config.external_definitions {
            // Skip the empty module name.
            if !module.is_empty() {
                writeln!(
                    self.out,
                    "use {}::{{{}}};",
                    module,
                    definitions.to_vec().join(", "),
                )?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn quote_type(kind: FieldKind) -> &'static str {
        match kind {
            FieldKind::String => "String",
            FieldKind::StringList => "Vec<String>",
            FieldKind::Duration => "Duration",
            FieldKind::Boolean => "bool",
            FieldKind::Integer => "i64",
        }
    }

    fn quote_kind(kind: FieldKind) -> &'static str {
        match kind {
            FieldKind::String => "String",
            FieldKind::StringList => "StringList",
            FieldKind::Duration => "Duration",
            FieldKind::Boolean => "Boolean",
            FieldKind::Integer => "Integer",
        }
    }

    fn output_parameters(&mut self, fields: &[Field]) -> std::io::Result<()> {
        for field in fields {
            writeln!(
                self.out,
                "{}: Option<{}>,",
                field.ident,
                Self::quote_type(field.kind)
            )?;
        }
        Ok(())
    }

    fn output_struct(&mut self, name: &str, fields: &[Field]) -> std::io::Result<()> {
        self.output_comment(&[name])?;
        let vis = self.visibility();
        writeln!(self.out, "#[derive({})]", self.generator.derive_list())?;
        writeln!(self.out, "{}struct {} {{", vis, name)?;
        self.out.indent();
        for field in fields {
            self.output_comment(&[name, field.wire_key.as_str()])?;
            writeln!(
                self.out,
                "{}{}: Option<{}>,",
                vis,
                field.ident,
                Self::quote_type(field.kind)
            )?;
        }
        self.out.unindent();
        writeln!(self.out, "}}\n")
    }

    fn output_constructors(&mut self, name: &str, fields: &[Field]) -> std::io::Result<()> {
        let vis = self.visibility();
        let idents: Vec<&str> = fields.iter().map(|f| f.ident.as_str()).collect();

        writeln!(self.out, "impl {} {{", name)?;
        self.out.indent();

        writeln!(self.out, "{}fn new(", vis)?;
        self.out.indent();
        self.output_parameters(fields)?;
        self.out.unindent();
        writeln!(self.out, ") -> Self {{")?;
        self.out.indent();
        let mut arguments = idents.clone();
        arguments.push("noop_init");
        writeln!(self.out, "Self::new_with({})", arguments.join(", "))?;
        self.out.unindent();
        writeln!(self.out, "}}\n")?;

        writeln!(self.out, "{}fn new_with(", vis)?;
        self.out.indent();
        self.output_parameters(fields)?;
        writeln!(self.out, "init: InitHook<Self>,")?;
        self.out.unindent();
        writeln!(self.out, ") -> Self {{")?;
        self.out.indent();
        writeln!(self.out, "let mut record = Self {{")?;
        self.out.indent();
        for ident in &idents {
            writeln!(self.out, "{},", ident)?;
        }
        self.out.unindent();
        writeln!(self.out, "}};")?;
        writeln!(self.out, "init(&mut record);")?;
        writeln!(self.out, "record")?;
        self.out.unindent();
        writeln!(self.out, "}}")?;

        self.out.unindent();
        writeln!(self.out, "}}\n")
    }

    fn output_record_impl(&mut self, name: &str, fields: &[Field]) -> std::io::Result<()> {
        writeln!(self.out, "impl Record for {} {{", name)?;
        self.out.indent();

        writeln!(self.out, "const FIELDS: &'static [FieldMapping] = &[")?;
        self.out.indent();
        for field in fields {
            writeln!(
                self.out,
                "FieldMapping::new({:?}, {:?}, FieldKind::{}),",
                field.property,
                field.wire_key,
                Self::quote_kind(field.kind)
            )?;
        }
        self.out.unindent();
        writeln!(self.out, "];\n")?;

        writeln!(
            self.out,
            "fn field(&self, property: &str) -> Option<FieldValue> {{"
        )?;
        self.out.indent();
        writeln!(self.out, "match property {{")?;
        self.out.indent();
        for field in fields {
            let access = match field.kind {
                FieldKind::String | FieldKind::StringList => ".clone()",
                _ => "",
            };
            writeln!(
                self.out,
                "{:?} => self.{}{}.map(FieldValue::{}),",
                field.property,
                field.ident,
                access,
                Self::quote_kind(field.kind)
            )?;
        }
        writeln!(self.out, "_ => None,")?;
        self.out.unindent();
        writeln!(self.out, "}}")?;
        self.out.unindent();
        writeln!(self.out, "}}\n")?;

        writeln!(
            self.out,
            "fn set_field(&mut self, property: &str, value: FieldValue) {{"
        )?;
        self.out.indent();
        writeln!(self.out, "match (property, value) {{")?;
        self.out.indent();
        for field in fields {
            writeln!(
                self.out,
                "({:?}, FieldValue::{}(value)) => self.{} = Some(value),",
                field.property,
                Self::quote_kind(field.kind),
                field.ident
            )?;
        }
        writeln!(self.out, "_ => {{}}")?;
        self.out.unindent();
        writeln!(self.out, "}}")?;
        self.out.unindent();
        writeln!(self.out, "}}")?;

        self.out.unindent();
        writeln!(self.out, "}}\n")
    }

    fn output_container(&mut self, name: &str, format: &ContainerFormat) -> Result<(), BindgenError> {
        let fields = match format {
            ContainerFormat::Struct(fields) => fields
                .iter()
                .map(|named| resolve_field(name, named))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(BindgenError::UnsupportedContainer(name.to_string())),
        };
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.ident.as_str()) {
                return Err(BindgenError::DuplicateField {
                    definition: name.to_string(),
                    field: field.ident.clone(),
                });
            }
        }
        debug!(container = name, fields = fields.len(), "emitting record");

        self.output_struct(name, &fields)?;
        self.output_constructors(name, &fields)?;
        self.output_record_impl(name, &fields)?;
        writeln!(
            self.out,
            "{}::impl_record_serde!({});\n",
            self.generator.config.crate_path, name
        )?;
        Ok(())
    }
}
