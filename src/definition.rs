use crate::config::{CodeGeneratorConfig, DocComments};
use crate::emit::{CodeGenerator, Registry, DURATION_TYPE_NAME};
use crate::error::BindgenError;
use serde::{Deserialize, Serialize};
use serde_reflection::{ContainerFormat, Format, Named};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// The part of an API definitions document the generator reads.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DefinitionExport {
    #[serde(default)]
    definitions: BTreeMap<String, Definition>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Definition {
    description: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, Property>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Property {
    r#type: Option<String>,
    format: Option<String>,
    items: Option<Box<Property>>,
    description: Option<String>,
}

impl DefinitionExport {
    pub fn definition_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

pub fn generate_records(
    config: &CodeGeneratorConfig,
    out: &mut dyn Write,
    registry: &Registry,
) -> Result<(), BindgenError> {
    CodeGenerator::new(config).output(out, registry)
}

/// Builds a registry with one struct per definition. Every property is optional.
pub fn export_definitions_to_registry(export: &DefinitionExport) -> Result<Registry, BindgenError> {
    let mut registry = Registry::new();
    for (name, definition) in &export.definitions {
        if definition.properties.is_empty() {
            warn!(definition = %name, "skipping definition without properties");
            continue;
        }
        let fields = definition
            .properties
            .iter()
            .map(|(key, property)| -> Result<Named<Format>, BindgenError> {
                Ok(Named {
                    name: key.clone(),
                    value: Format::Option(Box::new(export_property(name, key, property)?)),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(definition = %name, fields = fields.len(), "exported definition");
        registry.insert(name.clone(), ContainerFormat::Struct(fields));
    }
    Ok(registry)
}

fn export_property(definition: &str, key: &str, property: &Property) -> Result<Format, BindgenError> {
    let unsupported = |ty: String| BindgenError::UnsupportedType {
        definition: definition.to_string(),
        property: key.to_string(),
        ty,
    };
    match (property.r#type.as_deref(), property.format.as_deref()) {
        (Some("string"), Some("duration")) => Ok(Format::TypeName(DURATION_TYPE_NAME.to_string())),
        (Some("string"), _) => Ok(Format::Str),
        (Some("boolean"), _) => Ok(Format::Bool),
        (Some("integer"), _) => Ok(Format::I64),
        (Some("array"), _) => match property.items.as_deref() {
            Some(Property {
                r#type: Some(item), ..
            }) if item == "string" => Ok(Format::Seq(Box::new(Format::Str))),
            Some(Property {
                r#type: Some(item), ..
            }) => Err(unsupported(format!("array of {}", item))),
            _ => Err(unsupported("array without item type".to_string())),
        },
        (Some(other), _) => Err(unsupported(other.to_string())),
        (None, _) => Err(unsupported("(none)".to_string())),
    }
}

/// Doc comments for the generator, keyed the way the emitter looks them up.
pub fn definition_comments(export: &DefinitionExport, module_name: &str) -> DocComments {
    let namespace: Vec<String> = module_name.split('.').map(String::from).collect();
    let mut comments = DocComments::new();
    for (name, definition) in &export.definitions {
        let mut path = namespace.clone();
        path.push(name.clone());
        if let Some(description) = &definition.description {
            comments.insert(path.clone(), description.clone());
        }
        for (key, property) in &definition.properties {
            if let Some(description) = &property.description {
                let mut field_path = path.clone();
                field_path.push(key.clone());
                comments.insert(field_path, description.clone());
            }
        }
    }
    comments
}

pub fn read_definitions_from_file<P: AsRef<Path>>(path: P) -> Result<DefinitionExport, BindgenError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let export: DefinitionExport = serde_json::from_reader(reader)?;
    Ok(export)
}
