//! The catalog of field types: one render template and one option schema per type.
//!
//! The registry is filled once when the catalog loads and is read-only after
//! that. A malformed entry never aborts the load: its schema degrades to empty
//! and the remaining types are registered as usual.

use crate::error::FormsResult;
use crate::properties::OptionValues;
use crate::schema::FieldSchema;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub template: String,
    pub schema: FieldSchema,
}

/// An option whose `field` names an editor type missing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingEditorRef {
    pub field_type: String,
    pub option: String,
    pub editor: String,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: IndexMap<String, CatalogEntry>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document shaped `{ "<type>": { "template": "...", "options": {...} } }`.
    pub fn from_json(text: &str) -> FormsResult<Self> {
        let document: serde_json::Map<String, Value> = serde_json::from_str(text)?;
        let mut registry = Self::new();

        for (name, entry) in document {
            let Some(template) = entry.get("template").and_then(Value::as_str) else {
                tracing::warn!(field_type = %name, "catalog entry has no template, skipping");
                continue;
            };
            let schema = match entry.get("options") {
                Some(options) => parse_schema_value(&name, options),
                None => FieldSchema::new(),
            };
            registry.register(name.clone(), template.to_string(), schema);
        }

        tracing::debug!(types = registry.len(), "loaded template catalog");
        Ok(registry)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FormsResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Type names are stored lowercase, the way components are defined.
    pub fn register(&mut self, name: impl Into<String>, template: impl Into<String>, schema: FieldSchema) {
        let name = name.into().to_lowercase();
        self.entries.insert(
            name.clone(),
            CatalogEntry {
                name,
                template: template.into(),
                schema,
            },
        );
    }

    /// Register a type from raw template text and an optional raw JSON config
    /// of the form `{ "options": {...} }`.
    pub fn register_source(&mut self, name: impl Into<String>, template: impl Into<String>, config_text: Option<&str>) {
        let name = name.into();
        let schema = match config_text {
            Some(text) => parse_schema_config(&name, text),
            None => FieldSchema::new(),
        };
        self.register(name, template, schema);
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .get(name)
            .or_else(|| self.entries.get(&name.to_lowercase()))
    }

    pub fn schema(&self, name: &str) -> Option<&FieldSchema> {
        self.get(name).map(|e| &e.schema)
    }

    pub fn template_source(&self, name: &str) -> Option<&str> {
        self.get(name).map(|e| e.template.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Type names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn defaults(&self, name: &str) -> Option<OptionValues> {
        self.schema(name).map(FieldSchema::defaults)
    }

    pub fn dangling_editor_refs(&self) -> Vec<DanglingEditorRef> {
        let mut dangling = Vec::new();
        for entry in self.entries.values() {
            for (option, spec) in entry.schema.iter() {
                if let Some(editor) = &spec.field {
                    if !self.contains(editor) {
                        dangling.push(DanglingEditorRef {
                            field_type: entry.name.clone(),
                            option: option.clone(),
                            editor: editor.clone(),
                        });
                    }
                }
            }
        }
        dangling
    }
}

/// Parse a raw component config `{ "options": {...} }` into a schema.
///
/// Failures are logged and yield an empty schema.
pub fn parse_schema_config(name: &str, text: &str) -> FieldSchema {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(config) => match config.get("options") {
            Some(options) => parse_schema_value(name, options),
            None => FieldSchema::new(),
        },
        Err(e) => {
            tracing::error!(field_type = %name, error = %e, "invalid component config");
            FieldSchema::new()
        }
    }
}

fn parse_schema_value(name: &str, options: &Value) -> FieldSchema {
    match serde_json::from_value::<FieldSchema>(options.clone()) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::error!(field_type = %name, error = %e, "invalid option schema, using an empty schema");
            FieldSchema::new()
        }
    }
}
