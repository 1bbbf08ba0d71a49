//! Defines reactive element kinds from catalog data.
//!
//! Each field type becomes a [`ComponentDefinition`]: its compiled template,
//! its option schema and the attribute names derived from that schema. The
//! factory is the registry of those descriptors; [`ComponentFactory::create`]
//! connects a new [`Element`] to one of them.

use crate::element::Element;
use crate::error::{ComponentError, ComponentResult};
use crate::template::{FieldTemplate, TemplateCompiler};
use indexmap::IndexMap;
use std::sync::Arc;
use uifactory_forms::{parse_schema_config, FieldSchema, OptionValues, RenderMode, TemplateRegistry};

pub const TAG_PREFIX: &str = "g-";

#[derive(Debug)]
pub struct ComponentDefinition {
    pub type_name: String,
    pub tag: String,
    pub template: FieldTemplate,
    pub schema: FieldSchema,
    observed: Vec<String>,
}

impl ComponentDefinition {
    pub fn observed_attributes(&self) -> &[String] {
        &self.observed
    }

    pub fn observes(&self, name: &str) -> bool {
        self.observed.iter().any(|a| a == name)
    }

    pub fn render(&self, options: &OptionValues, mode: RenderMode) -> ComponentResult<String> {
        self.template.render(options, mode)
    }
}

pub struct ComponentFactory {
    registry: Arc<TemplateRegistry>,
    compiler: TemplateCompiler,
    definitions: IndexMap<String, Arc<ComponentDefinition>>,
}

impl ComponentFactory {
    pub fn new() -> ComponentResult<Self> {
        Ok(Self {
            registry: Arc::new(TemplateRegistry::new()),
            compiler: TemplateCompiler::new()?,
            definitions: IndexMap::new(),
        })
    }

    /// Define one component per catalog entry. A template that does not
    /// compile is logged and left undefined; the other types still are.
    pub fn from_registry(registry: Arc<TemplateRegistry>) -> ComponentResult<Self> {
        let mut factory = Self {
            registry: Arc::clone(&registry),
            compiler: TemplateCompiler::new()?,
            definitions: IndexMap::new(),
        };
        for entry in registry.iter() {
            if let Err(e) = factory.define(&entry.name, &entry.template, entry.schema.clone()) {
                tracing::error!(field_type = %entry.name, error = %e, "could not define component");
            }
        }
        Ok(factory)
    }

    pub fn registry(&self) -> &Arc<TemplateRegistry> {
        &self.registry
    }

    pub fn define(&mut self, type_name: &str, template: &str, schema: FieldSchema) -> ComponentResult<()> {
        let type_name = type_name.to_lowercase();
        let template = self.compiler.compile(&type_name, template)?;
        let observed = schema.observed_attributes();
        let definition = ComponentDefinition {
            tag: format!("{}{}", TAG_PREFIX, type_name),
            type_name: type_name.clone(),
            template,
            schema,
            observed,
        };
        tracing::debug!(tag = %definition.tag, attrs = definition.observed.len(), "defined component");
        self.definitions.insert(type_name, Arc::new(definition));
        Ok(())
    }

    /// Define from raw config text. An unparsable config leaves the
    /// component defined with an empty schema and no observed attributes.
    pub fn define_from_config(&mut self, type_name: &str, template: &str, config_text: Option<&str>) -> ComponentResult<()> {
        let schema = match config_text {
            Some(text) => parse_schema_config(type_name, text),
            None => FieldSchema::new(),
        };
        self.define(type_name, template, schema)
    }

    pub fn definition(&self, type_name: &str) -> ComponentResult<&Arc<ComponentDefinition>> {
        self.lookup(type_name)
            .ok_or_else(|| ComponentError::UnknownType(type_name.to_string()))
    }

    pub fn is_defined(&self, type_name: &str) -> bool {
        self.lookup(type_name).is_some()
    }

    pub fn tag_name(&self, type_name: &str) -> Option<&str> {
        self.lookup(type_name).map(|d| d.tag.as_str())
    }

    // Type names are case-insensitive, matching custom element tags.
    fn lookup(&self, type_name: &str) -> Option<&Arc<ComponentDefinition>> {
        self.definitions
            .get(type_name)
            .or_else(|| self.definitions.get(&type_name.to_lowercase()))
    }

    /// Defined type names in definition order.
    pub fn type_names(&self) -> impl Iterator<Item = &String> {
        self.definitions.keys()
    }

    pub fn render(&self, type_name: &str, options: &OptionValues, mode: RenderMode) -> ComponentResult<String> {
        self.definition(type_name)?.render(options, mode)
    }

    /// Schema defaults of a defined type.
    pub fn defaults(&self, type_name: &str) -> ComponentResult<OptionValues> {
        Ok(self.definition(type_name)?.schema.defaults())
    }

    pub fn create<I, K, V>(&self, type_name: &str, attributes: I, body: &str) -> ComponentResult<Element>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let definition = Arc::clone(self.definition(type_name)?);
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Element::connect(definition, attributes, body)
    }

    /// Instantiate with no attributes and an empty body.
    pub fn instantiate(&self, type_name: &str) -> ComponentResult<Element> {
        self.create(type_name, std::iter::empty::<(String, String)>(), "")
    }
}
