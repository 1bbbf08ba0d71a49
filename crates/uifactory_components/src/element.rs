use crate::error::ComponentResult;
use crate::factory::ComponentDefinition;
use crate::fragment::ContentFragment;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use uifactory_forms::{OptionValues, RenderMode};

/// Option holding the element's original body markup.
pub const BODY_OPTION: &str = "default";
/// Option holding the lookup object over the detached children.
pub const CONTENTS_OPTION: &str = "contents";

/// A live instance of a defined component.
///
/// Changing an observed attribute updates the matching option and re-renders
/// the whole content from the template.
#[derive(Debug, Clone)]
pub struct Element {
    definition: Arc<ComponentDefinition>,
    attributes: IndexMap<String, String>,
    options: OptionValues,
    contents: ContentFragment,
    mode: RenderMode,
    content: String,
    render_count: usize,
}

impl Element {
    pub(crate) fn connect(definition: Arc<ComponentDefinition>, attributes: IndexMap<String, String>, body: &str) -> ComponentResult<Self> {
        let mut options = definition.schema.defaults();
        for (name, value) in &attributes {
            options.set(name.clone(), value.clone());
        }

        let contents = ContentFragment::capture(body);
        options.set(BODY_OPTION, contents.html().to_string());
        options.set(CONTENTS_OPTION, contents.to_value());

        let mut element = Self {
            definition,
            attributes,
            options,
            contents,
            mode: RenderMode::Default,
            content: String::new(),
            render_count: 0,
        };
        element.render()?;
        Ok(element)
    }

    pub fn tag(&self) -> &str {
        &self.definition.tag
    }

    pub fn type_name(&self) -> &str {
        &self.definition.type_name
    }

    pub fn definition(&self) -> &Arc<ComponentDefinition> {
        &self.definition
    }

    pub fn observed_attributes(&self) -> &[String] {
        self.definition.observed_attributes()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) -> ComponentResult<()> {
        let value = value.into();
        self.attributes.insert(name.to_string(), value.clone());
        self.attribute_changed(name, Value::String(value))
    }

    pub fn remove_attribute(&mut self, name: &str) -> ComponentResult<()> {
        if self.attributes.shift_remove(name).is_some() {
            self.attribute_changed(name, Value::Null)?;
        }
        Ok(())
    }

    /// Property accessor: observed attributes read like fields of the element.
    pub fn property(&self, name: &str) -> Option<&str> {
        if self.definition.observes(name) {
            self.attribute(name)
        } else {
            None
        }
    }

    /// Property setter; writes through to the attribute of the same name.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) -> ComponentResult<()> {
        self.set_attribute(name, value)
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn options(&self) -> &OptionValues {
        &self.options
    }

    pub fn contents(&self) -> &ContentFragment {
        &self.contents
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Replace every option at once and re-render in `mode`. The cached
    /// children stay available to the template.
    pub fn replace_options(&mut self, values: OptionValues, mode: RenderMode) -> ComponentResult<()> {
        let mut options = values;
        options.set(BODY_OPTION, self.contents.html().to_string());
        options.set(CONTENTS_OPTION, self.contents.to_value());
        self.options = options;
        self.mode = mode;
        self.render()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn render(&mut self) -> ComponentResult<()> {
        self.content = self.definition.render(&self.options, self.mode)?;
        self.render_count += 1;
        Ok(())
    }

    fn attribute_changed(&mut self, name: &str, value: Value) -> ComponentResult<()> {
        if !self.definition.observes(name) {
            return Ok(());
        }
        self.options.set(name, value);
        self.render()
    }
}
