use crate::error::{ComponentError, ComponentResult};
use uifactory_forms::{OptionValues, RenderMode};

/// Compiles field templates. One parser is shared by every definition.
pub struct TemplateCompiler {
    parser: liquid::Parser,
}

impl TemplateCompiler {
    pub fn new() -> ComponentResult<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| ComponentError::Engine(e.to_string()))?;
        Ok(Self { parser })
    }

    pub fn compile(&self, field_type: &str, source: &str) -> ComponentResult<FieldTemplate> {
        let compiled = self
            .parser
            .parse(source)
            .map_err(|e| ComponentError::TemplateParse {
                field_type: field_type.to_string(),
                message: e.to_string(),
            })?;
        Ok(FieldTemplate {
            field_type: field_type.to_string(),
            source: source.to_string(),
            compiled,
        })
    }
}

/// A compiled template: `(options, view) -> markup`.
pub struct FieldTemplate {
    field_type: String,
    source: String,
    compiled: liquid::Template,
}

impl FieldTemplate {
    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, options: &OptionValues, mode: RenderMode) -> ComponentResult<String> {
        let globals = to_liquid_object(options, mode);
        self.compiled
            .render(&globals)
            .map_err(|e| ComponentError::TemplateRender {
                field_type: self.field_type.clone(),
                message: e.to_string(),
            })
    }
}

impl std::fmt::Debug for FieldTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldTemplate")
            .field("field_type", &self.field_type)
            .field("source", &self.source)
            .finish()
    }
}

fn to_liquid_object(options: &OptionValues, mode: RenderMode) -> liquid::Object {
    let mut globals = liquid::Object::new();
    for (key, value) in options.iter() {
        globals.insert(
            key.clone().into(),
            liquid::model::to_value(value).unwrap_or(liquid::model::Value::Nil),
        );
    }
    globals.insert(
        RenderMode::VARIABLE.into(),
        liquid::model::Value::scalar(mode.as_str()),
    );
    globals
}
