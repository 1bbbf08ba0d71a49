//! The property panel: one editing control per option of the selected field.

use crate::canvas::{field_content, FieldInstance};
use crate::config::DEFAULT_STITCHED_TYPES;
use crate::error::{EditorError, EditorResult};
use serde_json::Value;
use uifactory_components::ComponentFactory;
use uifactory_forms::{OptionValues, RenderMode};
use uuid::Uuid;

/// Variable through which editing templates learn which option they edit.
pub const CONTROL_KEY: &str = "key";

#[derive(Debug, Clone, PartialEq)]
pub struct PanelControl {
    pub key: String,
    /// Field type whose editing view renders this control.
    pub editor: String,
    pub markup: String,
    /// Current raw input value.
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct PropertyPanel {
    owner: Option<Uuid>,
    controls: Vec<PanelControl>,
    stitched_types: Vec<String>,
}

impl Default for PropertyPanel {
    fn default() -> Self {
        Self::new(DEFAULT_STITCHED_TYPES.iter().map(|s| s.to_string()).collect())
    }
}

impl PropertyPanel {
    pub fn new(stitched_types: Vec<String>) -> Self {
        Self {
            owner: None,
            controls: Vec::new(),
            stitched_types,
        }
    }

    /// Rebuild the controls for `instance` from its schema and snapshot.
    ///
    /// A control that cannot be rendered is logged and left out; the panel
    /// still belongs to `instance` and the other controls stay editable.
    pub fn populate(&mut self, factory: &ComponentFactory, instance: &FieldInstance) -> EditorResult<()> {
        self.clear();
        self.owner = Some(instance.id());
        let definition = factory.definition(instance.field_type())?;
        let snapshot = instance.values()?;

        for (key, spec) in definition.schema.iter() {
            let Some(editor) = spec.field.as_deref() else {
                tracing::debug!(field_type = instance.field_type(), option = %key, "option has no editor, not shown");
                continue;
            };
            if !factory.is_defined(editor) {
                tracing::warn!(field_type = instance.field_type(), option = %key, editor, "editor type is not defined");
                continue;
            }

            let current = snapshot.get(key).cloned().unwrap_or_else(|| spec.value.clone());
            let mut vals = factory.defaults(editor)?;
            vals.extend(&spec.to_values());
            vals.set("value", current.clone());
            vals.set(CONTROL_KEY, key.clone());

            let markup = match factory.render(editor, &vals, RenderMode::Editing) {
                Ok(markup) => markup,
                Err(e) => {
                    tracing::warn!(
                        field_type = instance.field_type(),
                        option = %key,
                        editor,
                        error = %e,
                        "editor control failed to render"
                    );
                    continue;
                }
            };
            self.controls.push(PanelControl {
                key: key.clone(),
                editor: editor.to_string(),
                markup,
                value: input_value(&current),
            });
        }
        Ok(())
    }

    /// Record the raw value typed into control `key`. Returns false when no such control exists.
    pub fn set_input(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.controls.iter_mut().find(|c| c.key == key) {
            Some(control) => {
                control.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Current control values keyed by option name, in panel order.
    pub fn collect(&self) -> OptionValues {
        self.controls
            .iter()
            .map(|c| (c.key.clone(), Value::String(c.value.clone())))
            .collect()
    }

    /// Re-render `instance` from the panel's values and store them as its snapshot.
    pub fn apply(&self, factory: &ComponentFactory, instance: &mut FieldInstance) -> EditorResult<()> {
        if self.owner != Some(instance.id()) {
            return Err(EditorError::PanelNotPopulated(instance.id()));
        }
        let field_type = instance.field_type().to_string();
        let mut values = factory.defaults(&field_type)?;
        values.extend(&instance.values()?);
        values.extend(&self.collect());

        let rendered = factory.render(&field_type, &values, RenderMode::Updating)?;
        let content = field_content(&rendered, self.is_stitched(&field_type));
        instance.apply(&values, RenderMode::Updating, content);
        tracing::debug!(id = %instance.id(), field_type = %field_type, "applied panel edits");
        Ok(())
    }

    pub fn is_stitched(&self, field_type: &str) -> bool {
        self.stitched_types.iter().any(|t| t == field_type)
    }

    pub fn clear(&mut self) {
        self.owner = None;
        self.controls.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn owner(&self) -> Option<Uuid> {
        self.owner
    }

    pub fn controls(&self) -> &[PanelControl] {
        &self.controls
    }

    pub fn control(&self, key: &str) -> Option<&PanelControl> {
        self.controls.iter().find(|c| c.key == key)
    }

    pub fn render_html(&self) -> String {
        self.controls.iter().map(|c| c.markup.as_str()).collect()
    }
}

fn input_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
