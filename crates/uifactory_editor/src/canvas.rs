//! The ordered set of fields being edited.
//!
//! Vector order is document order and therefore the published field order.
//! Every field carries a serialized snapshot of its options next to its
//! rendered content; [`FieldInstance::apply`] is the only way to change
//! either, so the two never diverge.
//!
//! Stored content is the body of a render, not the render itself: the inner
//! markup of the first top-level element, or for choice fields the stitched
//! `.form-check` groups. Adding, loading and panel edits all go through
//! [`field_content`], so equal values give equal markup.

use crate::config::DEFAULT_STITCHED_TYPES;
use crate::error::{EditorError, EditorResult};
use uifactory_components::markup::{escape_attribute, first_inner_html, stitch_class_fragments};
use uifactory_components::{ComponentError, ComponentFactory};
use uifactory_forms::{FieldConfig, FormMetadata, LoadPolicy, OptionValues, PersistedFormDefinition, RenderMode};
use uuid::Uuid;

pub const FIELD_CONTAINER_CLASS: &str = "field-container";

/// Class of one choice group inside a radio or checkbox render.
pub const CHOICE_GROUP_CLASS: &str = "form-check";

/// The part of a field render kept as the field's content.
pub fn field_content(rendered: &str, stitched: bool) -> String {
    if stitched {
        stitch_class_fragments(rendered, CHOICE_GROUP_CLASS)
    } else {
        first_inner_html(rendered)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldInstance {
    id: Uuid,
    field_type: String,
    view: RenderMode,
    snapshot: String,
    content: String,
}

impl FieldInstance {
    fn new(field_type: &str, values: &OptionValues, view: RenderMode, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            field_type: field_type.to_string(),
            view,
            snapshot: snapshot_of(values),
            content,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn view(&self) -> RenderMode {
        self.view
    }

    /// Serialized option values (the `data-vals` attribute).
    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn values(&self) -> EditorResult<OptionValues> {
        Ok(OptionValues::from_json(&self.snapshot)?)
    }

    pub fn apply(&mut self, values: &OptionValues, view: RenderMode, content: String) {
        self.snapshot = snapshot_of(values);
        self.view = view;
        self.content = content;
    }

    pub fn config(&self) -> EditorResult<FieldConfig> {
        Ok(FieldConfig::new(self.field_type.clone(), self.values()?))
    }

    /// Structural copy under a fresh id.
    fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"{}\" data-type=\"{}\" data-vals=\"{}\">{}</div>",
            FIELD_CONTAINER_CLASS,
            escape_attribute(&self.field_type),
            escape_attribute(&self.snapshot),
            self.content
        )
    }
}

fn snapshot_of(values: &OptionValues) -> String {
    let mut values = values.clone();
    values.remove(RenderMode::VARIABLE);
    values.to_json()
}

#[derive(Debug, Clone)]
pub struct FormCanvas {
    fields: Vec<FieldInstance>,
    newest: Option<Uuid>,
    stitched_types: Vec<String>,
}

impl Default for FormCanvas {
    fn default() -> Self {
        Self::with_stitched_types(DEFAULT_STITCHED_TYPES.iter().map(|s| s.to_string()).collect())
    }
}

impl FormCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stitched_types(stitched_types: Vec<String>) -> Self {
        Self {
            fields: Vec::new(),
            newest: None,
            stitched_types,
        }
    }

    /// Whether `field_type` renders as a list of choice groups.
    pub fn is_stitched(&self, field_type: &str) -> bool {
        self.stitched_types.iter().any(|t| t == field_type)
    }

    fn content_of(&self, field_type: &str, rendered: &str) -> String {
        field_content(rendered, self.is_stitched(field_type))
    }

    /// Append a fresh copy of the catalog prototype for `field_type`.
    pub fn add_field(&mut self, factory: &ComponentFactory, field_type: &str) -> EditorResult<Uuid> {
        let values = factory.defaults(field_type).map_err(|e| unknown_type(e, field_type))?;
        let rendered = factory.render(field_type, &values, RenderMode::Updating)?;
        let content = self.content_of(field_type, &rendered);
        let instance = FieldInstance::new(field_type, &values, RenderMode::Updating, content);
        let id = instance.id;
        self.fields.push(instance);
        self.newest = Some(id);
        tracing::debug!(%id, field_type, "added field");
        Ok(id)
    }

    /// Insert a copy of `id` right after it and return the copy's id.
    pub fn duplicate(&mut self, id: Uuid) -> EditorResult<Uuid> {
        let pos = self.position(id).ok_or(EditorError::UnknownField(id))?;
        let copy = self.fields[pos].duplicate();
        let copy_id = copy.id;
        self.fields.insert(pos + 1, copy);
        tracing::debug!(original = %id, copy = %copy_id, "duplicated field");
        Ok(copy_id)
    }

    pub fn remove(&mut self, id: Uuid) -> EditorResult<FieldInstance> {
        let pos = self.position(id).ok_or(EditorError::UnknownField(id))?;
        let removed = self.fields.remove(pos);
        if self.newest == Some(id) {
            self.newest = None;
        }
        tracing::debug!(%id, "removed field");
        Ok(removed)
    }

    /// Move `id` to just before `anchor`, or to the end when `anchor` is `None`.
    pub fn move_before(&mut self, id: Uuid, anchor: Option<Uuid>) -> EditorResult<()> {
        if anchor == Some(id) {
            return Ok(());
        }
        if let Some(anchor) = anchor {
            if self.position(anchor).is_none() {
                return Err(EditorError::UnknownField(anchor));
            }
        }
        let pos = self.position(id).ok_or(EditorError::UnknownField(id))?;
        let field = self.fields.remove(pos);
        let target = match anchor.and_then(|a| self.position(a)) {
            Some(index) => index,
            None => self.fields.len(),
        };
        self.fields.insert(target, field);
        Ok(())
    }

    /// Append one field per config, in order, with exactly the stored values.
    /// Returns how many fields were added.
    pub fn load_configs(&mut self, factory: &ComponentFactory, configs: &[FieldConfig], policy: LoadPolicy) -> EditorResult<usize> {
        let mut added = 0;
        for (index, config) in configs.iter().enumerate() {
            let config = config.unescaped();
            match self.load_one(factory, &config) {
                Ok(()) => added += 1,
                Err(e) => match policy {
                    LoadPolicy::Skip => {
                        tracing::warn!(index, component = %config.component, error = %e, "skipping field on load");
                    }
                    LoadPolicy::Fail => return Err(e),
                },
            }
        }
        Ok(added)
    }

    pub fn load_from_definition(&mut self, factory: &ComponentFactory, definition: &PersistedFormDefinition, policy: LoadPolicy) -> EditorResult<usize> {
        self.load_configs(factory, &definition.config, policy)
    }

    fn load_one(&mut self, factory: &ComponentFactory, config: &FieldConfig) -> EditorResult<()> {
        if !factory.is_defined(&config.component) {
            return Err(EditorError::UnknownFieldType(config.component.clone()));
        }
        // Stored values may predate options added to the schema since.
        let mut render_values = factory.defaults(&config.component)?;
        render_values.extend(&config.values);
        let rendered = factory.render(&config.component, &render_values, RenderMode::Loaded)?;
        let content = self.content_of(&config.component, &rendered);
        let instance = FieldInstance::new(&config.component, &config.values, RenderMode::Loaded, content);
        self.fields.push(instance);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&FieldInstance> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut FieldInstance> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldInstance> {
        self.fields.iter()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.fields.iter().map(|f| f.id).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The most recently added field, while it is still on the canvas.
    pub fn newest(&self) -> Option<Uuid> {
        self.newest
    }

    /// `(type, values)` of every field in document order.
    pub fn snapshots(&self) -> EditorResult<Vec<(String, OptionValues)>> {
        self.fields
            .iter()
            .map(|f| Ok((f.field_type.clone(), f.values()?)))
            .collect()
    }

    /// Field configs ready for transport, in document order.
    pub fn to_configs(&self) -> EditorResult<Vec<FieldConfig>> {
        self.fields
            .iter()
            .map(|f| Ok(f.config()?.escaped()))
            .collect()
    }

    pub fn to_definition(&self, metadata: &FormMetadata) -> EditorResult<PersistedFormDefinition> {
        Ok(PersistedFormDefinition::new(metadata, self.render_html(), self.to_configs()?))
    }

    pub fn render_html(&self) -> String {
        self.fields.iter().map(FieldInstance::to_html).collect()
    }
}

fn unknown_type(error: ComponentError, field_type: &str) -> EditorError {
    match error {
        ComponentError::UnknownType(_) => EditorError::UnknownFieldType(field_type.to_string()),
        other => EditorError::Component(other),
    }
}
