//! The editor session: canvas, selection and property panel kept in step.

use crate::canvas::FormCanvas;
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::message::Message;
use crate::property_panel::PropertyPanel;
use crate::publish::{form_link, Notifier, PublishMode, PublishOutcome, PublishRequest, PublishTransport};
use crate::selection::{ClickTarget, SelectionChange, SelectionState, ToolbarAction};
use uifactory_components::ComponentFactory;
use uifactory_forms::serialization::load_field_configs_with;
use uifactory_forms::{FieldConfig, FormMetadata, LoadPolicy, PersistedFormDefinition, PublishPayload};
use uuid::Uuid;

pub struct FormEditor {
    factory: ComponentFactory,
    canvas: FormCanvas,
    selection: SelectionState,
    panel: PropertyPanel,
    user: String,
    form_id: Option<String>,
    policy: LoadPolicy,
    publish_visible: bool,
    spinner: bool,
    post_publish_link: Option<String>,
}

impl FormEditor {
    pub fn new(factory: ComponentFactory, config: &EditorConfig) -> Self {
        Self {
            factory,
            canvas: FormCanvas::with_stitched_types(config.stitched_types.clone()),
            selection: SelectionState::new(),
            panel: PropertyPanel::new(config.stitched_types.clone()),
            user: config.user.clone(),
            form_id: config.form_id.clone(),
            policy: config.unknown_type_policy,
            publish_visible: false,
            spinner: false,
            post_publish_link: None,
        }
    }

    /// Start a session. The initial fields are only loaded when the config
    /// names an existing form.
    pub fn open(factory: ComponentFactory, config: &EditorConfig, initial: &[FieldConfig]) -> EditorResult<Self> {
        let mut editor = Self::new(factory, config);
        if editor.form_id.is_some() {
            editor.load(initial)?;
        }
        Ok(editor)
    }

    /// Like [`FormEditor::open`], reading initial-load data from
    /// `config.initial_config_path` when there is one.
    pub fn open_from_config(factory: ComponentFactory, config: &EditorConfig) -> EditorResult<Self> {
        let initial = match (&config.form_id, &config.initial_config_path) {
            (Some(_), Some(path)) => {
                let text = std::fs::read_to_string(path)?;
                load_field_configs_with(&text, config.unknown_type_policy)?
            }
            _ => Vec::new(),
        };
        Self::open(factory, config, &initial)
    }

    pub fn load(&mut self, configs: &[FieldConfig]) -> EditorResult<usize> {
        let added = self.canvas.load_configs(&self.factory, configs, self.policy)?;
        if !self.canvas.is_empty() {
            self.publish_visible = true;
        }
        tracing::debug!(added, "loaded form fields");
        Ok(added)
    }

    pub fn load_definition(&mut self, definition: &PersistedFormDefinition) -> EditorResult<usize> {
        self.load(&definition.config)
    }

    pub fn update(&mut self, message: Message) -> EditorResult<()> {
        match message {
            Message::AddField(field_type) => self.add_field(&field_type).map(|_| ()),
            Message::Click(target) => self.click(target),
            Message::PanelInput { key, value } => self.panel_input(&key, value),
        }
    }

    pub fn add_field(&mut self, field_type: &str) -> EditorResult<Uuid> {
        let id = self.canvas.add_field(&self.factory, field_type)?;
        self.publish_visible = true;
        Ok(id)
    }

    pub fn click(&mut self, target: ClickTarget) -> EditorResult<()> {
        if let ClickTarget::Field(id) = target {
            if self.canvas.get(id).is_none() {
                return Err(EditorError::UnknownField(id));
            }
        }
        match self.selection.handle_click(target) {
            SelectionChange::Selected(id) => self.populate_panel(id)?,
            SelectionChange::Cleared => self.panel.clear(),
            SelectionChange::Unchanged => {}
        }
        if let ClickTarget::Toolbar(action) = target {
            self.toolbar_action(action)?;
        }
        Ok(())
    }

    /// Run a toolbar action on the field the toolbar sits in front of.
    /// Returns the id of the copy for [`ToolbarAction::Duplicate`].
    pub fn toolbar_action(&mut self, action: ToolbarAction) -> EditorResult<Option<Uuid>> {
        let toolbar = self.selection.toolbar();
        let Some(target) = toolbar.anchor.filter(|_| toolbar.visible) else {
            return Ok(None);
        };
        match action {
            ToolbarAction::Duplicate => Ok(Some(self.duplicate(target)?)),
            ToolbarAction::Delete => {
                self.delete(target)?;
                Ok(None)
            }
        }
    }

    pub fn duplicate(&mut self, id: Uuid) -> EditorResult<Uuid> {
        self.canvas.duplicate(id)
    }

    pub fn delete(&mut self, id: Uuid) -> EditorResult<()> {
        self.canvas.remove(id)?;
        if self.selection.selected() == Some(id) {
            self.selection.clear();
            self.panel.clear();
        }
        Ok(())
    }

    pub fn move_before(&mut self, id: Uuid, anchor: Option<Uuid>) -> EditorResult<()> {
        self.canvas.move_before(id, anchor)?;
        if let Some(selected) = self.selection.selected() {
            self.selection.show_toolbar_before(selected);
        }
        Ok(())
    }

    /// An input or change event inside the property panel.
    pub fn panel_input(&mut self, key: &str, value: impl Into<String>) -> EditorResult<()> {
        let Some(id) = self.selection.selected() else {
            return Ok(());
        };
        if !self.panel.set_input(key, value) {
            tracing::debug!(key, "input event for a control the panel does not show");
        }
        let instance = self.canvas.get_mut(id).ok_or(EditorError::UnknownField(id))?;
        self.panel.apply(&self.factory, instance)?;
        self.selection.show_toolbar_before(id);
        Ok(())
    }

    fn populate_panel(&mut self, id: Uuid) -> EditorResult<()> {
        let instance = self.canvas.get(id).ok_or(EditorError::UnknownField(id))?;
        self.panel.populate(&self.factory, instance)
    }

    pub fn to_definition(&self, metadata: &FormMetadata) -> EditorResult<PersistedFormDefinition> {
        self.canvas.to_definition(metadata)
    }

    /// First half of a publish: clear the selection, show the spinner and
    /// build the request. Only one request may be outstanding.
    pub fn begin_publish(&mut self, metadata: &FormMetadata) -> EditorResult<PublishRequest> {
        if self.spinner {
            return Err(EditorError::PublishInFlight);
        }
        self.selection.clear();
        self.panel.clear();

        let definition = self.canvas.to_definition(metadata)?;
        let payload = PublishPayload::from_definition(&definition, self.user.clone(), self.form_id.clone())?;
        let mode = match &self.form_id {
            Some(id) => PublishMode::Update(id.clone()),
            None => PublishMode::Create,
        };
        self.spinner = true;
        tracing::debug!(fields = definition.config.len(), ?mode, "publishing form");
        Ok(PublishRequest {
            mode,
            payload,
            definition,
        })
    }

    /// Second half of a publish. The spinner is hidden whatever the outcome.
    pub fn complete_publish(&mut self, request: &PublishRequest, outcome: &PublishOutcome, notifier: &dyn Notifier) {
        self.spinner = false;
        match (outcome, &request.mode) {
            (PublishOutcome::Created(id), _) => {
                tracing::info!(id = %id, "form created");
                self.post_publish_link = Some(form_link(id));
                self.form_id = Some(id.clone());
            }
            (PublishOutcome::Updated, PublishMode::Update(id)) => {
                tracing::info!(id = %id, "form updated");
                self.post_publish_link = Some(form_link(id));
            }
            (PublishOutcome::Updated, PublishMode::Create) => {
                tracing::warn!("transport reported an update for a create request");
            }
            (PublishOutcome::Failed(e), _) => {
                tracing::warn!(error = %e, "publish failed");
                notifier.notify(request.failure_message());
            }
        }
    }

    pub fn publish(&mut self, metadata: &FormMetadata, transport: &mut dyn PublishTransport, notifier: &dyn Notifier) -> EditorResult<PublishOutcome> {
        let request = self.begin_publish(metadata)?;
        let outcome = request.send(transport);
        self.complete_publish(&request, &outcome, notifier);
        Ok(outcome)
    }

    pub fn factory(&self) -> &ComponentFactory {
        &self.factory
    }

    pub fn canvas(&self) -> &FormCanvas {
        &self.canvas
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn panel(&self) -> &PropertyPanel {
        &self.panel
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    pub fn is_publish_visible(&self) -> bool {
        self.publish_visible
    }

    pub fn is_spinner_visible(&self) -> bool {
        self.spinner
    }

    pub fn post_publish_link(&self) -> Option<&str> {
        self.post_publish_link.as_deref()
    }
}
