#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;
use uifactory_components::ComponentFactory;
use uifactory_editor::{EditorConfig, FormEditor, Notifier, PublishTransport, TransportError};
use uifactory_forms::{PublishPayload, TemplateRegistry};

pub fn catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../snippets/snippets.json")
}

pub fn factory() -> ComponentFactory {
    let registry = TemplateRegistry::from_path(catalog_path()).expect("Failed to load catalog");
    ComponentFactory::from_registry(Arc::new(registry)).expect("Failed to build factory")
}

pub fn editor() -> FormEditor {
    FormEditor::new(factory(), &EditorConfig::default().with_user("alice"))
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct MemoryTransport {
    pub created: Vec<PublishPayload>,
    pub updated: Vec<(String, PublishPayload)>,
    pub fail: bool,
    pub next_id: usize,
}

impl PublishTransport for MemoryTransport {
    fn create(&mut self, payload: &PublishPayload) -> Result<String, TransportError> {
        if self.fail {
            return Err(TransportError("backend unavailable".to_string()));
        }
        self.next_id += 1;
        self.created.push(payload.clone());
        Ok(format!("form-{}", self.next_id))
    }

    fn update(&mut self, id: &str, payload: &PublishPayload) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError("backend unavailable".to_string()));
        }
        self.updated.push((id.to_string(), payload.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
