//! Publishing the canvas to the backend.
//!
//! The transport is an external collaborator. A publish is split into
//! [`FormEditor::begin_publish`](crate::FormEditor::begin_publish), which shows
//! the spinner and builds the payload, and
//! [`FormEditor::complete_publish`](crate::FormEditor::complete_publish), which
//! always hides it again. Nothing times a request out: one that never
//! completes leaves the spinner showing.

use uifactory_forms::{PersistedFormDefinition, PublishPayload};

pub const CREATE_FAILED_MESSAGE: &str = "Unable to publish the form. Please try again later.";
pub const UPDATE_FAILED_MESSAGE: &str = "Unable to update the form. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("publish failed: {0}")]
pub struct TransportError(pub String);

pub trait PublishTransport {
    /// Store a new form and return its identifier.
    fn create(&mut self, payload: &PublishPayload) -> Result<String, TransportError>;

    /// Replace the form stored under `id`.
    fn update(&mut self, id: &str, payload: &PublishPayload) -> Result<(), TransportError>;
}

/// User-visible notifications (toasts).
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(notification = message, "user notification");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishMode {
    Create,
    Update(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub mode: PublishMode,
    pub payload: PublishPayload,
    pub definition: PersistedFormDefinition,
}

impl PublishRequest {
    /// Hand the request to `transport`.
    pub fn send(&self, transport: &mut dyn PublishTransport) -> PublishOutcome {
        match &self.mode {
            PublishMode::Create => match transport.create(&self.payload) {
                Ok(id) => PublishOutcome::Created(id),
                Err(e) => PublishOutcome::Failed(e),
            },
            PublishMode::Update(id) => match transport.update(id, &self.payload) {
                Ok(()) => PublishOutcome::Updated,
                Err(e) => PublishOutcome::Failed(e),
            },
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self.mode {
            PublishMode::Create => CREATE_FAILED_MESSAGE,
            PublishMode::Update(_) => UPDATE_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Created(String),
    Updated,
    Failed(TransportError),
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, PublishOutcome::Failed(_))
    }
}

pub fn form_link(id: &str) -> String {
    format!("form/{}", id)
}
