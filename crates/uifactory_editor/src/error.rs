use std::io;
use uifactory_components::ComponentError;
use uifactory_forms::FormsError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("No field with id {0} on the canvas")]
    UnknownField(Uuid),

    #[error("Property panel is not showing field {0}")]
    PanelNotPopulated(Uuid),

    #[error("A publish request is already in flight")]
    PublishInFlight,

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Forms(#[from] FormsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type EditorResult<T> = Result<T, EditorError>;
