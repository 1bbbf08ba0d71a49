use crate::selection::{ClickTarget, ToolbarAction};

/// User events the editor reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Add-field list
    AddField(String),

    // Pointer
    Click(ClickTarget),

    // Property panel input/change event on control `key`
    PanelInput { key: String, value: String },
}

impl Message {
    pub fn toolbar(action: ToolbarAction) -> Self {
        Message::Click(ClickTarget::Toolbar(action))
    }
}
