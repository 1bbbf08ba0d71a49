use serde::{Deserialize, Serialize};

/// Which variant of a field template is being rendered.
///
/// Every template receives this as the `view` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Catalog prototype shown in the "add field" list.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// A control inside the property panel.
    #[serde(rename = "editing")]
    Editing,
    /// A field on the canvas that was just added or edited.
    #[serde(rename = "updating")]
    Updating,
    /// A field reconstructed from a persisted definition.
    #[serde(rename = "...")]
    Loaded,
}

impl RenderMode {
    pub const VARIABLE: &'static str = "view";

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Default => "default",
            RenderMode::Editing => "editing",
            RenderMode::Updating => "updating",
            RenderMode::Loaded => "...",
        }
    }

    pub fn from_name(name: &str) -> Option<RenderMode> {
        match name {
            "default" => Some(RenderMode::Default),
            "editing" => Some(RenderMode::Editing),
            "updating" => Some(RenderMode::Updating),
            "..." => Some(RenderMode::Loaded),
            _ => None,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
