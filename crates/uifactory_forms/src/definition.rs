use crate::error::{FormsError, FormsResult};
use crate::properties::OptionValues;
use crate::view::RenderMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field type whose `value` is raw markup and is newline-escaped for transport.
pub const HTML_FIELD_TYPE: &str = "html";

pub const UNTITLED_FORM: &str = "Untitled";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl FormMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Blank names become "Untitled" and the description is trimmed.
    pub fn normalized(&self) -> Self {
        let name = if self.name.trim().is_empty() {
            UNTITLED_FORM.to_string()
        } else {
            self.name.clone()
        };
        Self {
            name,
            description: self.description.trim().to_string(),
            categories: self.categories.clone(),
        }
    }
}

/// One serialized field: its component type plus its option values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub component: String,
    #[serde(flatten)]
    pub values: OptionValues,
}

impl FieldConfig {
    pub fn new(component: impl Into<String>, values: OptionValues) -> Self {
        let mut values = values;
        values.remove(RenderMode::VARIABLE);
        values.remove("component");
        Self {
            component: component.into(),
            values,
        }
    }

    /// Copy prepared for one round of string transport.
    pub fn escaped(&self) -> Self {
        let mut config = self.clone();
        if config.component == HTML_FIELD_TYPE {
            if let Some(value) = config.values.get_str("value") {
                let escaped = escape_newlines(value);
                config.values.set("value", escaped);
            }
        }
        config
    }

    /// Inverse of [`FieldConfig::escaped`]. Also drops a stale `view` marker.
    pub fn unescaped(&self) -> Self {
        let mut config = self.clone();
        config.values.remove(RenderMode::VARIABLE);
        if config.component == HTML_FIELD_TYPE {
            if let Some(value) = config.values.get_str("value") {
                let raw = unescape_newlines(value);
                config.values.set("value", raw);
            }
        }
        config
    }
}

/// What to do with a persisted entry that cannot be turned into a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Log a warning and leave the entry out.
    #[default]
    Skip,
    /// Abort the whole load.
    Fail,
}

/// Decode raw persisted entries one by one, applying `policy` to malformed ones.
pub fn decode_field_configs(entries: Vec<Value>, policy: LoadPolicy) -> FormsResult<Vec<FieldConfig>> {
    let mut configs = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<FieldConfig>(entry) {
            Ok(config) => configs.push(config),
            Err(e) => match policy {
                LoadPolicy::Skip => {
                    tracing::warn!(index, error = %e, "skipping malformed field config");
                }
                LoadPolicy::Fail => {
                    return Err(FormsError::MalformedEntry {
                        index,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }
    Ok(configs)
}

/// Escape newlines as `\n` for string transport. Backslashes are doubled
/// first so that [`unescape_newlines`] restores the value exactly.
pub fn escape_newlines(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Inverse of [`escape_newlines`]. Only `\\` and `\n` are decoded; any other
/// backslash sequence is kept as written.
pub fn unescape_newlines(value: &str) -> String {
    let mut raw = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            raw.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                raw.push('\\');
            }
            Some('n') => {
                chars.next();
                raw.push('\n');
            }
            _ => raw.push('\\'),
        }
    }
    raw
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedFormDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub config: Vec<FieldConfig>,
}

impl PersistedFormDefinition {
    pub fn new(metadata: &FormMetadata, html: impl Into<String>, config: Vec<FieldConfig>) -> Self {
        let metadata = metadata.normalized();
        Self {
            name: metadata.name,
            description: metadata.description,
            categories: metadata.categories,
            html: html.into(),
            config,
        }
    }

    pub fn metadata(&self) -> FormMetadata {
        FormMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// Body sent to the publish backend. `config` and `metadata` are JSON strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishPayload {
    pub config: String,
    pub html: String,
    pub metadata: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl PublishPayload {
    pub fn from_definition(definition: &PersistedFormDefinition, user: impl Into<String>, id: Option<String>) -> FormsResult<Self> {
        Ok(Self {
            config: serde_json::to_string(&definition.config)?,
            html: definition.html.clone(),
            metadata: serde_json::to_string(&definition.metadata())?,
            user: user.into(),
            id,
        })
    }

    pub fn field_configs(&self) -> FormsResult<Vec<FieldConfig>> {
        Ok(serde_json::from_str(&self.config)?)
    }

    pub fn form_metadata(&self) -> FormsResult<FormMetadata> {
        Ok(serde_json::from_str(&self.metadata)?)
    }
}
