use crate::properties::OptionValues;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One option of a field type: its default and the editor type used to edit it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    #[serde(default)]
    pub value: Value,
    /// Field type whose editing view renders this option in the property panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Everything else the catalog declares (labels, placeholders, ...).
    #[serde(flatten)]
    pub metadata: IndexMap<String, Value>,
}

impl OptionSpec {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            field: None,
            metadata: IndexMap::new(),
        }
    }

    pub fn edited_with(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The spec flattened into values: metadata, then `field` and `value`.
    pub fn to_values(&self) -> OptionValues {
        let mut values: OptionValues = self
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if let Some(field) = &self.field {
            values.set("field", field.clone());
        }
        values.set("value", self.value.clone());
        values
    }
}

/// Ordered option schema of a field type. Declared order is panel order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    options: IndexMap<String, OptionSpec>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: OptionSpec) {
        self.options.insert(name.into(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.options.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionSpec)> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Default value of every option, in schema order.
    pub fn defaults(&self) -> OptionValues {
        self.options
            .iter()
            .map(|(name, spec)| (name.clone(), spec.value.clone()))
            .collect()
    }

    /// Names of the attributes an element of this type observes.
    pub fn observed_attributes(&self) -> Vec<String> {
        self.options.keys().cloned().collect()
    }
}
