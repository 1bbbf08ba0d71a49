use crate::definition::{decode_field_configs, FieldConfig, LoadPolicy, PersistedFormDefinition};
use crate::error::FormsResult;
use std::fs;
use std::path::Path;

pub fn save_definition(definition: &PersistedFormDefinition, path: impl AsRef<Path>) -> FormsResult<()> {
    let json = serde_json::to_string_pretty(definition)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_definition(path: impl AsRef<Path>) -> FormsResult<PersistedFormDefinition> {
    let json = fs::read_to_string(path)?;
    let definition = serde_json::from_str(&json)?;
    Ok(definition)
}

/// Parse initial-load data: an ordered array of field configs.
pub fn load_field_configs(text: &str) -> FormsResult<Vec<FieldConfig>> {
    Ok(serde_json::from_str(text)?)
}

/// Like [`load_field_configs`], but malformed entries are handled per `policy`
/// instead of failing the whole array.
pub fn load_field_configs_with(text: &str, policy: LoadPolicy) -> FormsResult<Vec<FieldConfig>> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(text)?;
    decode_field_configs(entries, policy)
}
