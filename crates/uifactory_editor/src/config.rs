use crate::error::EditorResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uifactory_forms::LoadPolicy;

pub const DEFAULT_CATALOG_PATH: &str = "snippets/snippets.json";

/// Field types whose render is a list of `.form-check` choice groups.
pub const DEFAULT_STITCHED_TYPES: &[&str] = &["radio", "checkbox"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub catalog_path: PathBuf,
    pub user: String,
    /// Set when editing an existing form; publishes then update instead of create.
    pub form_id: Option<String>,
    /// Initial-load data, an ordered array of field configs.
    pub initial_config_path: Option<PathBuf>,
    pub unknown_type_policy: LoadPolicy,
    pub stitched_types: Vec<String>,
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            user: String::new(),
            form_id: None,
            initial_config_path: None,
            unknown_type_policy: LoadPolicy::Skip,
            stitched_types: DEFAULT_STITCHED_TYPES.iter().map(|s| s.to_string()).collect(),
            log_filter: "info".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_form_id(mut self, id: impl Into<String>) -> Self {
        self.form_id = Some(id.into());
        self
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.unknown_type_policy = policy;
        self
    }

    /// Resolve relative paths against `base` (usually the config file's directory).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.catalog_path.is_relative() {
            self.catalog_path = base.join(&self.catalog_path);
        }
        if let Some(path) = &self.initial_config_path {
            if path.is_relative() {
                self.initial_config_path = Some(base.join(path));
            }
        }
        self
    }
}
