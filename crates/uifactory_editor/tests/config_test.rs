mod common;

use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use uifactory_editor::{EditorConfig, FormEditor, DEFAULT_CATALOG_PATH};
use uifactory_forms::LoadPolicy;

#[test]
fn test_default_config() {
    let config = EditorConfig::default();

    assert_eq!(config.catalog_path, Path::new(DEFAULT_CATALOG_PATH));
    assert_eq!(config.unknown_type_policy, LoadPolicy::Skip);
    assert_eq!(config.stitched_types, vec!["radio", "checkbox"]);
    assert_eq!(config.log_filter, "info");
    assert!(config.form_id.is_none());
}

#[test]
fn test_partial_config_file() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join("editor.json");
    fs::write(&path, r#"{ "user": "carol", "unknown_type_policy": "fail" }"#).expect("write");

    let config = EditorConfig::load(&path).expect("load");

    assert_eq!(config.user, "carol");
    assert_eq!(config.unknown_type_policy, LoadPolicy::Fail);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_resolve_relative_paths() {
    let base = Path::new("/srv/forms");
    let config = EditorConfig {
        initial_config_path: Some("initial.json".into()),
        ..Default::default()
    }
    .resolve_paths(base);

    assert_eq!(config.catalog_path, base.join(DEFAULT_CATALOG_PATH));
    assert_eq!(config.initial_config_path, Some(base.join("initial.json")));
}

fn write_initial(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("initial.json");
    let configs = json!([
        { "component": "text", "label": "Name", "name": "name" },
        { "component": "button", "label": "Send" }
    ]);
    fs::write(&path, configs.to_string()).expect("write");
    path
}

#[test]
fn test_open_existing_form_loads_fields() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = EditorConfig {
        initial_config_path: Some(write_initial(&temp)),
        ..Default::default()
    }
    .with_form_id("7");

    let editor = FormEditor::open_from_config(common::factory(), &config).expect("open");

    assert_eq!(editor.canvas().len(), 2);
    assert!(editor.is_publish_visible());
    assert_eq!(editor.form_id(), Some("7"));
}

#[test]
fn test_open_new_form_ignores_initial_data() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = EditorConfig {
        initial_config_path: Some(write_initial(&temp)),
        ..Default::default()
    };

    let editor = FormEditor::open_from_config(common::factory(), &config).expect("open");

    assert!(editor.canvas().is_empty());
    assert!(!editor.is_publish_visible());
}
