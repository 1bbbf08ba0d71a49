mod common;

use serde_json::json;
use tracing_test::traced_test;
use uifactory_editor::{ClickTarget, EditorError, FormCanvas, ToolbarAction};
use uifactory_forms::{FieldConfig, FormMetadata, LoadPolicy, OptionValues, PersistedFormDefinition, RenderMode};

fn config(component: &str, values: serde_json::Value) -> FieldConfig {
    let values: OptionValues = serde_json::from_value(values).expect("values");
    FieldConfig::new(component, values)
}

#[test]
fn test_add_field_uses_catalog_defaults() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();

    let id = canvas.add_field(&factory, "text").expect("add text");
    let field = canvas.get(id).expect("field on canvas");

    assert_eq!(field.field_type(), "text");
    assert_eq!(field.view(), RenderMode::Updating);
    assert!(field.content().contains("Text field"));
    let values = field.values().expect("snapshot");
    assert_eq!(values.get_str("label"), Some("Text field"));
    assert!(!values.contains("view"));
    assert_eq!(canvas.newest(), Some(id));
}

#[test]
fn test_add_unknown_type() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();

    let result = canvas.add_field(&factory, "signature");
    assert!(matches!(result, Err(EditorError::UnknownFieldType(t)) if t == "signature"));
    assert!(canvas.is_empty());
}

#[test]
fn test_fields_keep_insertion_order() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();

    canvas.add_field(&factory, "text").expect("text");
    canvas.add_field(&factory, "number").expect("number");
    canvas.add_field(&factory, "button").expect("button");

    let types: Vec<_> = canvas.iter().map(|f| f.field_type().to_string()).collect();
    assert_eq!(types, vec!["text", "number", "button"]);
}

#[test]
fn test_duplicate_is_independent_copy() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    let first = canvas.add_field(&factory, "text").expect("text");
    let last = canvas.add_field(&factory, "button").expect("button");

    let copy = canvas.duplicate(first).expect("duplicate");

    assert_ne!(copy, first);
    assert_eq!(canvas.ids(), vec![first, copy, last]);
    assert_eq!(
        canvas.get(copy).expect("copy").snapshot(),
        canvas.get(first).expect("original").snapshot()
    );

    let mut values = OptionValues::new();
    values.set("label", "Changed");
    canvas
        .get_mut(first)
        .expect("original")
        .apply(&values, RenderMode::Updating, "<label>Changed</label>".to_string());

    let copy_values = canvas.get(copy).expect("copy").values().expect("snapshot");
    assert_eq!(copy_values.get_str("label"), Some("Text field"));
}

#[test]
fn test_move_before_reorders() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    let a = canvas.add_field(&factory, "text").expect("a");
    let b = canvas.add_field(&factory, "number").expect("b");
    let c = canvas.add_field(&factory, "button").expect("c");

    canvas.move_before(c, Some(a)).expect("move c");
    assert_eq!(canvas.ids(), vec![c, a, b]);

    canvas.move_before(c, None).expect("move c to end");
    assert_eq!(canvas.ids(), vec![a, b, c]);

    canvas.move_before(b, Some(b)).expect("no-op");
    assert_eq!(canvas.ids(), vec![a, b, c]);
}

#[test]
fn test_remove_unknown_field() {
    let mut canvas = FormCanvas::new();
    let id = uuid::Uuid::new_v4();
    assert!(matches!(canvas.remove(id), Err(EditorError::UnknownField(missing)) if missing == id));
}

#[test]
fn test_load_restores_order_and_values() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    let configs = vec![
        config("number", json!({ "label": "Age", "name": "age", "min": 18 })),
        config("text", json!({ "label": "Name", "name": "name" })),
    ];

    let added = canvas.load_configs(&factory, &configs, LoadPolicy::Skip).expect("load");

    assert_eq!(added, 2);
    let first = canvas.iter().next().expect("first");
    assert_eq!(first.field_type(), "number");
    assert_eq!(first.view(), RenderMode::Loaded);
    assert!(first.content().contains("Age"));
    assert!(first.content().contains("min=\"18\""));
    // Only the stored values are kept, not the defaults used to render.
    let values = first.values().expect("snapshot");
    assert_eq!(values.get_i64("min"), Some(18));
    assert!(!values.contains("max"));
}

#[test]
fn test_load_round_trips_configs() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    let configs = vec![
        config("text", json!({ "label": "Email", "name": "email" })),
        config("html", json!({ "value": "<p>one</p>\\n<p>two</p>" })),
        config("radio", json!({ "label": "Pick", "name": "pick", "options": "A,B" })),
    ];

    canvas.load_configs(&factory, &configs, LoadPolicy::Fail).expect("load");

    let html = canvas.iter().nth(1).expect("html field");
    assert_eq!(
        html.values().expect("snapshot").get_str("value"),
        Some("<p>one</p>\n<p>two</p>")
    );
    assert_eq!(canvas.to_configs().expect("configs"), configs);
}

#[test]
#[traced_test]
fn test_load_skips_unknown_type() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    let configs = vec![
        config("text", json!({ "label": "A" })),
        config("signature", json!({ "label": "B" })),
        config("button", json!({ "label": "Go" })),
    ];

    let added = canvas.load_configs(&factory, &configs, LoadPolicy::Skip).expect("load");

    assert_eq!(added, 2);
    let types: Vec<_> = canvas.iter().map(|f| f.field_type().to_string()).collect();
    assert_eq!(types, vec!["text", "button"]);
    assert!(logs_contain("skipping field on load"));
}

#[test]
fn test_load_fails_on_unknown_type() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    let configs = vec![config("signature", json!({}))];

    let result = canvas.load_configs(&factory, &configs, LoadPolicy::Fail);
    assert!(matches!(result, Err(EditorError::UnknownFieldType(t)) if t == "signature"));
}

#[test]
fn test_render_html_wraps_fields() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    canvas.add_field(&factory, "button").expect("button");

    let html = canvas.render_html();
    assert!(html.starts_with("<div class=\"field-container\" data-type=\"button\""));
    assert!(html.contains("data-vals=\"{&quot;label&quot;:&quot;Submit&quot;"));
    assert!(html.contains("btn-primary"));
}

#[test]
fn test_to_definition_normalizes_metadata() {
    let factory = common::factory();
    let mut canvas = FormCanvas::new();
    canvas.add_field(&factory, "text").expect("text");

    let definition = canvas.to_definition(&FormMetadata::new("  ")).expect("definition");

    assert_eq!(definition.name, "Untitled");
    assert_eq!(definition.config.len(), 1);
    assert_eq!(definition.config[0].component, "text");
    assert!(definition.html.contains("field-container"));
}

#[test]
fn test_editing_duplicate_leaves_original_untouched() {
    let mut editor = common::editor();
    let original = editor.add_field("text").expect("add");
    editor.click(ClickTarget::Field(original)).expect("select");
    let copy = editor
        .toolbar_action(ToolbarAction::Duplicate)
        .expect("duplicate")
        .expect("copy id");

    editor.click(ClickTarget::Field(copy)).expect("select copy");
    editor.panel_input("label", "Second name").expect("edit copy");

    let original_field = editor.canvas().get(original).expect("original");
    let copy_field = editor.canvas().get(copy).expect("copy");
    assert_eq!(original_field.values().expect("snapshot").get_str("label"), Some("Text field"));
    assert!(original_field.content().contains("Text field"));
    assert_eq!(copy_field.values().expect("snapshot").get_str("label"), Some("Second name"));
    assert!(copy_field.content().contains("Second name"));
}

#[test]
fn test_edited_canvas_survives_save_and_load() {
    let mut editor = common::editor();
    let text = editor.add_field("text").expect("text");
    let html = editor.add_field("html").expect("html");
    let radio = editor.add_field("radio").expect("radio");

    editor.click(ClickTarget::Field(text)).expect("select text");
    editor.panel_input("label", "Email").expect("edit text");
    editor.click(ClickTarget::Field(html)).expect("select html");
    editor
        .panel_input("value", "<code>C:\\new\\notes</code>\n<p>second line</p>")
        .expect("edit html");
    editor.click(ClickTarget::Field(radio)).expect("select radio");
    editor.panel_input("options", "Yes,No").expect("edit radio");

    let before = editor.canvas().snapshots().expect("snapshots");
    let definition = editor.to_definition(&FormMetadata::new("Contact")).expect("definition");
    let stored = serde_json::to_string(&definition).expect("serialize");
    let restored: PersistedFormDefinition = serde_json::from_str(&stored).expect("deserialize");

    let mut reloaded = FormCanvas::new();
    reloaded
        .load_from_definition(editor.factory(), &restored, LoadPolicy::Fail)
        .expect("load");

    assert_eq!(reloaded.snapshots().expect("snapshots"), before);
    let contents: Vec<_> = reloaded.iter().map(|f| f.content().to_string()).collect();
    let edited: Vec<_> = editor.canvas().iter().map(|f| f.content().to_string()).collect();
    assert_eq!(contents, edited);
}
