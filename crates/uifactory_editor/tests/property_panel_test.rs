mod common;

use tracing_test::traced_test;
use uifactory_components::ComponentFactory;
use uifactory_editor::{ClickTarget, EditorConfig, EditorError, FormEditor, Message, PropertyPanel};
use uifactory_forms::{FieldSchema, OptionSpec, RenderMode};

#[test]
fn test_controls_follow_schema_order() {
    let mut editor = common::editor();
    let id = editor.add_field("textarea").expect("add");
    editor.click(ClickTarget::Field(id)).expect("select");

    let keys: Vec<_> = editor.panel().controls().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["label", "name", "placeholder", "rows", "value"]);

    let rows = editor.panel().control("rows").expect("rows control");
    assert_eq!(rows.editor, "number");
    assert_eq!(rows.value, "3");
    assert!(rows.markup.contains("type=\"number\""));
}

#[test]
fn test_controls_render_editing_view() {
    let mut editor = common::editor();
    let id = editor.add_field("text").expect("add");
    editor.click(ClickTarget::Field(id)).expect("select");

    let label = editor.panel().control("label").expect("label control");
    assert!(label.markup.contains("id=\"label\""));
    assert!(label.markup.contains(">Label</label>"));
    assert!(label.markup.contains("value=\"Text field\""));
    assert_eq!(label.value, "Text field");
    assert!(editor.panel().render_html().contains("id=\"placeholder\""));
}

#[test]
fn test_input_updates_field_without_nesting_wrapper() {
    let mut editor = common::editor();
    let id = editor.add_field("text").expect("add");
    editor.click(ClickTarget::Field(id)).expect("select");

    editor
        .update(Message::PanelInput {
            key: "label".to_string(),
            value: "Full name".to_string(),
        })
        .expect("input");

    let field = editor.canvas().get(id).expect("field");
    assert_eq!(field.view(), RenderMode::Updating);
    assert!(field.content().starts_with("<label>Full name</label>"));
    assert!(!field.content().contains("form-group"));
    let values = field.values().expect("snapshot");
    assert_eq!(values.get_str("label"), Some("Full name"));
    assert_eq!(values.get_str("name"), Some("text-field"));
    assert_eq!(editor.selection().toolbar().anchor, Some(id));
}

#[test]
fn test_choice_edit_keeps_every_choice() {
    let mut editor = common::editor();
    let id = editor.add_field("radio").expect("add");
    editor.click(ClickTarget::Field(id)).expect("select");

    editor.panel_input("options", "Red, Green, Blue").expect("input");

    let content = editor.canvas().get(id).expect("field").content().to_string();
    assert!(!content.contains("<div"));
    assert!(content.contains("Choose one"));
    for choice in ["Red", "Green", "Blue"] {
        assert!(content.contains(&format!("value=\"{}\"", choice)), "missing {}", choice);
    }
}

#[test]
fn test_malformed_number_is_accepted() {
    let mut editor = common::editor();
    let id = editor.add_field("textarea").expect("add");
    editor.click(ClickTarget::Field(id)).expect("select");

    editor.panel_input("rows", "many").expect("input");

    let field = editor.canvas().get(id).expect("field");
    assert!(field.content().contains("rows=\"many\""));
    assert_eq!(field.values().expect("snapshot").get_str("rows"), Some("many"));
}

#[test]
fn test_input_without_selection_is_ignored() {
    let mut editor = common::editor();
    let id = editor.add_field("text").expect("add");
    let before = editor.canvas().get(id).expect("field").snapshot().to_string();

    editor.panel_input("label", "ignored").expect("input");

    assert_eq!(editor.canvas().get(id).expect("field").snapshot(), before);
}

#[test]
fn test_apply_requires_matching_owner() {
    let factory = common::factory();
    let mut editor = common::editor();
    let a = editor.add_field("text").expect("add");
    let b = editor.add_field("text").expect("add");
    editor.click(ClickTarget::Field(a)).expect("select");

    let panel: PropertyPanel = editor.panel().clone();
    let mut other = editor.canvas().get(b).expect("field").clone();
    let result = panel.apply(&factory, &mut other);

    assert!(matches!(result, Err(EditorError::PanelNotPopulated(id)) if id == b));
}

#[test]
fn test_html_value_uses_textarea_editor() {
    let mut editor = common::editor();
    let id = editor.add_field("html").expect("add");
    editor.click(ClickTarget::Field(id)).expect("select");

    let control = editor.panel().control("value").expect("value control");
    assert_eq!(control.editor, "textarea");

    editor.panel_input("value", "<h2>Welcome</h2>").expect("input");
    assert_eq!(editor.canvas().get(id).expect("field").content(), "<h2>Welcome</h2>");
}

#[test]
fn test_choice_label_edit_keeps_custom_choices() {
    let mut editor = common::editor();
    let id = editor.add_field("radio").expect("add");
    editor.click(ClickTarget::Field(id)).expect("select");
    editor.panel_input("options", "Red,Green").expect("choices");

    // Reselect so the panel is rebuilt from the stored snapshot.
    editor.click(ClickTarget::Outside).expect("deselect");
    editor.click(ClickTarget::Field(id)).expect("select again");
    assert_eq!(editor.panel().control("options").expect("options control").value, "Red,Green");
    editor.panel_input("label", "Colour").expect("label");

    let field = editor.canvas().get(id).expect("field");
    let content = field.content();
    assert!(content.contains("Colour"));
    assert!(content.contains("value=\"Red\""));
    assert!(content.contains("value=\"Green\""));
    assert!(!content.contains("Option 1"));
    assert_eq!(field.values().expect("snapshot").get_str("options"), Some("Red,Green"));
}

#[test]
fn test_unchanged_edit_keeps_added_markup() {
    let mut editor = common::editor();
    let text = editor.add_field("text").expect("add text");
    let radio = editor.add_field("radio").expect("add radio");

    for id in [text, radio] {
        let before = editor.canvas().get(id).expect("field").content().to_string();
        editor.click(ClickTarget::Field(id)).expect("select");
        let name = editor.panel().control("name").expect("name control").value.clone();
        editor.panel_input("name", name).expect("input");
        assert_eq!(editor.canvas().get(id).expect("field").content(), before);
    }
    assert!(!editor.canvas().render_html().contains("form-group"));
}

fn widget_factory() -> ComponentFactory {
    let mut factory = ComponentFactory::new().expect("factory");
    factory
        .define("plain", "<input id=\"{{ key }}\" value=\"{{ value }}\">", FieldSchema::new())
        .expect("define plain");
    factory
        .define("strict", "<input id=\"{{ key }}\" data-extra=\"{{ missing }}\">", FieldSchema::new())
        .expect("define strict");
    factory
        .define(
            "widget",
            "<div class=\"form-group\"><p>{{ a }}|{{ b }}</p></div>",
            FieldSchema::new()
                .with_option("a", OptionSpec::new("first").edited_with("plain"))
                .with_option("b", OptionSpec::new("second").edited_with("strict")),
        )
        .expect("define widget");
    factory
}

#[test]
#[traced_test]
fn test_failed_control_render_keeps_panel_usable() {
    let mut editor = FormEditor::new(widget_factory(), &EditorConfig::default());
    let id = editor.add_field("widget").expect("add");

    editor.click(ClickTarget::Field(id)).expect("select");

    assert_eq!(editor.selection().selected(), Some(id));
    assert_eq!(editor.panel().owner(), Some(id));
    let keys: Vec<_> = editor.panel().controls().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["a"]);
    assert!(logs_contain("editor control failed to render"));

    editor.panel_input("a", "edited").expect("input");
    let field = editor.canvas().get(id).expect("field");
    assert_eq!(field.content(), "<p>edited|second</p>");
}
