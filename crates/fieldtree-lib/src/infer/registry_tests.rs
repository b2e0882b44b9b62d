use fieldtree_core::Model;

use super::*;
use crate::field::{Field, FieldKind, TextField};
use crate::test_utils::{dump, model};

fn is_string(model: &Model) -> bool {
    matches!(model, Model::String)
}

fn create_multiline(_: &Model, _: &mut BuildCx<'_>) -> Field {
    Field::new(FieldKind::Text(TextField { multiline: true }))
}

fn unserialize_multiline(
    _: &SerializedField,
    model: &Model,
    cx: &mut BuildCx<'_>,
) -> Result<Field, String> {
    Ok(create_multiline(model, cx))
}

fn create_checkbox(_: &Model, _: &mut BuildCx<'_>) -> Field {
    Field::new(FieldKind::Checkbox)
}

fn unserialize_checkbox(
    _: &SerializedField,
    _: &Model,
    _: &mut BuildCx<'_>,
) -> Result<Field, String> {
    Ok(Field::new(FieldKind::Checkbox))
}

#[test]
fn builtin_inference_order() {
    let tags: Vec<_> = Registry::builtin().tags().collect();

    assert_eq!(
        tags,
        [
            "text",
            "integer",
            "float",
            "checkbox",
            "dateTime",
            "null",
            "enum",
            "reference",
            "struct",
            "tuple",
            "union",
            "optional",
            "list",
            "map",
            "recursive",
            "recurse",
            "password",
            "file",
        ]
    );
}

#[test]
fn first_matching_constructor_wins() {
    let registry = Registry::builtin();

    assert_eq!(registry.find(&Model::String).unwrap().tag, "text");
    assert_eq!(registry.find(&Model::Ref("User".into())).unwrap().tag, "reference");
    assert!(Registry::new().find(&Model::String).is_none());
}

#[test]
fn new_tag_is_appended_behind_builtins() {
    let mut registry = Registry::builtin();
    registry.register("markdown", is_string, create_multiline, unserialize_multiline);

    assert_eq!(registry.len(), 19);
    assert_eq!(registry.find(&Model::String).unwrap().tag, "text");
    assert!(registry.get("markdown").is_some());
}

#[test]
fn merge_later_registry_wins_and_keeps_slot() {
    let mut custom = Registry::new();
    custom
        .register("text", is_string, create_multiline, unserialize_multiline)
        .register("toggle", |m| matches!(m, Model::Bool), create_checkbox, unserialize_checkbox);

    let merged = Registry::merge(&Registry::builtin(), &custom);
    let tags: Vec<_> = merged.tags().collect();

    assert_eq!(tags.first(), Some(&"text"));
    assert_eq!(tags.last(), Some(&"toggle"));
    assert_eq!(merged.len(), 19);

    let tree = infer(
        &model(r#"{"struct": {"bio": {"string": {}}}}"#),
        &merged,
        &InferOptions::default(),
    )
    .initialize();
    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      bio: text multiline "Bio"
    "#);
}

#[test]
fn merge_with_builtins_last_restores_builtin_text() {
    let mut custom = Registry::new();
    custom.register("text", is_string, create_multiline, unserialize_multiline);

    let merged = Registry::merge(&custom, &Registry::builtin());

    // The builtin text replaced the custom one in its slot.
    assert_eq!(merged.tags().next(), Some("text"));
    let tree = infer(&Model::String, &merged, &InferOptions::default()).initialize();
    assert_eq!(tree.field(tree.root()).kind, FieldKind::Text(TextField::default()));
}
