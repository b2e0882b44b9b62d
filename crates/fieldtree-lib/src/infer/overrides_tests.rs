use indoc::indoc;

use crate::path::KeyPath;
use crate::test_utils::{dump, tree_with_overrides};

const PROFILE: &str = indoc! {r#"
    {"struct": {
        "name": {"string": {}},
        "tags": {"list": {"string": {}}},
        "avatar": {"optional": {"string": {}}}
    }}
"#};

#[test]
fn base_override_keeps_inferred_modifiers() {
    let tree = tree_with_overrides(
        PROFILE,
        r#"[[["tags"], {"type": "password", "minLength": 8}], [["avatar"], {"type": "file", "accept": ["image/png"]}]]"#,
    );

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      name: text "Name"
      tags: list "Tags"
        password min=8
      avatar: optional "Avatar"
        file accept=image/png
    "#);
    assert!(tree.stale_overrides().is_empty());
}

#[test]
fn override_sets_label_and_payload() {
    let tree = tree_with_overrides(
        PROFILE,
        r#"[[["name"], {"type": "text", "label": "Full name", "multiline": true}]]"#,
    );

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      name: text multiline "Full name"
      tags: list "Tags"
        text
      avatar: optional "Avatar"
        text
    "#);
}

#[test]
fn modifier_override_replaces_outermost_field() {
    let tree = tree_with_overrides(
        PROFILE,
        r#"[[["tags"], {"type": "list", "label": "Keywords", "field": {"type": "text", "multiline": true}}]]"#,
    );

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      name: text "Name"
      tags: list "Keywords"
        text multiline
      avatar: optional "Avatar"
        text
    "#);
}

#[test]
fn override_that_does_not_fit_the_model_becomes_error() {
    let tree = tree_with_overrides(PROFILE, r#"[[["name"], {"type": "integer"}]]"#);

    assert_eq!(tree.errors().len(), 1);
    assert_eq!(
        tree.errors()[0].1,
        "field type `integer` does not match model `string`"
    );
    let name = tree.traverse(&"name".parse().unwrap()).unwrap();
    assert_eq!(tree.field(name).label.as_deref(), Some("Name"));
}

#[test]
fn unknown_override_tag_becomes_error() {
    let tree = tree_with_overrides(PROFILE, r#"[[["name"], {"type": "slider"}]]"#);

    assert_eq!(tree.errors()[0].1, "unknown field type `slider`");
}

#[test]
fn unused_override_is_reported_stale() {
    let tree = tree_with_overrides(
        PROFILE,
        r#"[[["missing"], {"type": "text"}], [["name"], {"type": "text"}]]"#,
    );

    assert_eq!(tree.stale_overrides(), &[KeyPath::from(vec!["missing"])]);
    assert!(!tree.has_errors());
}

#[test]
fn overrides_apply_through_recursion_entry_only() {
    let model = indoc! {r#"
        {"recursive": {
            "top": "a",
            "models": {
                "a": {"struct": {"x": {"int": {}}, "b": {"recurse": {"label": "b"}}}},
                "b": {"struct": {"y": {"string": {}}}}
            }
        }}
    "#};

    let tree = tree_with_overrides(
        model,
        r#"[[["x"], {"type": "float"}], [["y"], {"type": "password"}], [[], {"type": "struct", "label": "Entry"}]]"#,
    );

    insta::assert_snapshot!(dump(&tree), @r#"
    recursive top=a
      a: struct "Entry"
        x: error: field type `float` does not match model `int` "X"
        b: recurse b "B"
      b: struct
        y: text "Y"
    "#);
    assert_eq!(tree.stale_overrides(), &[KeyPath::from(vec!["y"])]);
}

#[test]
fn stored_group_members_stay_closed_to_overrides() {
    let model = indoc! {r#"
        {"recursive": {
            "top": "a",
            "models": {
                "a": {"struct": {"x": {"int": {}}}},
                "b": {"struct": {"y": {"string": {}}}}
            }
        }}
    "#};

    let tree = tree_with_overrides(
        model,
        r#"[[[], {"type": "recursive", "top": "a", "fields": [["b", {"type": "struct"}]]}], [["y"], {"type": "password"}]]"#,
    );

    insta::assert_snapshot!(dump(&tree), @r#"
    recursive top=a
      a: struct
        x: integer "X"
      b: struct
        y: text "Y"
    "#);
    assert_eq!(tree.stale_overrides(), &[KeyPath::from(vec!["y"])]);
}

#[test]
fn override_keeps_annotated_label_and_description() {
    let model = indoc! {r#"
        {"struct": {
            "secret": {"annotation": {
                "key": "label",
                "value": "API key",
                "model": {"annotation": {
                    "key": "description",
                    "value": "Shown once",
                    "model": {"string": {}}
                }}
            }},
            "note": {"annotation": {"key": "label", "value": "Note", "model": {"string": {}}}}
        }}
    "#};

    let tree = tree_with_overrides(
        model,
        r#"[[["secret"], {"type": "password"}], [["note"], {"type": "text", "label": "Remark", "description": "Free text"}]]"#,
    );

    let secret = tree.field(tree.traverse(&"secret".parse().unwrap()).unwrap());
    assert_eq!(secret.label.as_deref(), Some("API key"));
    assert_eq!(secret.description.as_deref(), Some("Shown once"));

    let note = tree.field(tree.traverse(&"note".parse().unwrap()).unwrap());
    assert_eq!(note.label.as_deref(), Some("Remark"));
    assert_eq!(note.description.as_deref(), Some("Free text"));
}
