use indoc::indoc;

use super::*;
use crate::field::FieldKind;
use crate::test_utils::{dump, model, tree};

#[test]
fn struct_with_list_of_strings() {
    let tree = tree(indoc! {r#"
        {"struct": {
            "name": {"string": {}},
            "tags": {"list": {"string": {}}}
        }}
    "#});

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      name: text "Name"
      tags: list "Tags"
        text
    "#);
}

#[test]
fn scalars_follow_builtin_order() {
    let tree = tree(indoc! {r#"
        {"tuple": [
            {"string": {}},
            {"int": {}},
            {"float": {}},
            {"bool": {}},
            {"dateTime": {}},
            {"null": {}},
            {"enum": ["a", "b"]},
            {"ref": "User"}
        ]}
    "#});

    insta::assert_snapshot!(dump(&tree), @r#"
    tuple
      0: text "0"
      1: integer "1"
      2: float "2"
      3: checkbox "3"
      4: dateTime "4"
      5: null "5"
      6: enum [a, b] "6"
      7: reference -> User "7"
    "#);
}

#[test]
fn labels_use_keys_verbatim_when_not_humanized() {
    let raw = infer(
        &model(r#"{"struct": {"created_at": {"dateTime": {}}}}"#),
        &Registry::default(),
        &InferOptions::new().humanize_labels(false),
    );
    let tree = raw.initialize();

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      created_at: dateTime "created_at"
    "#);
}

#[test]
fn annotations_set_label_and_description() {
    let tree = tree(indoc! {r#"
        {"struct": {
            "name": {"annotation": {
                "key": "label",
                "value": "Full name",
                "model": {"annotation": {
                    "key": "description",
                    "value": "As printed on the passport",
                    "model": {"unique": {"string": {}}}
                }}
            }}
        }}
    "#});

    let name = tree.traverse(&"name".parse().unwrap()).unwrap();
    let field = tree.field(name);
    assert!(matches!(field.kind, FieldKind::Text(_)));
    assert_eq!(field.label.as_deref(), Some("Full name"));
    assert_eq!(field.description.as_deref(), Some("As printed on the passport"));
}

#[test]
fn outermost_label_annotation_wins() {
    let tree = tree(indoc! {r#"
        {"annotation": {
            "key": "label",
            "value": "Outer",
            "model": {"annotation": {"key": "label", "value": "Inner", "model": {"int": {}}}}
        }}
    "#});

    assert_eq!(tree.field(tree.root()).label.as_deref(), Some("Outer"));
}

#[test]
fn unmatched_model_becomes_error_field() {
    let raw = infer(
        &model(r#"{"struct": {"a": {"string": {}}}}"#),
        &Registry::new(),
        &InferOptions::default(),
    );
    let tree = raw.initialize();

    assert_eq!(
        tree.errors(),
        vec![(tree.root(), "no field constructor matches model `struct`")]
    );
}

#[test]
fn one_bad_subtree_does_not_abort_the_rest() {
    let mut registry = Registry::new();
    let builtin = Registry::builtin();
    for tag in ["struct", "text"] {
        registry.insert(*builtin.get(tag).unwrap());
    }

    let tree = infer(
        &model(r#"{"struct": {"a": {"string": {}}, "b": {"int": {}}}}"#),
        &registry,
        &InferOptions::default(),
    )
    .initialize();

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      a: text "A"
      b: error: no field constructor matches model `int` "B"
    "#);
}

#[test]
fn nesting_past_depth_limit_becomes_error_field() {
    let tree = infer(
        &model(r#"{"struct": {"a": {"struct": {"b": {"int": {}}}}}}"#),
        &Registry::default(),
        &InferOptions::new().max_depth(2),
    )
    .initialize();

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      a: struct "A"
        b: error: nesting depth limit of 2 exceeded
    "#);
}

#[test]
fn recursive_model_builds_each_node_once() {
    let model = model(indoc! {r#"
        {"recursive": {
            "top": "a",
            "models": {
                "a": {"struct": {
                    "x": {"recurse": {"label": "a"}},
                    "y": {"recurse": {"label": "b"}},
                    "z": {"list": {"recurse": {"label": "a"}}}
                }},
                "b": {"struct": {
                    "p": {"recurse": {"label": "a"}},
                    "q": {"recurse": {"label": "b"}}
                }}
            }
        }}
    "#});

    let raw = infer(&model, &Registry::default(), &InferOptions::default());
    assert_eq!(raw.len(), 9);

    let tree = raw.initialize();
    assert_eq!(tree.len(), 9);
    assert!(!tree.has_errors());
}

#[test]
fn recursion_is_a_group_of_one() {
    let tree = tree(indoc! {r#"
        {"recursion": {
            "label": "node",
            "model": {"struct": {"next": {"optional": {"recurse": {"label": "node"}}}}}
        }}
    "#});

    insta::assert_snapshot!(dump(&tree), @r#"
    recursive top=node
      node: struct
        next: optional "Next"
          recurse node
    "#);
}
