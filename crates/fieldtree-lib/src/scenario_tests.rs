//! End-to-end properties over whole trees.

use indexmap::IndexMap;
use indoc::indoc;

use crate::field::{FieldId, FieldKind, Value};
use crate::infer::Registry;
use crate::path::{KeyPath, ValuePath, ValueSegment};
use crate::serialize::{serialize, unserialize};
use crate::test_utils::{dump, model, tree};
use crate::tree::{FieldTree, codes};

const FIXTURES: &[&str] = &[
    r#"{"struct": {"name": {"string": {}}, "tags": {"list": {"string": {}}}}}"#,
    r#"{"tuple": [{"int": {}}, {"optional": {"map": {"float": {}}}}, {"enum": ["a", "b"]}]}"#,
    r#"{"union": {"none": {"null": {}}, "at": {"dateTime": {}}, "who": {"ref": "User"}}}"#,
    r#"{"struct": {"meta": {"annotation": {"key": "label", "value": "Meta", "model": {"unique": {"string": {}}}}}}}"#,
    indoc! {r#"
        {"recursive": {
            "top": "node",
            "models": {"node": {"struct": {
                "value": {"bool": {}},
                "children": {"list": {"recurse": {"label": "node"}}}
            }}}
        }}
    "#},
    indoc! {r#"
        {"struct": {
            "address": {"struct": {"city": {"string": {}}, "lines": {"list": {"optional": {"string": {}}}}}},
            "points": {"map": {"tuple": [{"float": {}}, {"float": {}}]}}
        }}
    "#},
];

/// Every key path reachable over owned edges.
fn key_paths(tree: &FieldTree) -> Vec<KeyPath> {
    let mut out = Vec::new();
    collect_key_paths(tree, tree.root(), KeyPath::root(), &mut out);
    out
}

fn collect_key_paths(tree: &FieldTree, id: FieldId, at: KeyPath, out: &mut Vec<KeyPath>) {
    match &tree.field(id).kind {
        FieldKind::Struct(s) => {
            for (key, child) in &s.fields {
                let path = at.child(key.as_str());
                out.push(path.clone());
                collect_key_paths(tree, *child, path, out);
            }
        }
        FieldKind::Tuple(t) => {
            for (index, child) in t.fields.iter().enumerate() {
                let path = at.child(index);
                out.push(path.clone());
                collect_key_paths(tree, *child, path, out);
            }
        }
        FieldKind::Union(u) => {
            for variant in &u.fields {
                let path = at.child(variant.key.as_str());
                out.push(path.clone());
                collect_key_paths(tree, variant.field, path, out);
            }
        }
        FieldKind::Optional(inner) | FieldKind::List(inner) | FieldKind::Map(inner) => {
            collect_key_paths(tree, *inner, at, out)
        }
        FieldKind::Recursive(group) => {
            if let Some(top) = group.top_field() {
                collect_key_paths(tree, top, at, out);
            }
        }
        _ => {}
    }
}

#[test]
fn serialized_trees_round_trip() {
    for fixture in FIXTURES {
        let original = tree(fixture);
        let serialized = serialize(&original);

        let rebuilt = unserialize(&serialized, &model(fixture), &Registry::default()).initialize();

        assert!(!rebuilt.has_errors(), "fixture {fixture}");
        assert_eq!(dump(&rebuilt), dump(&original), "fixture {fixture}");
        assert_eq!(key_paths(&rebuilt), key_paths(&original), "fixture {fixture}");
    }
}

#[test]
fn key_paths_and_value_paths_are_consistent() {
    for fixture in FIXTURES {
        let tree = tree(fixture);

        for key_path in key_paths(&tree) {
            let field = tree.traverse(&key_path).unwrap();
            let value_path = tree.value_path_for_key_path(&key_path).unwrap();
            let (modifiers, base) = tree.modifier_stack(field);

            if value_path.modifier_count() > 0 {
                assert!(value_path.len() > key_path.len(), "{key_path} -> {value_path}");
            } else {
                assert_eq!(value_path.len(), key_path.len(), "{key_path} -> {value_path}");
            }
            assert_eq!(value_path.key_path(), key_path);

            let again = tree.traverse(&value_path.key_path()).unwrap();
            assert_eq!(tree.field(again).kind.tag(), tree.field(field).kind.tag());
            assert_eq!(tree.traverse_value_path(&value_path), Some(base));
            assert!(modifiers.len() <= value_path.modifier_count());
        }
    }
}

#[test]
fn recursion_builds_one_field_per_model_node() {
    let tree = tree(FIXTURES[4]);

    // recursive, struct, bool, list, recurse
    assert_eq!(tree.len(), 5);
    let deep: KeyPath = "children.children.children.children.children.value".parse().unwrap();
    assert!(tree.traverse(&deep).is_some());
}

#[test]
fn recursive_node_element_is_the_top_field() {
    let tree = tree(indoc! {r#"
        {"recursive": {
            "models": {"node": {"struct": {"children": {"list": {"recurse": {"label": "node"}}}}}},
            "top": "node"
        }}
    "#});

    let FieldKind::Recursive(group) = &tree.field(tree.root()).kind else {
        panic!("expected a recursion group");
    };
    let top = group.top_field().unwrap();
    let children = tree.traverse(&"children".parse().unwrap()).unwrap();
    let FieldKind::List(element) = tree.field(children).kind else {
        panic!("children should be a list");
    };

    assert_eq!(tree.resolve(element), top);
    assert_eq!(tree.traverse(&"children.children".parse().unwrap()), Some(children));
    assert_eq!(tree.len(), 4);
}

#[test]
fn name_and_tags_scenario() {
    let tree = tree(FIXTURES[0]);

    insta::assert_snapshot!(dump(&tree), @r#"
    struct
      name: text "Name"
      tags: list "Tags"
        text
    "#);

    let tags = tree.value_path_for_key_path(&"tags".parse().unwrap()).unwrap();
    assert_eq!(
        tags,
        ValuePath::from(vec![ValueSegment::Struct { key: "tags".into() }, ValueSegment::List])
    );

    let filters = tree.filter_configurations();
    assert!(filters.iter().any(|f| f.id == "$.tags:ListLengthEquals"
        && f.path == ValuePath::from(vec![ValueSegment::Struct { key: "tags".into() }])));
    assert!(filters.iter().any(|f| f.id == "$.tags.[]:StringEquals" && f.path == tags));
}

#[test]
fn struct_validation_reports_both_children() {
    let tree = tree(r#"{"struct": {"a": {"int": {}}, "b": {"enum": ["x"]}}}"#);
    let value = Value::Struct(IndexMap::from([
        ("a".to_string(), Value::Bool(true)),
        ("b".to_string(), Value::Enum(None)),
    ]));

    assert_eq!(
        tree.is_valid_value(tree.root(), &value),
        [codes::INVALID_TYPE, codes::REQUIRED]
    );
}
