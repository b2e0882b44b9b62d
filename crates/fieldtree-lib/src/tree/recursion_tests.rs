use indexmap::IndexMap;
use indoc::indoc;

use crate::field::{FieldKind, Value};
use crate::printer::FieldPrinter;
use crate::test_utils::tree;

fn record(key: &str, value: Value) -> Value {
    Value::Struct(IndexMap::from([(key.to_string(), value)]))
}

#[test]
fn recurse_aliases_the_group_entry() {
    let tree = tree(indoc! {r#"
        {"recursive": {
            "top": "node",
            "models": {"node": {"struct": {"children": {"list": {"recurse": {"label": "node"}}}}}}
        }}
    "#});

    let FieldKind::Recursive(group) = &tree.field(tree.root()).kind else {
        panic!("expected a recursion group at the root");
    };
    let top = group.top_field().unwrap();

    let children = tree.traverse(&"children".parse().unwrap()).unwrap();
    let FieldKind::List(element) = tree.field(children).kind else {
        panic!("children should be a list");
    };
    let FieldKind::Recurse(recurse) = &tree.field(element).kind else {
        panic!("list element should be a recurse");
    };

    assert_eq!(recurse.target, Some(top));
    assert_eq!(tree.resolve(element), top);
    assert_eq!(tree.resolve(tree.root()), top);
}

#[test]
fn deep_paths_through_recursion_stay_finite() {
    let tree = tree(indoc! {r#"
        {"recursion": {
            "label": "node",
            "model": {"struct": {
                "value": {"int": {}},
                "children": {"list": {"recurse": {"label": "node"}}}
            }}
        }}
    "#});

    let deep = "children.children.children.children.value".parse().unwrap();
    let id = tree.traverse(&deep).unwrap();
    assert_eq!(tree.field(id).kind, FieldKind::Integer);

    let path = tree.value_path_for_key_path(&deep).unwrap();
    assert_eq!(
        path.to_string(),
        "$.children.[].children.[].children.[].children.[].value"
    );
}

#[test]
fn mutual_recursion_binds_siblings() {
    let tree = tree(indoc! {r#"
        {"recursive": {
            "top": "expr",
            "models": {
                "expr": {"union": {
                    "lit": {"int": {}},
                    "call": {"recurse": {"label": "call"}}
                }},
                "call": {"struct": {
                    "name": {"string": {}},
                    "args": {"list": {"recurse": {"label": "expr"}}}
                }}
            }
        }}
    "#});

    assert!(!tree.has_errors());
    let id = tree.traverse(&"call.args.call.name".parse().unwrap()).unwrap();
    assert!(matches!(tree.field(id).kind, FieldKind::Text(_)));
}

#[test]
fn inner_group_shadows_outer_label() {
    let tree = tree(indoc! {r#"
        {"recursion": {
            "label": "t",
            "model": {"struct": {
                "outer": {"optional": {"recurse": {"label": "t"}}},
                "inner": {"recursion": {
                    "label": "t",
                    "model": {"struct": {"leaf": {"bool": {}}, "again": {"optional": {"recurse": {"label": "t"}}}}}
                }}
            }}
        }}
    "#});

    let again = tree.traverse(&"inner.again.leaf".parse().unwrap()).unwrap();
    assert_eq!(tree.field(again).kind, FieldKind::Checkbox);
    assert!(tree.traverse(&"inner.again.outer".parse().unwrap()).is_none());
    assert!(tree.traverse(&"outer.inner.leaf".parse().unwrap()).is_some());
}

#[test]
fn unbound_label_becomes_error_field() {
    let tree = tree(r#"{"struct": {"next": {"recurse": {"label": "missing"}}}}"#);

    assert_eq!(
        tree.errors().into_iter().map(|(_, m)| m).collect::<Vec<_>>(),
        ["recursion label `missing` is not bound by an enclosing group"]
    );
    let next = tree.traverse(&"next".parse().unwrap()).unwrap();
    assert!(tree.field(tree.resolve(next)).is_error());
}

#[test]
fn alias_cycle_becomes_error_field() {
    let tree = tree(r#"{"recursive": {"top": "a", "models": {"a": {"recurse": {"label": "a"}}}}}"#);

    assert_eq!(
        tree.errors().into_iter().map(|(_, m)| m).collect::<Vec<_>>(),
        ["recursion `a` never reaches a field"]
    );
    assert!(tree.field(tree.resolve(tree.root())).is_error());
}

#[test]
fn modifier_cycle_is_a_valid_type() {
    let tree = tree(r#"{"recursion": {"label": "t", "model": {"list": {"recurse": {"label": "t"}}}}}"#);

    assert!(!tree.has_errors());
    assert!(tree.traverse(&"x".parse().unwrap()).is_none());
    insta::assert_snapshot!(FieldPrinter::new(&tree).with_ids(true).dump(), @r"
    recursive top=t #2
      t: list #1
        recurse t -> #1 #0
    ");
}

#[test]
fn defaults_stop_where_each_walk_re_enters() {
    let tree = tree(indoc! {r#"
        {"recursive": {
            "top": "a",
            "models": {
                "a": {"struct": {"b": {"recurse": {"label": "b"}}}},
                "b": {"struct": {"a": {"recurse": {"label": "a"}}}}
            }
        }}
    "#});
    let FieldKind::Recursive(group) = &tree.field(tree.root()).kind else {
        panic!("expected a recursion group at the root");
    };

    assert_eq!(
        tree.default_value(tree.root()),
        &record("b", record("a", Value::Null))
    );
    assert_eq!(
        tree.default_value(group.fields["b"]),
        &record("a", record("b", Value::Null))
    );
}
