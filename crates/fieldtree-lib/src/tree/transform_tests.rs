use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use indoc::indoc;
use serde_json::json;

use crate::Error;
use crate::field::{Expression, Value};
use crate::path::{ValuePath, ValueSegment};
use crate::test_utils::tree;

const EVENT: &str = indoc! {r#"
    {"struct": {
        "title": {"string": {}},
        "at": {"dateTime": {}},
        "seats": {"int": {}},
        "level": {"enum": ["low", "high"]},
        "host": {"ref": "User"},
        "notes": {"optional": {"string": {}}},
        "labels": {"map": {"bool": {}}},
        "place": {"union": {"online": {"string": {}}, "venue": {"tuple": [{"float": {}}, {"float": {}}]}}}
    }}
"#};

#[test]
fn raw_values_become_typed_values() {
    let tree = tree(EVENT);
    let raw = json!({
        "title": "Launch",
        "at": "2024-05-01T10:00:00+02:00",
        "seats": 40,
        "level": "high",
        "host": 7,
        "notes": null,
        "labels": {"public": true},
        "place": {"venue": [52.5, 13.4]}
    });

    let value = tree.transform_raw_value(tree.root(), &raw);

    let Value::Struct(fields) = value else {
        panic!("expected a struct value");
    };
    assert_eq!(fields["title"], Value::text("Launch"));
    assert_eq!(
        fields["at"],
        Value::DateTime(Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()))
    );
    assert_eq!(fields["seats"], Value::Int(40));
    assert_eq!(fields["level"], Value::Enum(Some("high".into())));
    assert_eq!(fields["host"], Value::Ref(Some("7".into())));
    assert_eq!(fields["notes"], Value::Optional(None));
    assert_eq!(
        fields["labels"],
        Value::Map(IndexMap::from([("public".to_string(), Value::Bool(true))]))
    );
    assert_eq!(
        fields["place"].selected(),
        Some((
            "venue",
            Some(&Value::Tuple(vec![Value::Float(52.5), Value::Float(13.4)]))
        ))
    );
}

#[test]
fn missing_or_mistyped_raw_values_fall_back_to_defaults() {
    let tree = tree(EVENT);

    let value = tree.transform_raw_value(
        tree.root(),
        &json!({"title": 12, "level": "medium", "place": {"nowhere": 1}}),
    );

    assert_eq!(&value, tree.default_value(tree.root()));
    let Value::Struct(fields) = value else {
        panic!("expected a struct value");
    };
    assert_eq!(fields["title"], Value::text(""));
    assert_eq!(fields["level"], Value::Enum(Some("low".into())));
    assert_eq!(fields["at"], Value::DateTime(None));
    assert_eq!(fields["place"].selected().map(|(key, _)| key), Some("online"));
}

#[test]
fn non_object_raw_struct_is_the_default() {
    let tree = tree(EVENT);

    assert_eq!(
        &tree.transform_raw_value(tree.root(), &json!("nope")),
        tree.default_value(tree.root())
    );
}

#[test]
fn values_become_expressions() {
    let tree = tree(r#"{"struct": {"name": {"string": {}}, "tags": {"list": {"optional": {"int": {}}}}}}"#);
    let value = tree.transform_raw_value(tree.root(), &json!({"name": "a", "tags": [1, null]}));

    let expression = tree.to_expression(tree.root(), &value).unwrap();

    assert_eq!(
        expression,
        Expression::Struct(vec![
            ("name".into(), Expression::String("a".into())),
            (
                "tags".into(),
                Expression::List(vec![
                    Expression::Optional(Some(Box::new(Expression::Int(1)))),
                    Expression::Optional(None),
                ])
            ),
        ])
    );
    insta::assert_snapshot!(serde_json::to_string(&expression).unwrap(), @r#"{"type":"struct","value":[["name",{"type":"string","value":"a"}],["tags",{"type":"list","value":[{"type":"optional","value":{"type":"int","value":1}},{"type":"optional","value":null}]}]]}"#);
}

#[test]
fn union_value_becomes_tagged_expression() {
    let tree = tree(EVENT);
    let place = tree.traverse(&"place".parse().unwrap()).unwrap();
    let value = tree.transform_raw_value(place, &json!({"online": "https://example.com"}));

    assert_eq!(
        tree.to_expression(place, &value).unwrap(),
        Expression::Union {
            key: "online".into(),
            value: Box::new(Expression::String("https://example.com".into())),
        }
    );
}

#[test]
fn shape_mismatch_reports_the_value_path() {
    let tree = tree(r#"{"struct": {"tags": {"list": {"int": {}}}}}"#);
    let value = Value::Struct(IndexMap::from([(
        "tags".to_string(),
        Value::List(vec![Value::Int(1), Value::text("two")]),
    )]));

    let error = tree.to_expression(tree.root(), &value).unwrap_err();

    let Error::ValueShape { path, expected } = error else {
        panic!("expected a shape error, got {error:?}");
    };
    assert_eq!(
        path,
        ValuePath::from(vec![ValueSegment::Struct { key: "tags".into() }, ValueSegment::List])
    );
    assert_eq!(expected, "integer");
}

#[test]
fn unknown_union_key_is_an_error() {
    let tree = tree(r#"{"union": {"a": {"int": {}}}}"#);
    let value = Value::Union {
        selected: "b".into(),
        values: IndexMap::new(),
    };

    let error = tree.to_expression(tree.root(), &value).unwrap_err();

    assert_eq!(error.to_string(), "union at `$` has no member `b`");
}
