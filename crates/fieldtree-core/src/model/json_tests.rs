use indoc::indoc;

use super::*;

#[test]
fn parse_leaf_models() {
    assert_eq!(Model::from_json(r#"{"string": {}}"#).unwrap(), Model::String);
    assert_eq!(Model::from_json(r#"{"int": null}"#).unwrap(), Model::Int);
    assert_eq!(Model::from_json(r#"{"dateTime": {}}"#).unwrap(), Model::DateTime);
    assert_eq!(Model::from_json(r#"{"null": {}}"#).unwrap(), Model::Null);
}

#[test]
fn parse_struct_preserves_declaration_order() {
    let json = indoc! {r#"
        {"struct": {
            "zeta": {"string": {}},
            "alpha": {"int": {}},
            "mid": {"list": {"string": {}}}
        }}
    "#};

    let model = Model::from_json(json).unwrap();
    let Model::Struct(fields) = model else {
        panic!("expected struct");
    };
    let names: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
    assert_eq!(fields[2].1, Model::List(Box::new(Model::String)));
}

#[test]
fn parse_union_enum_and_ref() {
    let json = indoc! {r#"
        {"union": {
            "color": {"enum": ["red", "green"]},
            "owner": {"ref": "User"}
        }}
    "#};

    let model = Model::from_json(json).unwrap();
    assert_eq!(
        model,
        Model::Union(vec![
            ("color".into(), Model::Enum(vec!["red".into(), "green".into()])),
            ("owner".into(), Model::Ref("User".into())),
        ])
    );
}

#[test]
fn parse_recursive_group() {
    let json = indoc! {r#"
        {"recursive": {
            "models": {
                "node": {"struct": {"children": {"list": {"recurse": {"label": "node"}}}}}
            },
            "top": "node"
        }}
    "#};

    let model = Model::from_json(json).unwrap();
    let Model::Recursive { models, top } = &model else {
        panic!("expected recursive");
    };
    assert_eq!(top, "node");
    assert_eq!(models.len(), 1);
    assert_eq!(model.tag(), ModelTag::Recursive);
}

#[test]
fn parse_annotation_and_unique() {
    let json = indoc! {r#"
        {"annotation": {
            "key": "label",
            "value": "E-mail",
            "model": {"unique": {"string": {}}}
        }}
    "#};

    let model = Model::from_json(json).unwrap();
    assert_eq!(model.unwrap_annotations(), &Model::String);
    assert_eq!(model.annotations(), vec![("label", "E-mail")]);
}

#[test]
fn unknown_tag_is_rejected() {
    let err = Model::from_json(r#"{"decimal": {}}"#).unwrap_err();
    assert!(matches!(err, ModelError::Json(_)));
}
