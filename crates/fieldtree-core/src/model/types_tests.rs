use super::*;

#[test]
fn tag_names_are_stable() {
    assert_eq!(Model::DateTime.tag().as_str(), "dateTime");
    assert_eq!(Model::Recurse("x".into()).tag().to_string(), "recurse");
    assert!(ModelTag::List.is_modifier());
    assert!(!ModelTag::Struct.is_modifier());
}

#[test]
fn unwrap_annotations_strips_nested_wrappers() {
    let model = Model::Unique(Box::new(Model::Annotation {
        key: "description".into(),
        value: "Primary e-mail".into(),
        model: Box::new(Model::Annotation {
            key: "label".into(),
            value: "E-mail".into(),
            model: Box::new(Model::String),
        }),
    }));

    assert_eq!(model.unwrap_annotations(), &Model::String);
    assert_eq!(
        model.annotations(),
        vec![("description", "Primary e-mail"), ("label", "E-mail")]
    );
}

#[test]
fn recursion_is_a_group_of_one() {
    let model = Model::Recursion {
        label: "node".into(),
        model: Box::new(Model::Recurse("node".into())),
    };

    let (members, top) = model.recursion_group().unwrap();
    assert_eq!(top, "node");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].0, "node");
}

#[test]
fn modifier_inner() {
    let list = Model::List(Box::new(Model::Int));
    assert_eq!(list.modifier_inner(), Some(&Model::Int));
    assert_eq!(Model::Int.modifier_inner(), None);
}
