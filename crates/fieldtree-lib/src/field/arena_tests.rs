use super::*;

#[test]
fn alloc_assigns_sequential_ids() {
    let mut arena = FieldArena::new();

    let a = arena.alloc(Field::new(FieldKind::Integer));
    let b = arena.alloc(Field::new(FieldKind::Float));

    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(b).unwrap().kind, FieldKind::Float);
}

#[test]
fn children_do_not_follow_recursion_aliases() {
    let recurse = FieldKind::Recurse(RecurseField {
        label: "node".into(),
        target: Some(FieldId::from_index(0)),
    });

    assert!(recurse.children().is_empty());
}

#[test]
fn modifier_tags() {
    assert_eq!(Modifier::from_tag("map"), Some(Modifier::Map));
    assert_eq!(Modifier::from_tag("struct"), None);
    assert_eq!(FieldKind::List(FieldId::from_index(3)).modifier(), Some((Modifier::List, FieldId::from_index(3))));
}
