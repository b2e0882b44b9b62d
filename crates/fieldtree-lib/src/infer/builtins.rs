//! Builtin field constructors.
//!
//! Order matters: inference uses the first entry whose predicate accepts the
//! model. `password` and `file` accept string models but sit after `text`, so
//! they are only ever chosen by a serialized override.

use std::collections::HashSet;

use fieldtree_core::Model;
use indexmap::IndexMap;

use super::BuildCx;
use super::registry::{CreateFn, FieldConstructor, MatchFn, UnserializeFn};
use crate::field::{
    EnumField, Field, FieldId, FieldKind, FileField, Modifier, PasswordField, RecurseField,
    RecursiveField, ReferenceField, StructField, TextField, TupleField, UnionField, UnionVariant,
};
use crate::path::KeySegment;
use crate::serialize::SerializedField;

pub(super) const CONSTRUCTORS: &[FieldConstructor] = &[
    ctor("text", is_string, create_text, unserialize_text),
    ctor("integer", is_int, create_integer, unserialize_integer),
    ctor("float", is_float, create_float, unserialize_float),
    ctor("checkbox", is_bool, create_checkbox, unserialize_checkbox),
    ctor("dateTime", is_date_time, create_date_time, unserialize_date_time),
    ctor("null", is_null, create_null, unserialize_null),
    ctor("enum", is_enum, create_enum, unserialize_enum),
    ctor("reference", is_ref, create_reference, unserialize_reference),
    ctor("struct", is_struct, create_struct, unserialize_struct),
    ctor("tuple", is_tuple, create_tuple, unserialize_tuple),
    ctor("union", is_union, create_union, unserialize_union),
    ctor("optional", is_optional, create_modifier, unserialize_modifier),
    ctor("list", is_list, create_modifier, unserialize_modifier),
    ctor("map", is_map, create_modifier, unserialize_modifier),
    ctor("recursive", is_recursive, create_recursive, unserialize_recursive),
    ctor("recurse", is_recurse, create_recurse, unserialize_recurse),
    ctor("password", is_string, create_password, unserialize_password),
    ctor("file", is_string, create_file, unserialize_file),
];

const fn ctor(
    tag: &'static str,
    matches: MatchFn,
    create: CreateFn,
    unserialize: UnserializeFn,
) -> FieldConstructor {
    FieldConstructor {
        tag,
        matches,
        create,
        unserialize,
    }
}

macro_rules! scalar {
    ($is:ident, $create:ident, $unserialize:ident, $pat:pat, $kind:expr) => {
        fn $is(model: &Model) -> bool {
            matches!(model, $pat)
        }

        fn $create(_: &Model, _: &mut BuildCx<'_>) -> Field {
            Field::new($kind)
        }

        fn $unserialize(
            _: &SerializedField,
            _: &Model,
            _: &mut BuildCx<'_>,
        ) -> Result<Field, String> {
            Ok(Field::new($kind))
        }
    };
}

scalar!(is_int, create_integer, unserialize_integer, Model::Int, FieldKind::Integer);
scalar!(is_float, create_float, unserialize_float, Model::Float, FieldKind::Float);
scalar!(is_bool, create_checkbox, unserialize_checkbox, Model::Bool, FieldKind::Checkbox);
scalar!(is_date_time, create_date_time, unserialize_date_time, Model::DateTime, FieldKind::DateTime);
scalar!(is_null, create_null, unserialize_null, Model::Null, FieldKind::Null);

fn is_enum(model: &Model) -> bool {
    matches!(model, Model::Enum(_))
}

fn is_ref(model: &Model) -> bool {
    matches!(model, Model::Ref(_))
}

fn is_struct(model: &Model) -> bool {
    matches!(model, Model::Struct(_))
}

fn is_tuple(model: &Model) -> bool {
    matches!(model, Model::Tuple(_))
}

fn is_union(model: &Model) -> bool {
    matches!(model, Model::Union(_))
}

fn is_optional(model: &Model) -> bool {
    matches!(model, Model::Optional(_))
}

fn is_list(model: &Model) -> bool {
    matches!(model, Model::List(_))
}

fn is_map(model: &Model) -> bool {
    matches!(model, Model::Map(_))
}

fn is_recursive(model: &Model) -> bool {
    model.recursion_group().is_some()
}

fn is_recurse(model: &Model) -> bool {
    matches!(model, Model::Recurse(_))
}

fn is_string(model: &Model) -> bool {
    matches!(model, Model::String)
}

fn create_text(_: &Model, _: &mut BuildCx<'_>) -> Field {
    Field::new(FieldKind::Text(TextField::default()))
}

fn unserialize_text(
    payload: &SerializedField,
    _: &Model,
    _: &mut BuildCx<'_>,
) -> Result<Field, String> {
    Ok(Field::new(FieldKind::Text(TextField {
        multiline: payload.bool("multiline").unwrap_or(false),
    })))
}

fn create_password(_: &Model, _: &mut BuildCx<'_>) -> Field {
    Field::new(FieldKind::Password(PasswordField::default()))
}

fn unserialize_password(
    payload: &SerializedField,
    _: &Model,
    _: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let min_length = payload.u64("minLength").unwrap_or(0) as usize;
    Ok(Field::new(FieldKind::Password(PasswordField { min_length })))
}

fn create_file(_: &Model, _: &mut BuildCx<'_>) -> Field {
    Field::new(FieldKind::File(FileField::default()))
}

fn unserialize_file(
    payload: &SerializedField,
    _: &Model,
    _: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let accept = payload.strings("accept")?.unwrap_or_default();
    Ok(Field::new(FieldKind::File(FileField { accept })))
}

fn create_enum(model: &Model, _: &mut BuildCx<'_>) -> Field {
    let Model::Enum(options) = model else {
        return Field::error("enum constructor received a non-enum model");
    };
    Field::new(FieldKind::Enum(EnumField {
        options: options.clone(),
    }))
}

/// A persisted option list may reorder or restrict the model's options.
fn unserialize_enum(
    payload: &SerializedField,
    model: &Model,
    _: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let Model::Enum(known) = model else {
        return Err("enum payload on a non-enum model".into());
    };
    let options = match payload.strings("options")? {
        Some(options) => {
            if let Some(unknown) = options.iter().find(|o| !known.contains(o)) {
                return Err(format!("enum option `{unknown}` is not in the model"));
            }
            options
        }
        None => known.clone(),
    };
    Ok(Field::new(FieldKind::Enum(EnumField { options })))
}

fn create_reference(model: &Model, _: &mut BuildCx<'_>) -> Field {
    let Model::Ref(target) = model else {
        return Field::error("reference constructor received a non-ref model");
    };
    Field::new(FieldKind::Reference(ReferenceField {
        model: target.clone(),
        owned: false,
    }))
}

fn unserialize_reference(
    payload: &SerializedField,
    model: &Model,
    _: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let Model::Ref(target) = model else {
        return Err("reference payload on a non-ref model".into());
    };
    Ok(Field::new(FieldKind::Reference(ReferenceField {
        model: target.clone(),
        owned: payload.bool("owned").unwrap_or(false),
    })))
}

fn create_struct(model: &Model, cx: &mut BuildCx<'_>) -> Field {
    let Model::Struct(members) = model else {
        return Field::error("struct constructor received a non-struct model");
    };
    let fields = members
        .iter()
        .map(|(key, member)| (key.clone(), cx.child(key.as_str(), member)))
        .collect();
    Field::new(FieldKind::Struct(StructField { fields }))
}

/// Children follow the payload's order. Model keys missing from the payload
/// are inferred and appended; payload keys unknown to the model are dropped.
fn unserialize_struct(
    payload: &SerializedField,
    model: &Model,
    cx: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let Model::Struct(members) = model else {
        return Err("struct payload on a non-struct model".into());
    };
    let children = payload.keyed_children("fields")?;

    let mut fields = Vec::with_capacity(members.len());
    let mut seen = HashSet::new();
    for (segment, child) in &children {
        let KeySegment::Key(key) = segment else {
            return Err(format!("struct key `{segment}` is not a name"));
        };
        let Some((_, member)) = members.iter().find(|(k, _)| k == key) else {
            tracing::warn!(path = %cx.key_path(), key = %key, "dropping field missing from model");
            continue;
        };
        if !seen.insert(key.clone()) {
            return Err(format!("duplicate struct key `{key}`"));
        }
        fields.push((key.clone(), cx.unserialize_child(key.as_str(), child, member)));
    }
    for (key, member) in members {
        if !seen.contains(key) {
            fields.push((key.clone(), cx.child(key.as_str(), member)));
        }
    }

    Ok(Field::new(FieldKind::Struct(StructField { fields })))
}

fn create_tuple(model: &Model, cx: &mut BuildCx<'_>) -> Field {
    let Model::Tuple(members) = model else {
        return Field::error("tuple constructor received a non-tuple model");
    };
    let fields = members
        .iter()
        .enumerate()
        .map(|(index, member)| cx.child(index, member))
        .collect();
    Field::new(FieldKind::Tuple(TupleField { fields }))
}

/// Children always follow index order.
fn unserialize_tuple(
    payload: &SerializedField,
    model: &Model,
    cx: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let Model::Tuple(members) = model else {
        return Err("tuple payload on a non-tuple model".into());
    };
    let children = payload.keyed_children("fields")?;
    if let Some((segment, _)) = children
        .iter()
        .find(|(s, _)| !matches!(s, KeySegment::Index(i) if *i < members.len()))
    {
        return Err(format!("tuple index `{segment}` is out of range"));
    }

    let fields = members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let persisted = children
                .iter()
                .find(|(s, _)| *s == KeySegment::Index(index))
                .map(|(_, child)| child);
            match persisted {
                Some(child) => cx.unserialize_child(index, child, member),
                None => cx.child(index, member),
            }
        })
        .collect();

    Ok(Field::new(FieldKind::Tuple(TupleField { fields })))
}

fn create_union(model: &Model, cx: &mut BuildCx<'_>) -> Field {
    let Model::Union(members) = model else {
        return Field::error("union constructor received a non-union model");
    };
    let fields = members
        .iter()
        .map(|(key, member)| UnionVariant {
            key: key.clone(),
            label: cx.label_for(&KeySegment::Key(key.clone())),
            field: cx.child(key.as_str(), member),
        })
        .collect();
    Field::new(FieldKind::Union(UnionField { fields }))
}

/// Same ordering rules as structs.
fn unserialize_union(
    payload: &SerializedField,
    model: &Model,
    cx: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let Model::Union(members) = model else {
        return Err("union payload on a non-union model".into());
    };
    let children = payload.labeled_children("fields")?;

    let mut fields = Vec::with_capacity(members.len());
    let mut seen = HashSet::new();
    for (key, label, child) in &children {
        let Some((_, member)) = members.iter().find(|(k, _)| k == key) else {
            tracing::warn!(path = %cx.key_path(), key = %key, "dropping union member missing from model");
            continue;
        };
        if !seen.insert(key.clone()) {
            return Err(format!("duplicate union key `{key}`"));
        }
        fields.push(UnionVariant {
            key: key.clone(),
            label: label.clone(),
            field: cx.unserialize_child(key.as_str(), child, member),
        });
    }
    for (key, member) in members {
        if !seen.contains(key) {
            fields.push(UnionVariant {
                key: key.clone(),
                label: cx.label_for(&KeySegment::Key(key.clone())),
                field: cx.child(key.as_str(), member),
            });
        }
    }

    Ok(Field::new(FieldKind::Union(UnionField { fields })))
}

fn modifier_kind(model: &Model, inner: FieldId) -> Option<FieldKind> {
    let modifier = match model {
        Model::Optional(_) => Modifier::Optional,
        Model::List(_) => Modifier::List,
        Model::Map(_) => Modifier::Map,
        _ => return None,
    };
    Some(modifier.wrap(inner))
}

fn create_modifier(model: &Model, cx: &mut BuildCx<'_>) -> Field {
    let Some(inner_model) = model.modifier_inner() else {
        return Field::error("modifier constructor received a non-modifier model");
    };
    let inner = cx.inner(inner_model);
    match modifier_kind(model, inner) {
        Some(kind) => Field::new(kind),
        None => Field::error("modifier constructor received a non-modifier model"),
    }
}

fn unserialize_modifier(
    payload: &SerializedField,
    model: &Model,
    cx: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let inner_model = model
        .modifier_inner()
        .ok_or("modifier payload on a non-modifier model")?;
    let child = payload.child("field")?;
    let inner = cx.unserialize_inner(&child, inner_model);
    modifier_kind(model, inner)
        .map(Field::new)
        .ok_or_else(|| "modifier payload on a non-modifier model".to_string())
}

/// Every member is built before any recurse is bound; binding happens when
/// the tree is initialized.
fn create_recursive(model: &Model, cx: &mut BuildCx<'_>) -> Field {
    let Some((members, top)) = model.recursion_group() else {
        return Field::error("recursive constructor received a non-recursive model");
    };
    if !members.iter().any(|(label, _)| *label == top) {
        return Field::error(format!("recursion entry `{top}` is not a group member"));
    }

    let mut fields = IndexMap::with_capacity(members.len());
    for (label, member) in members {
        let id = cx.member(member, label == top);
        fields.insert(label.to_string(), id);
    }

    Field::new(FieldKind::Recursive(RecursiveField {
        top: top.to_string(),
        fields,
    }))
}

fn unserialize_recursive(
    payload: &SerializedField,
    model: &Model,
    cx: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let (members, top) = model
        .recursion_group()
        .ok_or("recursive payload on a non-recursive model")?;
    if let Some(persisted_top) = payload.str("top")
        && persisted_top != top
    {
        return Err(format!(
            "recursion entry `{persisted_top}` does not match model entry `{top}`"
        ));
    }
    if !members.iter().any(|(label, _)| *label == top) {
        return Err(format!("recursion entry `{top}` is not a group member"));
    }

    let children = payload.keyed_children("fields")?;
    let mut fields = IndexMap::with_capacity(members.len());
    for (label, member) in members {
        let persisted = children
            .iter()
            .find(|(s, _)| matches!(s, KeySegment::Key(k) if k == label))
            .map(|(_, child)| child);
        let id = match persisted {
            Some(child) => cx.unserialize_member(child, member, label == top),
            None => cx.member(member, label == top),
        };
        fields.insert(label.to_string(), id);
    }

    Ok(Field::new(FieldKind::Recursive(RecursiveField {
        top: top.to_string(),
        fields,
    })))
}

fn create_recurse(model: &Model, _: &mut BuildCx<'_>) -> Field {
    let Model::Recurse(label) = model else {
        return Field::error("recurse constructor received a non-recurse model");
    };
    Field::new(FieldKind::Recurse(RecurseField {
        label: label.clone(),
        target: None,
    }))
}

fn unserialize_recurse(
    payload: &SerializedField,
    model: &Model,
    _: &mut BuildCx<'_>,
) -> Result<Field, String> {
    let Model::Recurse(label) = model else {
        return Err("recurse payload on a non-recurse model".into());
    };
    if let Some(persisted) = payload.str("recursion")
        && persisted != label
    {
        return Err(format!(
            "recursion label `{persisted}` does not match model label `{label}`"
        ));
    }
    Ok(Field::new(FieldKind::Recurse(RecurseField {
        label: label.clone(),
        target: None,
    })))
}
