//! Persisted field configuration.
//!
//! Wire shape: `{type, label?, description?, ...payload}`. Struct and tuple
//! children are `fields: [[key, child], ...]`, union children are
//! `fields: [[key, label, child], ...]`, modifiers carry `field: child`,
//! recursion groups carry `top` and `fields: [[label, child], ...]`, and a
//! recurse carries only its label under `recursion` (`label` is the display
//! label of every field).


use fieldtree_core::Model;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::field::{FieldId, FieldKind};
use crate::infer::{BuildCx, InferOptions, Registry};
use crate::invariants::ensure_serializable;
use crate::path::KeySegment;
use crate::tree::{FieldTree, RawTree};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedField {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Json>,
}

impl SerializedField {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            label: None,
            description: None,
            payload: Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a payload entry.
    pub fn with(mut self, key: &str, value: impl Into<Json>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The JSON object form.
    pub fn to_json(&self) -> Json {
        let mut object = Map::new();
        object.insert("type".into(), Json::String(self.type_tag.clone()));
        if let Some(label) = &self.label {
            object.insert("label".into(), Json::String(label.clone()));
        }
        if let Some(description) = &self.description {
            object.insert("description".into(), Json::String(description.clone()));
        }
        for (key, value) in &self.payload {
            object.insert(key.clone(), value.clone());
        }
        Json::Object(object)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.payload.get(key).and_then(Json::as_bool)
    }

    pub fn u64(&self, key: &str) -> Option<u64> {
        self.payload.get(key).and_then(Json::as_u64)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Json::as_str)
    }

    /// A string array entry. Absent is `Ok(None)`.
    pub fn strings(&self, key: &str) -> Result<Option<Vec<String>>, String> {
        let Some(value) = self.payload.get(key) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .ok_or_else(|| format!("`{key}` is not an array"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("`{key}` holds a non-string entry"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// A single nested field. Required.
    pub fn child(&self, key: &str) -> Result<SerializedField, String> {
        let value = self
            .payload
            .get(key)
            .ok_or_else(|| format!("missing `{key}`"))?;
        parse_child(value)
    }

    /// `[[key, child], ...]`. Absent is empty.
    pub fn keyed_children(&self, key: &str) -> Result<Vec<(KeySegment, SerializedField)>, String> {
        let Some(entries) = self.entries(key)? else {
            return Ok(Vec::new());
        };
        entries
            .iter()
            .map(|entry| match entry.as_array().map(Vec::as_slice) {
                Some([segment, child]) => {
                    let segment = KeySegment::deserialize(segment)
                        .map_err(|e| format!("invalid key in `{key}`: {e}"))?;
                    Ok((segment, parse_child(child)?))
                }
                _ => Err(format!("`{key}` entries must be [key, field] pairs")),
            })
            .collect()
    }

    /// `[[key, label, child], ...]`. Absent is empty.
    pub fn labeled_children(
        &self,
        key: &str,
    ) -> Result<Vec<(String, String, SerializedField)>, String> {
        let Some(entries) = self.entries(key)? else {
            return Ok(Vec::new());
        };
        entries
            .iter()
            .map(|entry| match entry.as_array().map(Vec::as_slice) {
                Some([Json::String(k), Json::String(label), child]) => {
                    Ok((k.clone(), label.clone(), parse_child(child)?))
                }
                _ => Err(format!("`{key}` entries must be [key, label, field] triples")),
            })
            .collect()
    }

    fn entries(&self, key: &str) -> Result<Option<&Vec<Json>>, String> {
        match self.payload.get(key) {
            None => Ok(None),
            Some(Json::Array(entries)) => Ok(Some(entries)),
            Some(_) => Err(format!("`{key}` is not an array")),
        }
    }
}

fn parse_child(value: &Json) -> Result<SerializedField, String> {
    SerializedField::deserialize(value).map_err(|e| format!("invalid nested field: {e}"))
}

/// Serialize a finalized tree from its root.
///
/// # Panics
///
/// If the tree contains an error field. Check [`FieldTree::errors`] first.
pub fn serialize(tree: &FieldTree) -> SerializedField {
    serialize_field(tree, tree.root())
}

/// Serialize the subtree rooted at `id`.
///
/// # Panics
///
/// If the subtree contains an error field.
pub fn serialize_field(tree: &FieldTree, id: FieldId) -> SerializedField {
    let field = tree.field(id);
    ensure_serializable(field);

    let mut out = SerializedField::new(field.kind.tag());
    out.label = field.label.clone();
    out.description = field.description.clone();

    match &field.kind {
        FieldKind::Text(text) => {
            if text.multiline {
                out = out.with("multiline", true);
            }
        }
        FieldKind::Password(password) => {
            if password.min_length > 0 {
                out = out.with("minLength", password.min_length as u64);
            }
        }
        FieldKind::File(file) => {
            if !file.accept.is_empty() {
                out = out.with("accept", file.accept.clone());
            }
        }
        FieldKind::Integer
        | FieldKind::Float
        | FieldKind::Checkbox
        | FieldKind::DateTime
        | FieldKind::Null
        | FieldKind::Error(_) => {}
        FieldKind::Enum(e) => out = out.with("options", e.options.clone()),
        FieldKind::Reference(r) => out = out.with("owned", r.owned),
        FieldKind::Struct(s) => {
            let fields = s
                .fields
                .iter()
                .map(|(key, child)| pair(Json::from(key.as_str()), tree, *child))
                .collect::<Vec<_>>();
            out = out.with("fields", fields);
        }
        FieldKind::Tuple(t) => {
            let fields = t
                .fields
                .iter()
                .enumerate()
                .map(|(index, child)| pair(Json::from(index), tree, *child))
                .collect::<Vec<_>>();
            out = out.with("fields", fields);
        }
        FieldKind::Union(u) => {
            let fields = u
                .fields
                .iter()
                .map(|variant| {
                    Json::Array(vec![
                        Json::from(variant.key.as_str()),
                        Json::from(variant.label.as_str()),
                        serialize_field(tree, variant.field).to_json(),
                    ])
                })
                .collect::<Vec<_>>();
            out = out.with("fields", fields);
        }
        FieldKind::Optional(inner) | FieldKind::List(inner) | FieldKind::Map(inner) => {
            out = out.with("field", serialize_field(tree, *inner).to_json());
        }
        FieldKind::Recursive(group) => {
            let fields = group
                .fields
                .iter()
                .map(|(label, child)| pair(Json::from(label.as_str()), tree, *child))
                .collect::<Vec<_>>();
            out = out.with("top", group.top.as_str()).with("fields", fields);
        }
        FieldKind::Recurse(r) => out = out.with("recursion", r.label.as_str()),
    }

    out
}

fn pair(key: Json, tree: &FieldTree, child: FieldId) -> Json {
    Json::Array(vec![key, serialize_field(tree, child).to_json()])
}

/// Rebuild a field tree from its serialized form, validating it against
/// `model` at every composite.
pub fn unserialize(payload: &SerializedField, model: &Model, registry: &Registry) -> RawTree {
    unserialize_with_options(payload, model, registry, &InferOptions::default())
}

/// As [`unserialize`]; `options` applies to children the payload omits and
/// which are therefore inferred.
pub fn unserialize_with_options(
    payload: &SerializedField,
    model: &Model,
    registry: &Registry,
    options: &InferOptions,
) -> RawTree {
    let mut cx = BuildCx::new(registry, options, None);
    let root = cx.build_serialized(payload, model, None);
    let arena = cx.into_arena();
    tracing::debug!(fields = arena.len(), tag = %payload.type_tag, "unserialized field tree");
    RawTree::new(arena, root, Vec::new())
}
