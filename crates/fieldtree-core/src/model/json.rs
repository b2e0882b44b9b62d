//! JSON deserialization for model descriptions.
//!
//! The wire shape is an externally-tagged object `{<tag>: <payload>}`.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::Model;

/// Error during model parsing.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary decode error: {0}")]
    Binary(#[from] postcard::Error),
}

impl Model {
    /// Parse a model from its JSON wire shape.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let raw: RawModel = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Convert an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ModelError> {
        let raw: RawModel = serde_json::from_value(value)?;
        Ok(raw.into())
    }
}

/// Leaf payload. Accepts `{}` or `null`.
#[derive(Debug, Deserialize)]
struct Empty {}

/// Raw model matching the JSON wire shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawModel {
    String(Option<Empty>),
    Int(Option<Empty>),
    Float(Option<Empty>),
    Bool(Option<Empty>),
    DateTime(Option<Empty>),
    Null(Option<Empty>),
    Struct(IndexMap<String, RawModel>),
    Tuple(Vec<RawModel>),
    Union(IndexMap<String, RawModel>),
    Optional(Box<RawModel>),
    List(Box<RawModel>),
    Map(Box<RawModel>),
    Enum(Vec<String>),
    Ref(String),
    Unique(Box<RawModel>),
    Annotation {
        key: String,
        value: String,
        model: Box<RawModel>,
    },
    Recursive {
        models: IndexMap<String, RawModel>,
        top: String,
    },
    Recursion {
        label: String,
        model: Box<RawModel>,
    },
    Recurse {
        label: String,
    },
}

impl From<RawModel> for Model {
    fn from(raw: RawModel) -> Self {
        #[allow(clippy::boxed_local)] // Payloads are Box<RawModel>, output needs Box<Model>
        fn conv(inner: Box<RawModel>) -> Box<Model> {
            Box::new(Model::from(*inner))
        }

        // IndexMap keeps the declaration order of the JSON object.
        fn named(map: IndexMap<String, RawModel>) -> Vec<(String, Model)> {
            map.into_iter().map(|(k, v)| (k, v.into())).collect()
        }

        match raw {
            RawModel::String(_) => Model::String,
            RawModel::Int(_) => Model::Int,
            RawModel::Float(_) => Model::Float,
            RawModel::Bool(_) => Model::Bool,
            RawModel::DateTime(_) => Model::DateTime,
            RawModel::Null(_) => Model::Null,
            RawModel::Struct(fields) => Model::Struct(named(fields)),
            RawModel::Tuple(items) => Model::Tuple(items.into_iter().map(Into::into).collect()),
            RawModel::Union(variants) => Model::Union(named(variants)),
            RawModel::Optional(inner) => Model::Optional(conv(inner)),
            RawModel::List(inner) => Model::List(conv(inner)),
            RawModel::Map(inner) => Model::Map(conv(inner)),
            RawModel::Enum(options) => Model::Enum(options),
            RawModel::Ref(target) => Model::Ref(target),
            RawModel::Unique(inner) => Model::Unique(conv(inner)),
            RawModel::Annotation { key, value, model } => Model::Annotation {
                key,
                value,
                model: conv(model),
            },
            RawModel::Recursive { models, top } => Model::Recursive {
                models: named(models),
                top,
            },
            RawModel::Recursion { label, model } => Model::Recursion {
                label,
                model: conv(model),
            },
            RawModel::Recurse { label } => Model::Recurse(label),
        }
    }
}
