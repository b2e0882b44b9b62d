//! Runtime values and backend query expressions.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The value shape the UI works with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// `None` while unset.
    DateTime(Option<DateTime<Utc>>),
    Enum(Option<String>),
    /// Referenced record id.
    Ref(Option<String>),
    Struct(IndexMap<String, Value>),
    Tuple(Vec<Value>),
    /// Only the selected key is guaranteed to hold a meaningful value.
    Union {
        selected: String,
        values: IndexMap<String, Value>,
    },
    Optional(Option<Box<Value>>),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn some(value: Value) -> Self {
        Self::Optional(Some(Box::new(value)))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// The selected union member's value.
    pub fn selected(&self) -> Option<(&str, Option<&Value>)> {
        match self {
            Self::Union { selected, values } => Some((selected, values.get(selected))),
            _ => None,
        }
    }
}

/// Backend query expression built from a value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Expression {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    Enum(String),
    Ref(String),
    Struct(Vec<(String, Expression)>),
    Tuple(Vec<Expression>),
    Union { key: String, value: Box<Expression> },
    Optional(Option<Box<Expression>>),
    List(Vec<Expression>),
    Map(Vec<(String, Expression)>),
}
