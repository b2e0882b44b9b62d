//! Raw values in, query expressions out.

use chrono::{DateTime, Utc};
use serde_json::Value as Json;

use super::FieldTree;
use crate::field::{Expression, FieldId, FieldKind, Value};
use crate::path::{ValuePath, ValueSegment};
use crate::{Error, Result};

impl FieldTree {
    /// Convert a persisted value into the shape the UI works with.
    ///
    /// Never fails: a missing or mistyped raw value yields the field's
    /// default, composites substitute per child.
    pub fn transform_raw_value(&self, id: FieldId, raw: &Json) -> Value {
        let id = self.resolve(id);
        let field = self.field(id);
        let fallback = || self.default_value(id).clone();

        match &field.kind {
            FieldKind::Text(_) | FieldKind::Password(_) | FieldKind::File(_) => raw
                .as_str()
                .map(|s| Value::Text(s.to_string()))
                .unwrap_or_else(fallback),
            FieldKind::Integer => raw.as_i64().map(Value::Int).unwrap_or_else(fallback),
            FieldKind::Float => raw.as_f64().map(Value::Float).unwrap_or_else(fallback),
            FieldKind::Checkbox => raw.as_bool().map(Value::Bool).unwrap_or_else(fallback),
            FieldKind::DateTime => Value::DateTime(raw.as_str().and_then(parse_date_time)),
            FieldKind::Null | FieldKind::Error(_) => Value::Null,
            FieldKind::Enum(e) => match raw.as_str() {
                Some(s) if e.options.iter().any(|o| o == s) => Value::Enum(Some(s.to_string())),
                _ => fallback(),
            },
            FieldKind::Reference(_) => match raw {
                Json::String(s) => Value::Ref(Some(s.clone())),
                Json::Number(n) => Value::Ref(Some(n.to_string())),
                _ => fallback(),
            },
            FieldKind::Struct(s) => {
                let Some(object) = raw.as_object() else {
                    return fallback();
                };
                Value::Struct(
                    s.fields
                        .iter()
                        .map(|(key, child)| (key.clone(), self.raw_child(*child, object.get(key))))
                        .collect(),
                )
            }
            FieldKind::Tuple(t) => {
                let Some(items) = raw.as_array() else {
                    return fallback();
                };
                Value::Tuple(
                    t.fields
                        .iter()
                        .enumerate()
                        .map(|(index, child)| self.raw_child(*child, items.get(index)))
                        .collect(),
                )
            }
            FieldKind::Union(u) => {
                let (key, inner) = match raw {
                    Json::Object(object) if object.len() == 1 => match object.iter().next() {
                        Some((key, inner)) => (key.as_str(), Some(inner)),
                        None => return fallback(),
                    },
                    Json::String(key) => (key.as_str(), None),
                    _ => return fallback(),
                };
                let Some(selected) = u.get(key) else {
                    return fallback();
                };
                let values = u
                    .fields
                    .iter()
                    .map(|v| {
                        let value = if v.key == selected.key {
                            self.raw_child(v.field, inner)
                        } else {
                            self.default_value(v.field).clone()
                        };
                        (v.key.clone(), value)
                    })
                    .collect();
                Value::Union {
                    selected: selected.key.clone(),
                    values,
                }
            }
            FieldKind::Optional(inner) => match raw {
                Json::Null => Value::Optional(None),
                raw => Value::some(self.transform_raw_value(*inner, raw)),
            },
            FieldKind::List(inner) => match raw.as_array() {
                Some(items) => Value::List(
                    items
                        .iter()
                        .map(|item| self.transform_raw_value(*inner, item))
                        .collect(),
                ),
                None => fallback(),
            },
            FieldKind::Map(inner) => match raw.as_object() {
                Some(object) => Value::Map(
                    object
                        .iter()
                        .map(|(key, item)| (key.clone(), self.transform_raw_value(*inner, item)))
                        .collect(),
                ),
                None => fallback(),
            },
            // Resolved above; only reachable for an alias left dangling.
            FieldKind::Recursive(_) | FieldKind::Recurse(_) => Value::Null,
        }
    }

    fn raw_child(&self, id: FieldId, raw: Option<&Json>) -> Value {
        match raw {
            Some(raw) => self.transform_raw_value(id, raw),
            None => self.default_value(id).clone(),
        }
    }

    /// Build the backend query expression for a value.
    pub fn to_expression(&self, id: FieldId, value: &Value) -> Result<Expression> {
        let mut path = ValuePath::root();
        self.expression_at(id, value, &mut path)
    }

    fn expression_at(&self, id: FieldId, value: &Value, path: &mut ValuePath) -> Result<Expression> {
        let id = self.resolve(id);
        let kind = &self.field(id).kind;
        let mismatch = |path: &ValuePath| Error::ValueShape {
            path: path.clone(),
            expected: kind.tag(),
        };

        let expression = match (kind, value) {
            (FieldKind::Text(_) | FieldKind::Password(_) | FieldKind::File(_), Value::Text(s)) => {
                Expression::String(s.clone())
            }
            (FieldKind::Integer, Value::Int(i)) => Expression::Int(*i),
            (FieldKind::Float, Value::Float(f)) => Expression::Float(*f),
            (FieldKind::Float, Value::Int(i)) => Expression::Float(*i as f64),
            (FieldKind::Checkbox, Value::Bool(b)) => Expression::Bool(*b),
            (FieldKind::DateTime, Value::DateTime(Some(at))) => Expression::DateTime(*at),
            (FieldKind::DateTime, Value::DateTime(None))
            | (FieldKind::Enum(_), Value::Enum(None))
            | (FieldKind::Reference(_), Value::Ref(None))
            | (FieldKind::Null, Value::Null) => Expression::Null,
            (FieldKind::Enum(_), Value::Enum(Some(option))) => Expression::Enum(option.clone()),
            (FieldKind::Reference(_), Value::Ref(Some(id))) => Expression::Ref(id.clone()),
            (FieldKind::Struct(s), Value::Struct(values)) => {
                let mut members = Vec::with_capacity(s.fields.len());
                for (key, child) in &s.fields {
                    path.push(ValueSegment::Struct { key: key.clone() });
                    let Some(child_value) = values.get(key) else {
                        return Err(self.missing(*child, path));
                    };
                    members.push((key.clone(), self.expression_at(*child, child_value, path)?));
                    path.pop();
                }
                Expression::Struct(members)
            }
            (FieldKind::Tuple(t), Value::Tuple(values)) if values.len() == t.fields.len() => {
                let mut members = Vec::with_capacity(values.len());
                for (index, (child, child_value)) in t.fields.iter().zip(values).enumerate() {
                    path.push(ValueSegment::Tuple { index });
                    members.push(self.expression_at(*child, child_value, path)?);
                    path.pop();
                }
                Expression::Tuple(members)
            }
            (FieldKind::Union(u), Value::Union { selected, values }) => {
                let Some(variant) = u.get(selected) else {
                    return Err(Error::UnknownUnionKey {
                        path: path.clone(),
                        key: selected.clone(),
                    });
                };
                path.push(ValueSegment::Union {
                    key: selected.clone(),
                });
                let Some(child_value) = values.get(selected) else {
                    return Err(self.missing(variant.field, path));
                };
                let inner = self.expression_at(variant.field, child_value, path)?;
                path.pop();
                Expression::Union {
                    key: selected.clone(),
                    value: Box::new(inner),
                }
            }
            (FieldKind::Optional(_), Value::Optional(None)) => Expression::Optional(None),
            (FieldKind::Optional(inner), Value::Optional(Some(child_value))) => {
                path.push(ValueSegment::Optional);
                let expression = self.expression_at(*inner, child_value, path)?;
                path.pop();
                Expression::Optional(Some(Box::new(expression)))
            }
            (FieldKind::List(inner), Value::List(items)) => {
                path.push(ValueSegment::List);
                let items = items
                    .iter()
                    .map(|item| self.expression_at(*inner, item, path))
                    .collect::<Result<Vec<_>>>()?;
                path.pop();
                Expression::List(items)
            }
            (FieldKind::Map(inner), Value::Map(entries)) => {
                path.push(ValueSegment::Map);
                let entries = entries
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), self.expression_at(*inner, item, path)?)))
                    .collect::<Result<Vec<_>>>()?;
                path.pop();
                Expression::Map(entries)
            }
            (FieldKind::Error(e), _) => {
                return Err(Error::ErrorField {
                    path: path.clone(),
                    message: e.message.clone(),
                });
            }
            _ => return Err(mismatch(path)),
        };
        Ok(expression)
    }

    fn missing(&self, id: FieldId, path: &ValuePath) -> Error {
        Error::ValueShape {
            path: path.clone(),
            expected: self.field(self.resolve(id)).kind.tag(),
        }
    }
}

fn parse_date_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

