//! Value validation.

use super::FieldTree;
use crate::field::{FieldId, FieldKind, Value};

/// Validation error codes.
pub mod codes {
    pub const INVALID_TYPE: &str = "invalidType";
    pub const REQUIRED: &str = "required";
    pub const UNKNOWN_OPTION: &str = "unknownOption";
    pub const UNKNOWN_UNION_KEY: &str = "unknownUnionKey";
    pub const TOO_SHORT: &str = "tooShort";
    pub const NOT_FINITE: &str = "notFinite";
}

impl FieldTree {
    /// Error codes for `value`; empty when valid.
    ///
    /// Composites report every child's codes, in child order. A child missing
    /// from a struct or tuple value is checked through its default.
    pub fn is_valid_value(&self, id: FieldId, value: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        self.collect_errors(id, value, &mut errors);
        errors
    }

    fn collect_errors(&self, id: FieldId, value: &Value, errors: &mut Vec<String>) {
        let id = self.resolve(id);

        match (&self.field(id).kind, value) {
            (FieldKind::Error(e), _) => errors.push(e.message.clone()),
            (FieldKind::Text(_) | FieldKind::File(_), Value::Text(_))
            | (FieldKind::Integer, Value::Int(_))
            | (FieldKind::Float, Value::Int(_))
            | (FieldKind::Checkbox, Value::Bool(_))
            | (FieldKind::DateTime, Value::DateTime(Some(_)))
            | (FieldKind::Null, Value::Null)
            | (FieldKind::Reference(_), Value::Ref(Some(_)))
            | (FieldKind::Optional(_), Value::Optional(None)) => {}
            (FieldKind::Password(p), Value::Text(secret)) => {
                // Empty keeps the stored secret.
                if !secret.is_empty() && secret.chars().count() < p.min_length {
                    errors.push(codes::TOO_SHORT.into());
                }
            }
            (FieldKind::Float, Value::Float(f)) => {
                if !f.is_finite() {
                    errors.push(codes::NOT_FINITE.into());
                }
            }
            (FieldKind::DateTime, Value::DateTime(None))
            | (FieldKind::Reference(_), Value::Ref(None))
            | (FieldKind::Enum(_), Value::Enum(None)) => errors.push(codes::REQUIRED.into()),
            (FieldKind::Enum(e), Value::Enum(Some(option))) => {
                if !e.options.contains(option) {
                    errors.push(codes::UNKNOWN_OPTION.into());
                }
            }
            (FieldKind::Struct(s), Value::Struct(values)) => {
                for (key, child) in &s.fields {
                    match values.get(key) {
                        Some(child_value) => self.collect_errors(*child, child_value, errors),
                        None => self.collect_errors(*child, self.default_value(*child), errors),
                    }
                }
            }
            (FieldKind::Tuple(t), Value::Tuple(values)) => {
                if values.len() != t.fields.len() {
                    errors.push(codes::INVALID_TYPE.into());
                }
                for (index, child) in t.fields.iter().enumerate() {
                    match values.get(index) {
                        Some(child_value) => self.collect_errors(*child, child_value, errors),
                        None => self.collect_errors(*child, self.default_value(*child), errors),
                    }
                }
            }
            (FieldKind::Union(u), Value::Union { selected, values }) => match u.get(selected) {
                Some(variant) => match values.get(selected) {
                    Some(child_value) => self.collect_errors(variant.field, child_value, errors),
                    None => {
                        let default = self.default_value(variant.field);
                        self.collect_errors(variant.field, default, errors)
                    }
                },
                None => errors.push(codes::UNKNOWN_UNION_KEY.into()),
            },
            (FieldKind::Optional(inner), Value::Optional(Some(child_value))) => {
                self.collect_errors(*inner, child_value, errors)
            }
            (FieldKind::List(inner), Value::List(items)) => {
                for item in items {
                    self.collect_errors(*inner, item, errors);
                }
            }
            (FieldKind::Map(inner), Value::Map(entries)) => {
                for item in entries.values() {
                    self.collect_errors(*inner, item, errors);
                }
            }
            _ => errors.push(codes::INVALID_TYPE.into()),
        }
    }
}
