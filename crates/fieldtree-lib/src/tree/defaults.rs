//! Default values. Recursion-free ones are computed once per field.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::field::{Field, FieldId, FieldKind, Value};

pub(super) fn compute(fields: &[Field]) -> Vec<Value> {
    let mut cx = DefaultsCx {
        fields,
        memo: vec![None; fields.len()],
        in_progress: HashSet::new(),
        reentered: false,
    };
    (0..fields.len())
        .map(|i| cx.default_of(FieldId::from_index(i)))
        .collect()
}

struct DefaultsCx<'a> {
    fields: &'a [Field],
    memo: Vec<Option<Value>>,
    in_progress: HashSet<FieldId>,
    /// Set when the current computation cut a recursion short.
    reentered: bool,
}

impl DefaultsCx<'_> {
    fn default_of(&mut self, id: FieldId) -> Value {
        if let Some(value) = &self.memo[id.index()] {
            return value.clone();
        }
        // Re-entry through a recursion: the value would be infinite.
        if !self.in_progress.insert(id) {
            self.reentered = true;
            return Value::Null;
        }

        let outer = std::mem::take(&mut self.reentered);
        let value = self.compute(id);
        self.in_progress.remove(&id);

        // A value cut short by a recursion depends on where the walk
        // started, so only recursion-free values are reused.
        let reentered = self.reentered;
        if !reentered {
            self.memo[id.index()] = Some(value.clone());
        }
        self.reentered = outer || reentered;
        value
    }

    fn compute(&mut self, id: FieldId) -> Value {
        let fields = self.fields;
        match &fields[id.index()].kind {
            FieldKind::Text(_) | FieldKind::Password(_) | FieldKind::File(_) => {
                Value::Text(String::new())
            }
            FieldKind::Integer => Value::Int(0),
            FieldKind::Float => Value::Float(0.0),
            FieldKind::Checkbox => Value::Bool(false),
            FieldKind::DateTime => Value::DateTime(None),
            FieldKind::Null | FieldKind::Error(_) => Value::Null,
            FieldKind::Enum(e) => Value::Enum(e.options.first().cloned()),
            FieldKind::Reference(_) => Value::Ref(None),
            FieldKind::Struct(s) => Value::Struct(
                s.fields
                    .iter()
                    .map(|(key, child)| (key.clone(), self.default_of(*child)))
                    .collect(),
            ),
            FieldKind::Tuple(t) => {
                Value::Tuple(t.fields.iter().map(|c| self.default_of(*c)).collect())
            }
            FieldKind::Union(u) => {
                let values: IndexMap<String, Value> = u
                    .fields
                    .iter()
                    .map(|v| (v.key.clone(), self.default_of(v.field)))
                    .collect();
                let selected = u.fields.first().map(|v| v.key.clone()).unwrap_or_default();
                Value::Union { selected, values }
            }
            FieldKind::Optional(_) => Value::Optional(None),
            FieldKind::List(_) => Value::List(Vec::new()),
            FieldKind::Map(_) => Value::Map(IndexMap::new()),
            FieldKind::Recursive(group) => match group.top_field() {
                Some(top) => self.default_of(top),
                None => Value::Null,
            },
            FieldKind::Recurse(recurse) => match recurse.target {
                Some(target) => self.default_of(target),
                None => Value::Null,
            },
        }
    }
}
