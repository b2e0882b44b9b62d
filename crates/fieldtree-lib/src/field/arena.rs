//! Build-time storage for fields.

use super::types::{Field, FieldId, FieldKind};

/// Append-only field storage. Ids are stable for the arena's lifetime.
#[derive(Clone, Debug, Default)]
pub struct FieldArena {
    fields: Vec<Field>,
}

impl FieldArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, field: Field) -> FieldId {
        let id = FieldId::from_index(self.fields.len());
        self.fields.push(field);
        id
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| (FieldId::from_index(i), f))
    }

    pub(crate) fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl FieldKind {
    /// Ids owned by this field (not following recursion aliases).
    pub fn children(&self) -> Vec<FieldId> {
        match self {
            Self::Struct(s) => s.fields.iter().map(|(_, id)| *id).collect(),
            Self::Tuple(t) => t.fields.clone(),
            Self::Union(u) => u.fields.iter().map(|v| v.field).collect(),
            Self::Optional(inner) | Self::List(inner) | Self::Map(inner) => vec![*inner],
            Self::Recursive(r) => r.fields.values().copied().collect(),
            Self::Text(_)
            | Self::Password(_)
            | Self::File(_)
            | Self::Integer
            | Self::Float
            | Self::Checkbox
            | Self::DateTime
            | Self::Null
            | Self::Enum(_)
            | Self::Reference(_)
            | Self::Recurse(_)
            | Self::Error(_) => Vec::new(),
        }
    }
}
