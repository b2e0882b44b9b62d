//! Field variant definitions.
//!
//! A field tree is stored in an arena and addressed by [`FieldId`]. Composite
//! kinds own their children's ids; a resolved `Recurse` holds a shared id of
//! a recursion-group member, which is the only non-tree edge.

use indexmap::IndexMap;

use crate::path::ValueSegment;

/// Arena index of a field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FieldId(u32);

impl FieldId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the field tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub label: Option<String>,
    pub description: Option<String>,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            label: None,
            description: None,
            kind,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FieldKind::Error(ErrorField {
            message: message.into(),
        }))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, FieldKind::Error(_))
    }
}

/// The closed set of field variants.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text(TextField),
    /// Secret text, hashed by the save hook.
    Password(PasswordField),
    /// Uploaded resource id, committed by the save hook.
    File(FileField),
    Integer,
    Float,
    Checkbox,
    DateTime,
    Null,
    Enum(EnumField),
    Reference(ReferenceField),
    Struct(StructField),
    Tuple(TupleField),
    Union(UnionField),
    Optional(FieldId),
    List(FieldId),
    Map(FieldId),
    Recursive(RecursiveField),
    Recurse(RecurseField),
    Error(ErrorField),
}

impl FieldKind {
    /// Stable serialization tag. Error fields have none.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Password(_) => "password",
            Self::File(_) => "file",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Checkbox => "checkbox",
            Self::DateTime => "dateTime",
            Self::Null => "null",
            Self::Enum(_) => "enum",
            Self::Reference(_) => "reference",
            Self::Struct(_) => "struct",
            Self::Tuple(_) => "tuple",
            Self::Union(_) => "union",
            Self::Optional(_) => "optional",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Recursive(_) => "recursive",
            Self::Recurse(_) => "recurse",
            Self::Error(_) => "error",
        }
    }

    /// The modifier and its wrapped child, for `optional`/`list`/`map`.
    pub fn modifier(&self) -> Option<(Modifier, FieldId)> {
        match self {
            Self::Optional(inner) => Some((Modifier::Optional, *inner)),
            Self::List(inner) => Some((Modifier::List, *inner)),
            Self::Map(inner) => Some((Modifier::Map, *inner)),
            _ => None,
        }
    }

    pub fn is_modifier(&self) -> bool {
        self.modifier().is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextField {
    pub multiline: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordField {
    pub min_length: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileField {
    /// Accepted media types; empty accepts anything.
    pub accept: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumField {
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceField {
    /// Name of the referenced model.
    pub model: String,
    /// Whether the referenced record is deleted together with the owner.
    pub owned: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructField {
    /// Children in declaration order.
    pub fields: Vec<(String, FieldId)>,
}

impl StructField {
    pub fn get(&self, key: &str) -> Option<FieldId> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, id)| *id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TupleField {
    pub fields: Vec<FieldId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnionField {
    pub fields: Vec<UnionVariant>,
}

impl UnionField {
    pub fn get(&self, key: &str) -> Option<&UnionVariant> {
        self.fields.iter().find(|v| v.key == key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionVariant {
    pub key: String,
    pub label: String,
    pub field: FieldId,
}

/// A group of mutually recursive fields. Behaves as its `top` member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecursiveField {
    pub top: String,
    pub fields: IndexMap<String, FieldId>,
}

impl RecursiveField {
    pub fn top_field(&self) -> Option<FieldId> {
        self.fields.get(&self.top).copied()
    }
}

/// Back-reference to a recursion label. `target` is set by initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecurseField {
    pub label: String,
    pub target: Option<FieldId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorField {
    pub message: String,
}

/// Transparent wrapper altering cardinality or presence of a base field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Optional,
    List,
    Map,
}

impl Modifier {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Optional => "optional",
            Self::List => "list",
            Self::Map => "map",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "optional" => Some(Self::Optional),
            "list" => Some(Self::List),
            "map" => Some(Self::Map),
            _ => None,
        }
    }

    pub fn segment(self) -> ValueSegment {
        match self {
            Self::Optional => ValueSegment::Optional,
            Self::List => ValueSegment::List,
            Self::Map => ValueSegment::Map,
        }
    }

    pub(crate) fn wrap(self, inner: FieldId) -> FieldKind {
        match self {
            Self::Optional => FieldKind::Optional(inner),
            Self::List => FieldKind::List(inner),
            Self::Map => FieldKind::Map(inner),
        }
    }
}
