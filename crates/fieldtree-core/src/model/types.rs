//! Model type definitions.

use serde::{Deserialize, Serialize};

/// Abstract description of a backend data schema.
///
/// A model may be logically infinite: `Recurse` stands for the binding of an
/// enclosing `Recursive`/`Recursion` label and is never expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Model {
    String,
    Int,
    Float,
    Bool,
    DateTime,
    Null,
    /// Named fields, preserving declaration order.
    Struct(Vec<(String, Model)>),
    /// Positional fields.
    Tuple(Vec<Model>),
    /// Exactly one of the named alternatives.
    Union(Vec<(String, Model)>),
    Optional(Box<Model>),
    List(Box<Model>),
    /// String-keyed map of the inner model.
    Map(Box<Model>),
    /// Closed set of variant names.
    Enum(Vec<String>),
    /// Reference by id to a record of another model.
    Ref(String),
    /// Uniqueness marker, transparent to field inference.
    Unique(Box<Model>),
    /// Key/value annotation wrapping a model.
    Annotation {
        key: String,
        value: String,
        model: Box<Model>,
    },
    /// Group of mutually recursive models with a designated entry label.
    Recursive {
        models: Vec<(String, Model)>,
        top: String,
    },
    /// Single self-recursive model.
    Recursion { label: String, model: Box<Model> },
    /// Back-reference to an enclosing recursion label.
    Recurse(String),
}

/// Discriminant of a [`Model`], with a stable wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTag {
    String,
    Int,
    Float,
    Bool,
    DateTime,
    Null,
    Struct,
    Tuple,
    Union,
    Optional,
    List,
    Map,
    Enum,
    Ref,
    Unique,
    Annotation,
    Recursive,
    Recursion,
    Recurse,
}

impl ModelTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::DateTime => "dateTime",
            Self::Null => "null",
            Self::Struct => "struct",
            Self::Tuple => "tuple",
            Self::Union => "union",
            Self::Optional => "optional",
            Self::List => "list",
            Self::Map => "map",
            Self::Enum => "enum",
            Self::Ref => "ref",
            Self::Unique => "unique",
            Self::Annotation => "annotation",
            Self::Recursive => "recursive",
            Self::Recursion => "recursion",
            Self::Recurse => "recurse",
        }
    }

    /// Wrappers that alter cardinality or presence of a single inner model.
    pub fn is_modifier(self) -> bool {
        matches!(self, Self::Optional | Self::List | Self::Map)
    }
}

impl std::fmt::Display for ModelTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Model {
    pub fn tag(&self) -> ModelTag {
        match self {
            Self::String => ModelTag::String,
            Self::Int => ModelTag::Int,
            Self::Float => ModelTag::Float,
            Self::Bool => ModelTag::Bool,
            Self::DateTime => ModelTag::DateTime,
            Self::Null => ModelTag::Null,
            Self::Struct(_) => ModelTag::Struct,
            Self::Tuple(_) => ModelTag::Tuple,
            Self::Union(_) => ModelTag::Union,
            Self::Optional(_) => ModelTag::Optional,
            Self::List(_) => ModelTag::List,
            Self::Map(_) => ModelTag::Map,
            Self::Enum(_) => ModelTag::Enum,
            Self::Ref(_) => ModelTag::Ref,
            Self::Unique(_) => ModelTag::Unique,
            Self::Annotation { .. } => ModelTag::Annotation,
            Self::Recursive { .. } => ModelTag::Recursive,
            Self::Recursion { .. } => ModelTag::Recursion,
            Self::Recurse(_) => ModelTag::Recurse,
        }
    }

    /// Strip any stack of `Unique`/`Annotation` wrappers.
    pub fn unwrap_annotations(&self) -> &Model {
        let mut model = self;
        loop {
            match model {
                Self::Unique(inner) => model = inner,
                Self::Annotation { model: inner, .. } => model = inner,
                _ => return model,
            }
        }
    }

    /// Annotations stripped by [`Model::unwrap_annotations`], outermost first.
    pub fn annotations(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        let mut model = self;
        loop {
            match model {
                Self::Unique(inner) => model = inner,
                Self::Annotation {
                    key,
                    value,
                    model: inner,
                } => {
                    out.push((key.as_str(), value.as_str()));
                    model = inner;
                }
                _ => return out,
            }
        }
    }

    /// Inner model of an `Optional`/`List`/`Map` wrapper.
    pub fn modifier_inner(&self) -> Option<&Model> {
        match self {
            Self::Optional(inner) | Self::List(inner) | Self::Map(inner) => Some(inner),
            _ => None,
        }
    }

    /// Members of a recursion group and its entry label.
    ///
    /// A `Recursion` is a group of one whose entry is its own label.
    pub fn recursion_group(&self) -> Option<(Vec<(&str, &Model)>, &str)> {
        match self {
            Self::Recursive { models, top } => Some((
                models.iter().map(|(k, m)| (k.as_str(), m)).collect(),
                top.as_str(),
            )),
            Self::Recursion { label, model } => {
                Some((vec![(label.as_str(), model.as_ref())], label.as_str()))
            }
            _ => None,
        }
    }
}
