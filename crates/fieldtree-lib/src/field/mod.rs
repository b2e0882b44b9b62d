//! The field variant set.

mod arena;
mod types;
mod value;

#[cfg(test)]
mod arena_tests;

pub use arena::FieldArena;
pub use types::{
    EnumField, ErrorField, Field, FieldId, FieldKind, FileField, Modifier, PasswordField,
    RecurseField, RecursiveField, ReferenceField, StructField, TextField, TupleField, UnionField,
    UnionVariant,
};
pub use value::{Expression, Value};
