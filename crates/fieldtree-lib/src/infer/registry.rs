//! Ordered registry of field constructors.
//!
//! Inference walks the entries in registration order and uses the first one
//! whose predicate accepts the model; unserialization looks entries up by tag.

use fieldtree_core::Model;

use super::BuildCx;
use super::builtins;
use crate::field::Field;
use crate::serialize::SerializedField;

/// Whether a constructor can handle a model shape. Receives the model with
/// annotations already stripped.
pub type MatchFn = fn(&Model) -> bool;

/// Build a field from a model, creating children through the context.
pub type CreateFn = fn(&Model, &mut BuildCx<'_>) -> Field;

/// Rebuild a field from its serialized form against a model the predicate
/// accepted. An `Err` becomes an error field carrying the message.
pub type UnserializeFn = fn(&SerializedField, &Model, &mut BuildCx<'_>) -> Result<Field, String>;

#[derive(Clone, Copy)]
pub struct FieldConstructor {
    pub tag: &'static str,
    pub matches: MatchFn,
    pub create: CreateFn,
    pub unserialize: UnserializeFn,
}

impl std::fmt::Debug for FieldConstructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldConstructor")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct Registry {
    entries: Vec<FieldConstructor>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// An empty registry. Every model infers to an error field.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The builtin constructors, in inference priority order.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for entry in builtins::CONSTRUCTORS {
            registry.insert(*entry);
        }
        registry
    }

    /// Register a constructor.
    ///
    /// A tag that is already registered is replaced in place and keeps its
    /// inference priority; a new tag goes last.
    pub fn register(
        &mut self,
        tag: &'static str,
        matches: MatchFn,
        create: CreateFn,
        unserialize: UnserializeFn,
    ) -> &mut Self {
        self.insert(FieldConstructor {
            tag,
            matches,
            create,
            unserialize,
        });
        self
    }

    pub fn insert(&mut self, entry: FieldConstructor) -> &mut Self {
        match self.entries.iter_mut().find(|e| e.tag == entry.tag) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// Combine two registries; `later` wins on tag collisions.
    pub fn merge(earlier: &Registry, later: &Registry) -> Registry {
        let mut merged = earlier.clone();
        for entry in &later.entries {
            merged.insert(*entry);
        }
        merged
    }

    /// First constructor whose predicate accepts `model`.
    pub fn find(&self, model: &Model) -> Option<&FieldConstructor> {
        self.entries.iter().find(|e| (e.matches)(model))
    }

    pub fn get(&self, tag: &str) -> Option<&FieldConstructor> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
