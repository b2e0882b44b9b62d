//! Field tree lifecycle.
//!
//! Inference and unserialization produce a [`RawTree`], whose `recurse`
//! fields are not bound yet. [`RawTree::initialize`] binds them, computes
//! default values and derived configuration, and returns the immutable
//! [`FieldTree`] that every capability lives on.

mod defaults;
mod hooks;
mod recursion;
mod resolve;
mod transform;
mod validate;

#[cfg(test)]
mod recursion_tests;
#[cfg(test)]
mod transform_tests;

pub use hooks::{HookContext, HookError};
pub use validate::codes;

use crate::config::{self, FilterConfiguration, SortConfiguration};
use crate::field::{Field, FieldArena, FieldId, Value};
use crate::path::KeyPath;

/// A freshly built tree. Recurse fields are still unbound.
#[derive(Debug)]
pub struct RawTree {
    arena: FieldArena,
    root: FieldId,
    stale_overrides: Vec<KeyPath>,
}

impl RawTree {
    pub(crate) fn new(arena: FieldArena, root: FieldId, stale_overrides: Vec<KeyPath>) -> Self {
        Self {
            arena,
            root,
            stale_overrides,
        }
    }

    pub fn root(&self) -> FieldId {
        self.root
    }

    pub fn arena(&self) -> &FieldArena {
        &self.arena
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Override key paths that matched no field during inference.
    pub fn stale_overrides(&self) -> &[KeyPath] {
        &self.stale_overrides
    }

    /// Bind recursion aliases and compute caches.
    pub fn initialize(self) -> FieldTree {
        let Self {
            mut arena,
            root,
            stale_overrides,
        } = self;

        recursion::bind(&mut arena, root);
        let fields = arena.into_fields();
        let defaults = defaults::compute(&fields);

        let mut tree = FieldTree {
            fields,
            root,
            defaults,
            sorts: Vec::new(),
            filters: Vec::new(),
            stale_overrides,
        };
        let derived = config::derive(&tree);
        tree.sorts = derived.sorts;
        tree.filters = derived.filters;

        tracing::debug!(
            fields = tree.len(),
            sorts = tree.sorts.len(),
            filters = tree.filters.len(),
            "initialized field tree"
        );
        tree
    }
}

/// An initialized, immutable field tree.
#[derive(Clone, Debug)]
pub struct FieldTree {
    fields: Vec<Field>,
    root: FieldId,
    defaults: Vec<Value>,
    sorts: Vec<SortConfiguration>,
    filters: Vec<FilterConfiguration>,
    stale_overrides: Vec<KeyPath>,
}

impl FieldTree {
    pub fn root(&self) -> FieldId {
        self.root
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.index())
    }

    /// # Panics
    ///
    /// If `id` was not issued for this tree.
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
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

    pub fn default_value(&self, id: FieldId) -> &Value {
        &self.defaults[id.index()]
    }

    /// Error fields that replaced unbuildable positions.
    pub fn errors(&self) -> Vec<(FieldId, &str)> {
        self.iter()
            .filter_map(|(id, field)| match &field.kind {
                crate::field::FieldKind::Error(e) => Some((id, e.message.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(Field::is_error)
    }

    /// Sort descriptors: the record timestamps, then the tree's own.
    pub fn sort_configurations(&self) -> Vec<SortConfiguration> {
        let mut sorts = config::meta_sorts();
        sorts.extend(self.sorts.iter().cloned());
        sorts
    }

    pub fn filter_configurations(&self) -> &[FilterConfiguration] {
        &self.filters
    }

    pub fn stale_overrides(&self) -> &[KeyPath] {
        &self.stale_overrides
    }
}
