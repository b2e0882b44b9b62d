//! Field inference from models.
//!
//! Depth-first: every model node is handed to the first registered
//! constructor that accepts it. Constructors create their children through
//! [`BuildCx`], which tracks the key path, labels, nesting depth and
//! per-position overrides.

mod builtins;
mod registry;

#[cfg(test)]
mod infer_tests;
#[cfg(test)]
mod overrides_tests;
#[cfg(test)]
mod registry_tests;

pub use registry::{CreateFn, FieldConstructor, MatchFn, Registry, UnserializeFn};

use std::collections::HashSet;

use fieldtree_core::utils::humanize;
use fieldtree_core::{Model, ModelTag};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::field::{Field, FieldArena, FieldId, Modifier};
use crate::path::{KeyPath, KeySegment};
use crate::serialize::SerializedField;
use crate::tree::RawTree;

/// Models nested deeper than this become error fields.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Inference configuration.
#[derive(Clone, Debug)]
pub struct InferOptions {
    humanize_labels: bool,
    max_depth: usize,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            humanize_labels: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl InferOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive labels like `Created at` from keys like `created_at`.
    /// When off, the key itself is the label.
    pub fn humanize_labels(mut self, value: bool) -> Self {
        self.humanize_labels = value;
        self
    }

    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    pub fn labels_humanized(&self) -> bool {
        self.humanize_labels
    }

    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }
}

/// Serialized replacements for inferred fields, keyed by position.
///
/// Wire shape: `[[keyPath, serializedField], ...]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Vec<(KeyPath, SerializedField)>",
    into = "Vec<(KeyPath, SerializedField)>"
)]
pub struct Overrides {
    entries: IndexMap<KeyPath, SerializedField>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key_path: KeyPath, field: SerializedField) -> &mut Self {
        self.entries.insert(key_path, field);
        self
    }

    pub fn get(&self, key_path: &KeyPath) -> Option<&SerializedField> {
        self.entries.get(key_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyPath, &SerializedField)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<(KeyPath, SerializedField)>> for Overrides {
    fn from(entries: Vec<(KeyPath, SerializedField)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl From<Overrides> for Vec<(KeyPath, SerializedField)> {
    fn from(overrides: Overrides) -> Self {
        overrides.entries.into_iter().collect()
    }
}

/// Infer a field tree from a model.
pub fn infer(model: &Model, registry: &Registry, options: &InferOptions) -> RawTree {
    infer_with_overrides(model, registry, options, &Overrides::new())
}

/// Infer a field tree, replacing fields at overridden key paths.
///
/// An override whose tag is a modifier (`optional`, `list`, `map`) replaces
/// the outermost field at its key path. Any other override replaces the base
/// field beneath the inferred modifiers, so the model keeps deciding
/// cardinality. Overrides that match no position are reported as stale.
pub fn infer_with_overrides(
    model: &Model,
    registry: &Registry,
    options: &InferOptions,
    overrides: &Overrides,
) -> RawTree {
    let mut cx = BuildCx::new(registry, options, Some(overrides));
    let root = cx.build(model, None);

    let stale = cx.stale_overrides();
    for key_path in &stale {
        tracing::warn!(path = %key_path, "override does not match any field, skipping");
    }
    tracing::debug!(fields = cx.arena.len(), "inferred field tree");

    RawTree::new(cx.into_arena(), root, stale)
}

/// Construction context handed to field constructors.
pub struct BuildCx<'a> {
    registry: &'a Registry,
    options: &'a InferOptions,
    overrides: Option<&'a Overrides>,
    applied: HashSet<KeyPath>,
    arena: FieldArena,
    key_path: KeyPath,
    depth: usize,
    /// False inside non-entry members of a recursion group, whose key path
    /// is not known while building.
    addressable: bool,
}

impl<'a> BuildCx<'a> {
    pub(crate) fn new(
        registry: &'a Registry,
        options: &'a InferOptions,
        overrides: Option<&'a Overrides>,
    ) -> Self {
        Self {
            registry,
            options,
            overrides,
            applied: HashSet::new(),
            arena: FieldArena::new(),
            key_path: KeyPath::root(),
            depth: 0,
            addressable: true,
        }
    }

    /// Key path of the field being built.
    pub fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    pub fn options(&self) -> &InferOptions {
        self.options
    }

    /// Fields built so far.
    pub fn arena(&self) -> &FieldArena {
        &self.arena
    }

    /// Infer a keyed child: struct key, tuple index or union key.
    pub fn child(&mut self, segment: impl Into<KeySegment>, model: &Model) -> FieldId {
        let segment = segment.into();
        let label = self.label_for(&segment);
        self.key_path.push(segment);
        let id = self.build(model, Some(label));
        self.key_path.pop();
        id
    }

    /// Infer the child of a modifier. It shares the parent's key path.
    pub fn inner(&mut self, model: &Model) -> FieldId {
        self.build(model, None)
    }

    /// Infer a recursion-group member. Only the entry member is reachable
    /// by the group's key path.
    pub fn member(&mut self, model: &Model, is_top: bool) -> FieldId {
        let addressable = self.addressable;
        self.addressable = addressable && is_top;
        let id = self.build(model, None);
        self.addressable = addressable;
        id
    }

    /// Rebuild a keyed child from its serialized form.
    pub fn unserialize_child(
        &mut self,
        segment: impl Into<KeySegment>,
        payload: &SerializedField,
        model: &Model,
    ) -> FieldId {
        self.key_path.push(segment.into());
        let id = self.build_serialized(payload, model, None);
        self.key_path.pop();
        id
    }

    /// Rebuild the child of a modifier.
    pub fn unserialize_inner(&mut self, payload: &SerializedField, model: &Model) -> FieldId {
        self.build_serialized(payload, model, None)
    }

    /// Rebuild a recursion-group member. Like [`member`](Self::member),
    /// overrides only reach into the entry member.
    pub fn unserialize_member(
        &mut self,
        payload: &SerializedField,
        model: &Model,
        is_top: bool,
    ) -> FieldId {
        let addressable = self.addressable;
        self.addressable = addressable && is_top;
        let id = self.build_serialized(payload, model, None);
        self.addressable = addressable;
        id
    }

    /// Display label for a child at `segment`.
    pub fn label_for(&self, segment: &KeySegment) -> String {
        match segment {
            KeySegment::Key(key) if self.options.humanize_labels => humanize(key),
            KeySegment::Key(key) => key.clone(),
            KeySegment::Index(index) => index.to_string(),
        }
    }

    pub(crate) fn build(&mut self, model: &Model, label: Option<String>) -> FieldId {
        if let Some(id) = self.enter() {
            return id;
        }
        let id = self.build_model(model, label);
        self.depth -= 1;
        id
    }

    pub(crate) fn build_serialized(
        &mut self,
        payload: &SerializedField,
        model: &Model,
        fallback_label: Option<String>,
    ) -> FieldId {
        if let Some(id) = self.enter() {
            return id;
        }
        let id = self.build_payload(payload, model, fallback_label);
        self.depth -= 1;
        id
    }

    /// Descend one level; past the depth limit, returns the error field to
    /// use instead.
    fn enter(&mut self) -> Option<FieldId> {
        if self.depth >= self.options.max_depth {
            tracing::warn!(path = %self.key_path, "nesting depth limit exceeded");
            let message = format!("nesting depth limit of {} exceeded", self.options.max_depth);
            return Some(self.arena.alloc(Field::error(message)));
        }
        self.depth += 1;
        None
    }

    fn build_model(&mut self, model: &Model, label: Option<String>) -> FieldId {
        let base = model.unwrap_annotations();

        if let Some(payload) = self.take_override(base) {
            tracing::debug!(path = %self.key_path, tag = %payload.type_tag, "applying override");
            return self.build_payload(payload, model, label);
        }

        let registry = self.registry;
        let mut field = match registry.find(base) {
            Some(ctor) => (ctor.create)(base, self),
            None => {
                tracing::warn!(path = %self.key_path, model = %base.tag(), "no field constructor matches model");
                Field::error(format!("no field constructor matches model `{}`", base.tag()))
            }
        };

        if field.label.is_none() {
            field.label = label;
        }
        // Outermost annotation wins, so apply innermost first.
        for (key, value) in model.annotations().into_iter().rev() {
            match key {
                "label" => field.label = Some(value.to_string()),
                "description" => field.description = Some(value.to_string()),
                _ => {}
            }
        }

        self.arena.alloc(field)
    }

    fn build_payload(
        &mut self,
        payload: &SerializedField,
        model: &Model,
        fallback_label: Option<String>,
    ) -> FieldId {
        let base = model.unwrap_annotations();
        let registry = self.registry;

        let result = match registry.get(&payload.type_tag) {
            None => Err(format!("unknown field type `{}`", payload.type_tag)),
            Some(ctor) if !(ctor.matches)(base) => Err(format!(
                "field type `{}` does not match model `{}`",
                payload.type_tag,
                base.tag()
            )),
            Some(ctor) => (ctor.unserialize)(payload, base, self),
        };

        let mut field = result.unwrap_or_else(|message| {
            tracing::warn!(path = %self.key_path, %message, "cannot unserialize field");
            Field::error(message)
        });
        // The payload wins over the model's annotations, which win over the
        // derived label.
        let annotated = |name: &str| {
            model
                .annotations()
                .into_iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        };
        field.label = payload
            .label
            .clone()
            .or_else(|| annotated("label"))
            .or(fallback_label);
        field.description = payload
            .description
            .clone()
            .or_else(|| annotated("description"));

        self.arena.alloc(field)
    }

    /// The override for the current position, if it applies here.
    fn take_override(&mut self, base: &Model) -> Option<&'a SerializedField> {
        if !self.addressable {
            return None;
        }
        let payload = self.overrides?.get(&self.key_path)?;
        if self.applied.contains(&self.key_path) {
            return None;
        }

        // Modifiers and recursion groups are transparent to key paths; unless
        // the override replaces them explicitly, it applies further in.
        let transparent = match base.tag() {
            tag if tag.is_modifier() => Modifier::from_tag(&payload.type_tag).is_none(),
            ModelTag::Recursive | ModelTag::Recursion => payload.type_tag != "recursive",
            _ => false,
        };
        if transparent {
            return None;
        }

        self.applied.insert(self.key_path.clone());
        Some(payload)
    }

    fn stale_overrides(&self) -> Vec<KeyPath> {
        let Some(overrides) = self.overrides else {
            return Vec::new();
        };
        overrides
            .iter()
            .filter(|(path, _)| !self.applied.contains(*path))
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub(crate) fn into_arena(self) -> FieldArena {
        self.arena
    }
}
