//! Path addressing over an initialized tree.

use std::collections::HashSet;

use super::FieldTree;
use crate::field::{FieldId, FieldKind, Modifier};
use crate::path::{KeyPath, KeySegment, ValuePath, ValueSegment};

impl FieldTree {
    /// Follow recursion aliases: a group to its top member, a recurse to its
    /// target. Any other field resolves to itself.
    pub fn resolve(&self, id: FieldId) -> FieldId {
        let mut current = id;
        // Initialization breaks alias cycles.
        for _ in 0..=self.len() {
            match self.alias_target(current) {
                Some(next) => current = next,
                None => return current,
            }
        }
        current
    }

    fn alias_target(&self, id: FieldId) -> Option<FieldId> {
        match &self.get(id)?.kind {
            FieldKind::Recursive(group) => group.top_field(),
            FieldKind::Recurse(recurse) => recurse.target,
            _ => None,
        }
    }

    /// The field at `key_path`, starting from the root.
    ///
    /// The empty path is the root itself. Modifiers and recursion aliases are
    /// crossed before each key is consumed, so a path ending at a wrapped
    /// field returns its outermost wrapper.
    pub fn traverse(&self, key_path: &KeyPath) -> Option<FieldId> {
        self.traverse_from(self.root, key_path)
    }

    pub fn traverse_from(&self, start: FieldId, key_path: &KeyPath) -> Option<FieldId> {
        let mut current = start;
        for segment in key_path.iter() {
            let keyed = self.through_modifiers(current, None)?;
            current = self.keyed_child(keyed, segment)?.1;
        }
        Some(current)
    }

    /// The value path addressing the field at `key_path`, including every
    /// modifier segment on the way and the modifiers wrapping the target.
    ///
    /// For `struct{tags: list<string>}`, `tags` maps to `$.tags.[]`.
    pub fn value_path_for_key_path(&self, key_path: &KeyPath) -> Option<ValuePath> {
        let mut path = ValuePath::root();
        let mut current = self.root;
        for segment in key_path.iter() {
            let keyed = self.through_modifiers(current, Some(&mut path))?;
            let (value_segment, child) = self.keyed_child(keyed, segment)?;
            path.push(value_segment);
            current = child;
        }
        // A modifier-only cycle just stops the trailing walk.
        let _ = self.through_modifiers(current, Some(&mut path));
        Some(path)
    }

    /// The field a value path leads to. Every modifier segment must match a
    /// modifier in the tree.
    pub fn traverse_value_path(&self, value_path: &ValuePath) -> Option<FieldId> {
        let mut current = self.root;
        for segment in value_path.iter() {
            let node = self.resolve(current);
            current = match (segment, &self.field(node).kind) {
                (ValueSegment::List, FieldKind::List(inner))
                | (ValueSegment::Map, FieldKind::Map(inner))
                | (ValueSegment::Optional, FieldKind::Optional(inner)) => *inner,
                _ => {
                    let key = segment.key_segment()?;
                    let (found, child) = self.keyed_child(node, &key)?;
                    if found != *segment {
                        return None;
                    }
                    child
                }
            };
        }
        Some(current)
    }

    /// The key path of the field a value path leads to.
    pub fn key_path_for_value_path(&self, value_path: &ValuePath) -> Option<KeyPath> {
        self.traverse_value_path(value_path)?;
        Some(value_path.key_path())
    }

    /// Peel `optional`/`list`/`map` wrappers off `id`, outermost first.
    pub fn modifier_stack(&self, id: FieldId) -> (Vec<Modifier>, FieldId) {
        let mut modifiers = Vec::new();
        let mut current = id;
        while let Some((modifier, inner)) = self.get(current).and_then(|f| f.kind.modifier()) {
            modifiers.push(modifier);
            current = inner;
        }
        (modifiers, current)
    }

    /// Cross modifiers and aliases down to the next field that is neither,
    /// recording modifier segments. `None` on a modifier-only cycle such as
    /// `t = list<t>`.
    fn through_modifiers(&self, id: FieldId, mut path: Option<&mut ValuePath>) -> Option<FieldId> {
        let mut seen = HashSet::new();
        let mut current = id;
        loop {
            if !seen.insert(current) {
                return None;
            }
            let kind = &self.get(current)?.kind;
            if let Some((modifier, inner)) = kind.modifier() {
                if let Some(path) = path.as_deref_mut() {
                    path.push(modifier.segment());
                }
                current = inner;
                continue;
            }
            match kind {
                FieldKind::Recursive(group) => current = group.top_field()?,
                FieldKind::Recurse(recurse) => current = recurse.target?,
                _ => return Some(current),
            }
        }
    }

    fn keyed_child(&self, id: FieldId, segment: &KeySegment) -> Option<(ValueSegment, FieldId)> {
        match (&self.get(id)?.kind, segment) {
            (FieldKind::Struct(s), KeySegment::Key(key)) => {
                let child = s.get(key)?;
                Some((ValueSegment::Struct { key: key.clone() }, child))
            }
            // Dotted text turns numeric struct keys into indices.
            (FieldKind::Struct(s), KeySegment::Index(index)) => {
                let key = index.to_string();
                let child = s.get(&key)?;
                Some((ValueSegment::Struct { key }, child))
            }
            (FieldKind::Tuple(t), KeySegment::Index(index)) => {
                let child = *t.fields.get(*index)?;
                Some((ValueSegment::Tuple { index: *index }, child))
            }
            (FieldKind::Union(u), KeySegment::Key(key)) => {
                let variant = u.get(key)?;
                Some((ValueSegment::Union { key: key.clone() }, variant.field))
            }
            (FieldKind::Union(u), KeySegment::Index(index)) => {
                let key = index.to_string();
                let variant = u.get(&key)?;
                Some((ValueSegment::Union { key }, variant.field))
            }
            _ => None,
        }
    }
}
