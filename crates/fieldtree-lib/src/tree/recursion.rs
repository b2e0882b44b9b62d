//! Recurse binding.
//!
//! Every group member is already built when this runs. The walk follows
//! owned edges only, keeping the member tables of enclosing groups on a
//! scope stack, and points each recurse at the innermost member with its
//! label. No field is ever copied.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::field::{Field, FieldArena, FieldId, FieldKind};

type Scope = IndexMap<String, FieldId>;

pub(super) fn bind(arena: &mut FieldArena, root: FieldId) {
    let mut scopes = Vec::new();
    let mut recurses = Vec::new();
    bind_walk(arena, root, &mut scopes, &mut recurses);

    for id in recurses {
        if reaches_field(arena, id) {
            continue;
        }
        let label = recurse_label(arena, id);
        tracing::warn!(%label, "recursion never reaches a field");
        let error = arena.alloc(Field::error(format!(
            "recursion `{label}` never reaches a field"
        )));
        set_target(arena, id, error);
    }
}

fn bind_walk(
    arena: &mut FieldArena,
    id: FieldId,
    scopes: &mut Vec<Scope>,
    recurses: &mut Vec<FieldId>,
) {
    let Some(field) = arena.get(id) else {
        return;
    };

    match &field.kind {
        FieldKind::Recurse(recurse) => {
            let label = recurse.label.clone();
            let bound = scopes
                .iter()
                .rev()
                .find_map(|scope| scope.get(&label).copied());
            let target = match bound {
                Some(target) => {
                    tracing::trace!(%label, from = %id, to = %target, "bound recurse");
                    target
                }
                None => {
                    tracing::warn!(%label, "recursion label is not bound by an enclosing group");
                    arena.alloc(Field::error(format!(
                        "recursion label `{label}` is not bound by an enclosing group"
                    )))
                }
            };
            set_target(arena, id, target);
            recurses.push(id);
        }
        FieldKind::Recursive(group) => {
            let scope = group.fields.clone();
            let members: Vec<FieldId> = scope.values().copied().collect();
            scopes.push(scope);
            for member in members {
                bind_walk(arena, member, scopes, recurses);
            }
            scopes.pop();
        }
        kind => {
            for child in kind.children() {
                bind_walk(arena, child, scopes, recurses);
            }
        }
    }
}

/// Whether following aliases from a recurse ends at a concrete field.
fn reaches_field(arena: &FieldArena, start: FieldId) -> bool {
    let mut seen = HashSet::new();
    let mut current = start;
    loop {
        if !seen.insert(current) {
            return false;
        }
        let next = match arena.get(current).map(|f| &f.kind) {
            Some(FieldKind::Recurse(r)) => r.target,
            Some(FieldKind::Recursive(g)) => g.top_field(),
            _ => None,
        };
        match next {
            Some(next) => current = next,
            None => return true,
        }
    }
}

fn recurse_label(arena: &FieldArena, id: FieldId) -> String {
    match arena.get(id).map(|f| &f.kind) {
        Some(FieldKind::Recurse(r)) => r.label.clone(),
        _ => String::new(),
    }
}

fn set_target(arena: &mut FieldArena, id: FieldId, target: FieldId) {
    if let Some(Field {
        kind: FieldKind::Recurse(recurse),
        ..
    }) = arena.get_mut(id)
    {
        recurse.target = Some(target);
    }
}
