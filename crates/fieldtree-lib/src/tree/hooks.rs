//! Save and delete hooks.
//!
//! Hooks run sequentially in declared child order; each is awaited before the
//! next starts. The first failure aborts the walk and is returned as is. No
//! rollback of already completed hooks is attempted.

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::FieldTree;
use crate::field::{FieldId, FieldKind, Value};
use crate::path::{ValuePath, ValueSegment};

/// Side effects needed by field hooks.
///
/// Only secret hashing has no sensible default; the rest pass values
/// through unchanged.
#[async_trait]
pub trait HookContext: Send + Sync {
    async fn hash_secret(&self, secret: &str) -> Result<String, HookError>;

    /// Make a pending upload permanent. Returns the id to store.
    async fn commit_upload(&self, upload: &str) -> Result<String, HookError> {
        Ok(upload.to_string())
    }

    async fn delete_upload(&self, _upload: &str) -> Result<(), HookError> {
        Ok(())
    }

    /// Save the referenced record. Returns the id to store.
    async fn save_reference(&self, _model: &str, id: &str) -> Result<String, HookError> {
        Ok(id.to_string())
    }

    async fn delete_reference(&self, _model: &str, _id: &str) -> Result<(), HookError> {
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("{message}")]
    Context { message: String },

    #[error("hook at `{path}` failed: {source}")]
    Field {
        path: ValuePath,
        source: Box<HookError>,
    },
}

impl HookError {
    pub fn context(message: impl Into<String>) -> Self {
        Self::Context {
            message: message.into(),
        }
    }

    fn at(self, path: &ValuePath) -> Self {
        Self::Field {
            path: path.clone(),
            source: Box::new(self),
        }
    }
}

impl FieldTree {
    /// Run save hooks over `value`, returning the value to persist.
    pub async fn on_save(
        &self,
        id: FieldId,
        value: Value,
        ctx: &dyn HookContext,
    ) -> Result<Value, HookError> {
        self.save_walk(id, value, ValuePath::root(), ctx).await
    }

    /// Run delete hooks over `value`.
    pub async fn on_delete(
        &self,
        id: FieldId,
        value: &Value,
        ctx: &dyn HookContext,
    ) -> Result<(), HookError> {
        self.delete_walk(id, value, ValuePath::root(), ctx).await
    }

    fn save_walk<'a>(
        &'a self,
        id: FieldId,
        value: Value,
        path: ValuePath,
        ctx: &'a dyn HookContext,
    ) -> BoxFuture<'a, Result<Value, HookError>> {
        async move {
            let id = self.resolve(id);
            match (&self.field(id).kind, value) {
                (FieldKind::Password(_), Value::Text(secret)) if !secret.is_empty() => {
                    let hashed = ctx.hash_secret(&secret).await.map_err(|e| e.at(&path))?;
                    Ok(Value::Text(hashed))
                }
                (FieldKind::File(_), Value::Text(upload)) if !upload.is_empty() => {
                    let stored = ctx.commit_upload(&upload).await.map_err(|e| e.at(&path))?;
                    Ok(Value::Text(stored))
                }
                (FieldKind::Reference(r), Value::Ref(Some(record))) => {
                    let stored = ctx
                        .save_reference(&r.model, &record)
                        .await
                        .map_err(|e| e.at(&path))?;
                    Ok(Value::Ref(Some(stored)))
                }
                (FieldKind::Struct(s), Value::Struct(mut values)) => {
                    for (key, child) in &s.fields {
                        let Some(slot) = values.get_mut(key) else {
                            continue;
                        };
                        let child_value = std::mem::replace(slot, Value::Null);
                        let child_path = path.child(ValueSegment::Struct { key: key.clone() });
                        let saved = self.save_walk(*child, child_value, child_path, ctx).await?;
                        if let Some(slot) = values.get_mut(key) {
                            *slot = saved;
                        }
                    }
                    Ok(Value::Struct(values))
                }
                (FieldKind::Tuple(t), Value::Tuple(values)) => {
                    let mut saved = Vec::with_capacity(values.len());
                    for (index, child_value) in values.into_iter().enumerate() {
                        let Some(child) = t.fields.get(index) else {
                            saved.push(child_value);
                            continue;
                        };
                        let child_path = path.child(ValueSegment::Tuple { index });
                        saved.push(self.save_walk(*child, child_value, child_path, ctx).await?);
                    }
                    Ok(Value::Tuple(saved))
                }
                (FieldKind::Union(u), Value::Union { selected, mut values }) => {
                    if let (Some(variant), Some(slot)) = (u.get(&selected), values.get_mut(&selected)) {
                        let child_value = std::mem::replace(slot, Value::Null);
                        let child_path = path.child(ValueSegment::Union {
                            key: selected.clone(),
                        });
                        let saved = self
                            .save_walk(variant.field, child_value, child_path, ctx)
                            .await?;
                        values.insert(selected.clone(), saved);
                    }
                    Ok(Value::Union { selected, values })
                }
                (FieldKind::Optional(inner), Value::Optional(Some(child_value))) => {
                    let child_path = path.child(ValueSegment::Optional);
                    let saved = self.save_walk(*inner, *child_value, child_path, ctx).await?;
                    Ok(Value::some(saved))
                }
                (FieldKind::List(inner), Value::List(items)) => {
                    let mut saved = Vec::with_capacity(items.len());
                    for item in items {
                        let child_path = path.child(ValueSegment::List);
                        saved.push(self.save_walk(*inner, item, child_path, ctx).await?);
                    }
                    Ok(Value::List(saved))
                }
                (FieldKind::Map(inner), Value::Map(entries)) => {
                    let mut saved = indexmap::IndexMap::with_capacity(entries.len());
                    for (key, item) in entries {
                        let child_path = path.child(ValueSegment::Map);
                        saved.insert(key, self.save_walk(*inner, item, child_path, ctx).await?);
                    }
                    Ok(Value::Map(saved))
                }
                (_, value) => Ok(value),
            }
        }
        .boxed()
    }

    fn delete_walk<'a>(
        &'a self,
        id: FieldId,
        value: &'a Value,
        path: ValuePath,
        ctx: &'a dyn HookContext,
    ) -> BoxFuture<'a, Result<(), HookError>> {
        async move {
            let id = self.resolve(id);
            match (&self.field(id).kind, value) {
                (FieldKind::File(_), Value::Text(upload)) if !upload.is_empty() => {
                    ctx.delete_upload(upload).await.map_err(|e| e.at(&path))
                }
                (FieldKind::Reference(r), Value::Ref(Some(record))) if r.owned => ctx
                    .delete_reference(&r.model, record)
                    .await
                    .map_err(|e| e.at(&path)),
                (FieldKind::Struct(s), Value::Struct(values)) => {
                    for (key, child) in &s.fields {
                        if let Some(child_value) = values.get(key) {
                            let child_path = path.child(ValueSegment::Struct { key: key.clone() });
                            self.delete_walk(*child, child_value, child_path, ctx).await?;
                        }
                    }
                    Ok(())
                }
                (FieldKind::Tuple(t), Value::Tuple(values)) => {
                    for (index, (child, child_value)) in t.fields.iter().zip(values).enumerate() {
                        let child_path = path.child(ValueSegment::Tuple { index });
                        self.delete_walk(*child, child_value, child_path, ctx).await?;
                    }
                    Ok(())
                }
                (FieldKind::Union(u), Value::Union { selected, values }) => {
                    if let (Some(variant), Some(child_value)) = (u.get(selected), values.get(selected)) {
                        let child_path = path.child(ValueSegment::Union {
                            key: selected.clone(),
                        });
                        self.delete_walk(variant.field, child_value, child_path, ctx)
                            .await?;
                    }
                    Ok(())
                }
                (FieldKind::Optional(inner), Value::Optional(Some(child_value))) => {
                    let child_path = path.child(ValueSegment::Optional);
                    self.delete_walk(*inner, child_value, child_path, ctx).await
                }
                (FieldKind::List(inner), Value::List(items)) => {
                    for item in items {
                        self.delete_walk(*inner, item, path.child(ValueSegment::List), ctx)
                            .await?;
                    }
                    Ok(())
                }
                (FieldKind::Map(inner), Value::Map(entries)) => {
                    for item in entries.values() {
                        self.delete_walk(*inner, item, path.child(ValueSegment::Map), ctx)
                            .await?;
                    }
                    Ok(())
                }
                _ => Ok(()),
            }
        }
        .boxed()
    }
}
