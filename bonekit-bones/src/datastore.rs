//! Datastore abstraction for skeleton persistence.
//!
//! The host framework owns the real datastore. Skeletons only need to get,
//! put and list entities of one kind, so that is all [`Datastore`] asks for.
//! [`MemoryDatastore`] implements it in process.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use bonekit_common::{Pretty, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::trace;

/// Identifies one stored entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    pub kind: String,
    pub name: String,
}

impl Key {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// A stored record: its key and serialized property values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub key: Key,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
}

impl Entity {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            properties: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }
}

/// Storage backend used by skeletons and modules.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Fetch one entity, `None` when absent.
    async fn get(&self, key: &Key) -> Result<Option<Entity>>;

    /// Insert or replace an entity.
    async fn put(&self, entity: Entity) -> Result<()>;

    /// Up to `limit` entities of `kind`, ordered by key name.
    async fn query(&self, kind: &str, limit: usize) -> Result<Vec<Entity>>;
}

/// In-process datastore.
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    entities: RwLock<BTreeMap<Key, Entity>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn get(&self, key: &Key) -> Result<Option<Entity>> {
        Ok(self.entities.read().await.get(key).cloned())
    }

    async fn put(&self, entity: Entity) -> Result<()> {
        trace!(key = %entity.key, "put entity{}", Pretty(&entity));
        self.entities.write().await.insert(entity.key.clone(), entity);
        Ok(())
    }

    async fn query(&self, kind: &str, limit: usize) -> Result<Vec<Entity>> {
        let entities = self.entities.read().await;
        Ok(entities
            .values()
            .filter(|e| e.key.kind == kind)
            .take(limit)
            .cloned()
            .collect())
    }
}
