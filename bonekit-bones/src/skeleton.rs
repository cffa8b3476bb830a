//! Skeleton definitions, the kind registry, and skeleton instances.
//!
//! A [`SkeletonDef`] names a datastore kind and its ordered bones. A
//! [`SkeletonInstance`] holds one record's values for a definition and
//! mediates between client submissions, bones and the datastore.

use std::collections::HashMap;
use std::sync::Arc;

use bonekit_common::ErrorContext;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::bones::Bone;
use crate::datastore::{Datastore, Entity, Key};
use crate::error::{BonesError, Result};
use crate::read::{field_path, ClientData, ReadFromClientError, ReadFromClientErrorSeverity, ReadOutcome};

/// Property stamped on every entity written through [`SkeletonInstance::to_db`].
pub const CHANGEDATE: &str = "changedate";

/// Names a bone may not use.
pub const RESERVED_BONE_NAMES: &[&str] = &["key", CHANGEDATE];

/// Schema for one datastore kind.
#[derive(Debug, Clone)]
pub struct SkeletonDef {
    kind_name: String,
    bones: IndexMap<String, Bone>,
}

impl SkeletonDef {
    pub fn builder(kind_name: impl Into<String>) -> SkeletonDefBuilder {
        SkeletonDefBuilder {
            kind_name: kind_name.into(),
            bones: Vec::new(),
        }
    }

    pub fn kind_name(&self) -> &str {
        &self.kind_name
    }

    pub fn bones(&self) -> impl Iterator<Item = (&str, &Bone)> {
        self.bones.iter().map(|(name, bone)| (name.as_str(), bone))
    }

    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.get(name)
    }
}

/// Builder for [`SkeletonDef`]. Bones keep their insertion order.
pub struct SkeletonDefBuilder {
    kind_name: String,
    bones: Vec<(String, Bone)>,
}

impl SkeletonDefBuilder {
    pub fn bone(mut self, name: impl Into<String>, bone: impl Into<Bone>) -> Self {
        self.bones.push((name.into(), bone.into()));
        self
    }

    pub fn build(self) -> Result<SkeletonDef> {
        let mut bones = IndexMap::with_capacity(self.bones.len());
        for (name, bone) in self.bones {
            if RESERVED_BONE_NAMES.contains(&name.as_str()) {
                return Err(BonesError::ReservedBoneName { name });
            }
            if bones.contains_key(&name) {
                return Err(BonesError::DuplicateBone { name });
            }
            bones.insert(name, bone);
        }
        Ok(SkeletonDef {
            kind_name: self.kind_name,
            bones,
        })
    }
}

/// Lookup of skeleton definitions by kind name.
#[derive(Debug, Default, Clone)]
pub struct SkeletonRegistry {
    kinds: HashMap<String, Arc<SkeletonDef>>,
}

impl SkeletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: SkeletonDef) -> Result<Arc<SkeletonDef>> {
        if self.kinds.contains_key(def.kind_name()) {
            return Err(BonesError::DuplicateKind {
                kind: def.kind_name().to_string(),
            });
        }
        let def = Arc::new(def);
        self.kinds.insert(def.kind_name().to_string(), Arc::clone(&def));
        debug!(kind = %def.kind_name(), "registered skeleton");
        Ok(def)
    }

    pub fn skeleton_by_kind(&self, kind: &str) -> Result<Arc<SkeletonDef>> {
        self.kinds
            .get(kind)
            .cloned()
            .ok_or_else(|| BonesError::UnknownKind {
                kind: kind.to_string(),
            })
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}

/// Errors collected while reading a whole submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FromClientReport {
    pub errors: Vec<ReadFromClientError>,
    blocking: bool,
}

impl FromClientReport {
    /// True when the record may be persisted: nothing was rejected and no
    /// required bone is missing or empty.
    pub fn is_ok(&self) -> bool {
        !self.blocking
    }

    pub fn errors_with(&self, severity: ReadFromClientErrorSeverity) -> impl Iterator<Item = &ReadFromClientError> {
        self.errors.iter().filter(move |e| e.severity == severity)
    }
}

/// One record of a skeleton kind.
#[derive(Debug, Clone)]
pub struct SkeletonInstance {
    def: Arc<SkeletonDef>,
    key: Option<Key>,
    values: IndexMap<String, Value>,
}

impl SkeletonInstance {
    /// A record with every bone set to no value.
    pub fn new(def: Arc<SkeletonDef>) -> Self {
        let values = def.bones.keys().map(|name| (name.clone(), Value::Null)).collect();
        Self {
            def,
            key: None,
            values,
        }
    }

    pub fn def(&self) -> &SkeletonDef {
        &self.def
    }

    pub fn kind_name(&self) -> &str {
        self.def.kind_name()
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// Set the key by name within this skeleton's kind.
    pub fn set_key(&mut self, name: impl Into<String>) {
        self.key = Some(Key::new(self.def.kind_name(), name));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(BonesError::UnknownBone {
                kind: self.def.kind_name().to_string(),
                name: name.to_string(),
            }),
        }
    }

    pub fn clear(&mut self, name: &str) -> Result<()> {
        self.set(name, Value::Null)
    }

    /// Read a submission into this record.
    ///
    /// Accepted values are committed, empty fields are cleared, and missing or
    /// rejected fields keep their previous value. Read-only bones are skipped.
    pub fn from_client(&mut self, data: &ClientData) -> FromClientReport {
        self.from_client_prefixed(data, None)
    }

    /// Like [`from_client`](Self::from_client), reporting errors under
    /// `prefix.name`.
    pub fn from_client_prefixed(&mut self, data: &ClientData, prefix: Option<&str>) -> FromClientReport {
        let mut report = FromClientReport::default();
        let def = Arc::clone(&self.def);

        for (name, bone) in def.bones() {
            let options = bone.options();
            if options.read_only {
                continue;
            }

            let outcome = bone.from_client(data.get(name).map(String::as_str));
            let path = field_path(prefix, name);
            if let Some(error) = outcome.to_error(&path) {
                trace!(field = %path, severity = %error.severity, "client read problem");
                report.blocking |= match error.severity {
                    ReadFromClientErrorSeverity::Invalid => true,
                    ReadFromClientErrorSeverity::NotSet | ReadFromClientErrorSeverity::Empty => options.required,
                };
                report.errors.push(error);
            }

            match outcome {
                ReadOutcome::Valid(value) => {
                    self.values.insert(name.to_string(), value);
                }
                ReadOutcome::Empty => {
                    self.values.insert(name.to_string(), Value::Null);
                }
                ReadOutcome::NotSubmitted | ReadOutcome::Invalid(_) => {}
            }
        }

        report
    }

    /// Stored form of every bone value, in bone order.
    pub fn properties(&self) -> IndexMap<String, Value> {
        self.def
            .bones()
            .map(|(name, bone)| {
                let value = self.values.get(name).unwrap_or(&Value::Null);
                (name.to_string(), bone.serialize(value))
            })
            .collect()
    }

    /// Serialize into an entity. The record needs a key.
    pub fn serialize(&self) -> Result<Entity> {
        let key = self.key.clone().ok_or_else(|| BonesError::MissingKey {
            kind: self.kind_name().to_string(),
        })?;
        Ok(Entity {
            key,
            properties: self.properties(),
        })
    }

    /// Build a record from a stored entity.
    pub fn from_entity(def: Arc<SkeletonDef>, entity: &Entity) -> Result<Self> {
        let mut skel = Self::new(def);
        skel.load_entity(entity)?;
        Ok(skel)
    }

    /// Replace this record's key and values with a stored entity.
    pub fn load_entity(&mut self, entity: &Entity) -> Result<()> {
        if entity.key.kind != self.kind_name() {
            return Err(BonesError::KindMismatch {
                expected: self.kind_name().to_string(),
                found: entity.key.kind.clone(),
            });
        }
        for (name, bone) in self.def.bones() {
            let stored = entity.get(name).unwrap_or(&Value::Null);
            self.values.insert(name.to_string(), bone.unserialize(stored));
        }
        self.key = Some(entity.key.clone());
        Ok(())
    }

    /// Write this record, stamping the change date.
    pub async fn to_db(&self, store: &dyn Datastore) -> Result<Key> {
        let mut entity = self.serialize()?;
        entity.set(CHANGEDATE, Value::from(chrono::Utc::now().to_rfc3339()));
        let key = entity.key.clone();
        store
            .put(entity)
            .await
            .with_context(|| format!("failed to write {key}"))?;
        debug!(%key, "skeleton written");
        Ok(key)
    }

    /// Load the entity stored under `key`. Returns false, leaving the record
    /// untouched, when nothing is stored there.
    pub async fn from_db(&mut self, store: &dyn Datastore, key: &Key) -> Result<bool> {
        match store.get(key).await? {
            Some(entity) => {
                self.load_entity(&entity)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
