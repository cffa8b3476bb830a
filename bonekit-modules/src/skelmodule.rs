//! Modules bound to a skeleton kind.

use std::sync::Arc;

use bonekit_bones::{Entity, SkeletonDef, SkeletonInstance, SkeletonRegistry, CHANGEDATE};
use serde_json::Value;
use tracing::trace;

use crate::error::Result;

/// A module that manages records of one skeleton kind.
///
/// By default the kind is the module's type name in lower case, so a module
/// type `Animal` works with the `animal` skeleton.
pub trait SkelModule {
    /// Type name of the module, e.g. `"Animal"`.
    fn module_name(&self) -> &str;

    /// Kind that overrides the one derived from [`module_name`](Self::module_name).
    fn explicit_kind(&self) -> Option<&str> {
        None
    }

    fn kind_name(&self) -> String {
        match self.explicit_kind() {
            Some(kind) => kind.to_string(),
            None => self.module_name().to_lowercase(),
        }
    }

    /// Look up this module's skeleton definition.
    fn resolve_skel(&self, registry: &SkeletonRegistry) -> Result<Arc<SkeletonDef>> {
        Ok(registry.skeleton_by_kind(&self.kind_name())?)
    }

    /// A fresh, empty instance of this module's skeleton.
    fn base_skel(&self, registry: &SkeletonRegistry) -> Result<SkeletonInstance> {
        Ok(SkeletonInstance::new(self.resolve_skel(registry)?))
    }
}

/// Whether `skel` would store anything different from `old`.
///
/// The change date is ignored. A property missing from `old` counts as no
/// value.
pub fn check_for_changes(skel: &SkeletonInstance, old: &Entity) -> bool {
    skel.properties()
        .iter()
        .filter(|(name, _)| name.as_str() != CHANGEDATE)
        .any(|(name, value)| {
            let stored = old.get(name).unwrap_or(&Value::Null);
            let changed = stored != value;
            if changed {
                trace!(property = name.as_str(), "property changed");
            }
            changed
        })
}
