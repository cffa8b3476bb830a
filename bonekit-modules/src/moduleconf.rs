//! Module configuration index.
//!
//! Every routable module gets one `module-conf` record holding help texts
//! that administrators can edit. [`read_all_modules`] creates the missing
//! records at startup.

use std::collections::HashSet;
use std::sync::Arc;

use bonekit_bones::{
    BoneOptions, Datastore, Key, SkeletonDef, SkeletonInstance, SkeletonRegistry, StringBone,
    TextBone,
};
use bonekit_common::{ErrorChainExt, Pretty};
use bonekit_config::BonekitConfig;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::error::Result;
use crate::skelmodule::SkelModule;
use crate::tree::ModuleTree;

/// Datastore kind of module configuration records.
pub const MODULE_CONF_KIND: &str = "module-conf";

/// Tags allowed in module help texts.
pub const HELP_TEXT_TAGS: &[&str] = &[
    "b", "a", "i", "u", "span", "div", "p", "ol", "ul", "li", "abbr", "sub", "sup", "h1", "h2",
    "h3", "h4", "h5", "h6", "br", "hr", "strong", "blockquote", "em",
];

/// Skeleton of one module configuration record.
pub fn module_conf_skel() -> Result<SkeletonDef> {
    let help_text = |descr: &str| {
        TextBone::with_valid_tags(HELP_TEXT_TAGS.iter().copied())
            .with_options(BoneOptions::new().descr(descr))
    };

    Ok(SkeletonDef::builder(MODULE_CONF_KIND)
        .bone(
            "name",
            StringBone::new().with_options(BoneOptions::new().descr("modulename").read_only()),
        )
        .bone("help_text", help_text("module helptext"))
        .bone("help_text_add", help_text("add helptext"))
        .bone("help_text_edit", help_text("edit helptext"))
        .build()?)
}

/// The module serving module configuration records.
///
/// Records can only be edited: they are created by [`read_all_modules`] and
/// never deleted.
#[derive(Debug, Clone)]
pub struct ModuleConf {
    skel: Arc<SkeletonDef>,
    admin_info: Map<String, Value>,
    max_depth: usize,
    query_limit: usize,
    trace: bool,
}

impl SkelModule for ModuleConf {
    fn module_name(&self) -> &str {
        "ModuleConf"
    }

    fn explicit_kind(&self) -> Option<&str> {
        Some(MODULE_CONF_KIND)
    }
}

impl ModuleConf {
    /// Register the module-conf skeleton and configure the module.
    pub fn register(registry: &mut SkeletonRegistry, config: &BonekitConfig) -> Result<Self> {
        let skel = registry.register(module_conf_skel()?)?;
        let admin_info = config.admin_info();
        debug!("module-conf admin info:{}", Pretty(&admin_info));
        Ok(Self {
            skel,
            admin_info,
            max_depth: config.module_conf.max_depth,
            query_limit: config.module_conf.query_limit,
            trace: config.debug.trace,
        })
    }

    pub fn access_rights(&self) -> &'static [&'static str] {
        &["edit"]
    }

    pub fn admin_info(&self) -> &Map<String, Value> {
        &self.admin_info
    }

    pub fn can_add(&self) -> bool {
        false
    }

    pub fn can_delete(&self, _skel: &SkeletonInstance) -> bool {
        false
    }

    /// An empty record, ready to be filled.
    pub fn view_skel(&self) -> SkeletonInstance {
        SkeletonInstance::new(Arc::clone(&self.skel))
    }

    /// Load the record of one module by its dotted path.
    pub async fn get_by_module_name(
        &self,
        store: &dyn Datastore,
        module_name: &str,
    ) -> Result<Option<SkeletonInstance>> {
        let key = Key::new(MODULE_CONF_KIND, module_name);
        let mut skel = self.view_skel();
        if !skel.from_db(store, &key).await? {
            error!(module = module_name, kind = MODULE_CONF_KIND, "module not found");
            return Ok(None);
        }
        Ok(Some(skel))
    }
}

/// Write a record for every module path in `tree` that has none yet.
///
/// Returns the paths that were written.
pub async fn read_all_modules(
    tree: &ModuleTree,
    store: &dyn Datastore,
    module_conf: &ModuleConf,
) -> Result<Vec<String>> {
    let existing: HashSet<String> = store
        .query(MODULE_CONF_KIND, module_conf.query_limit)
        .await?
        .into_iter()
        .map(|entity| {
            entity
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(entity.key.name)
        })
        .collect();
    debug!(existing = existing.len(), "loaded module-conf names");

    let mut written = Vec::new();
    for path in tree.collect_modules(module_conf.max_depth, module_conf.trace) {
        if existing.contains(&path) {
            continue;
        }
        // The name query is capped, so a record may exist beyond it.
        let key = Key::new(MODULE_CONF_KIND, path.as_str());
        if store.get(&key).await?.is_some() {
            debug!(path = path.as_str(), "module-conf record exists past query limit");
            continue;
        }
        let mut skel = module_conf.view_skel();
        skel.set_key(path.as_str());
        skel.set("name", Value::from(path.as_str()))?;
        skel.to_db(store).await.inspect_err(|err| {
            error!(path = path.as_str(), "{}", err.error_chain());
        })?;
        written.push(path);
    }

    info!(written = written.len(), "module-conf index updated");
    Ok(written)
}
