//! Modules for Bonekit
//!
//! Routable modules form a [`ModuleTree`]. At startup [`read_all_modules`]
//! walks that tree and makes sure every module has a record in the
//! `module-conf` index, which [`ModuleConf`] then serves for editing.
//! [`SkelModule`] binds a module to the skeleton kind it manages.

pub mod error;
pub mod moduleconf;
pub mod skelmodule;
pub mod tree;

pub use error::{ModulesError, Result};
pub use moduleconf::{module_conf_skel, read_all_modules, ModuleConf, HELP_TEXT_TAGS, MODULE_CONF_KIND};
pub use skelmodule::{check_for_changes, SkelModule};
pub use tree::{ModuleId, ModuleTree};
