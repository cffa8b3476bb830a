//! Typed configuration sections
//!
//! Every section implements `Default`, and every struct is `#[serde(default)]`
//! so a configuration file only needs to name the values it changes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ConfigError, ConfigResult};

/// Depth at which the module walk stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Maximum number of stored module-conf entries read at startup.
pub const DEFAULT_QUERY_LIMIT: usize = 999;

/// Currency symbol used by currency bones that do not name their own.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Root configuration for Bonekit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonekitConfig {
    pub debug: DebugConfig,
    pub module_conf: ModuleConfConfig,
    pub currency: CurrencyConfig,
}

/// Debugging switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Emit per-node trace logging while walking the module tree.
    pub trace: bool,
}

/// Settings for the module configuration index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfConfig {
    /// Admin metadata exposed by the module-conf module. `None` renders as an
    /// empty object.
    pub admin_info: Option<Map<String, Value>>,
    pub max_depth: usize,
    pub query_limit: usize,
}

impl Default for ModuleConfConfig {
    fn default() -> Self {
        Self {
            admin_info: None,
            max_depth: DEFAULT_MAX_DEPTH,
            query_limit: DEFAULT_QUERY_LIMIT,
        }
    }
}

/// Currency bone defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    pub default_symbol: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl BonekitConfig {
    /// Reject values that would make the module walk or index query useless.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.module_conf.max_depth == 0 {
            return Err(ConfigError::validation(
                "module_conf.max_depth must be at least 1",
            ));
        }
        if self.module_conf.query_limit == 0 {
            return Err(ConfigError::validation(
                "module_conf.query_limit must be at least 1",
            ));
        }
        if self.currency.default_symbol.trim().is_empty() {
            return Err(ConfigError::validation(
                "currency.default_symbol cannot be empty",
            ));
        }
        Ok(())
    }

    /// Admin metadata, or an empty object when none is configured.
    pub fn admin_info(&self) -> Map<String, Value> {
        self.module_conf.admin_info.clone().unwrap_or_default()
    }
}
