//! Bonekit configuration management using Figment
//!
//! Configuration is read fresh on every load, merging defaults, an optional
//! file (TOML, YAML or JSON by extension) and `BONEKIT_`-prefixed environment
//! variables.
//!
//! ```no_run
//! use bonekit_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("module walk depth: {}", config.module_conf.max_depth);
//! # Ok::<(), bonekit_config::ConfigError>(())
//! ```
//!
//! Example YAML:
//!
//! ```yaml
//! debug:
//!   trace: true
//! module_conf:
//!   max_depth: 8
//!   admin_info:
//!     icon: settings
//! currency:
//!   default_symbol: "$"
//! ```

pub mod error;
pub mod provider;
pub mod types;

pub use error::ConfigError;
pub use provider::{load_configuration, ConfigFormat, ConfigProvider, CONFIG_FILE_NAMES, ENV_PREFIX};
pub use types::{
    BonekitConfig, CurrencyConfig, DebugConfig, ModuleConfConfig, DEFAULT_CURRENCY_SYMBOL,
    DEFAULT_MAX_DEPTH, DEFAULT_QUERY_LIMIT,
};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
