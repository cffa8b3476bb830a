//! Configuration provider using Figment

use crate::{error::ConfigError, types::BonekitConfig, ConfigResult};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Environment variable prefix. `__` separates nested keys, so
/// `BONEKIT_MODULE_CONF__MAX_DEPTH` maps to `module_conf.max_depth`.
pub const ENV_PREFIX: &str = "BONEKIT_";

/// File names probed in the working directory when no file is given.
pub const CONFIG_FILE_NAMES: &[&str] = &["bonekit.yaml", "bonekit.yml", "bonekit.toml", "bonekit.json"];

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration provider using figment
///
/// Sources are merged in precedence order, later sources overriding earlier
/// ones:
/// 1. `BonekitConfig::default()`
/// 2. The configuration file (explicit, or the first of [`CONFIG_FILE_NAMES`]
///    found in the working directory)
/// 3. `BONEKIT_`-prefixed environment variables
///
/// Nothing is cached; every `load` reads the sources again.
#[derive(Debug, Default)]
pub struct ConfigProvider {
    file: Option<PathBuf>,
}

impl ConfigProvider {
    /// Create a provider that discovers its file in the working directory
    pub fn new() -> Self {
        Self { file: None }
    }

    /// Create a provider that reads a specific file, which must exist
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<BonekitConfig> {
        let config: BonekitConfig = self.build_figment()?.extract()?;
        config.validate()?;
        debug!(
            trace = config.debug.trace,
            max_depth = config.module_conf.max_depth,
            query_limit = config.module_conf.query_limit,
            "configuration loaded"
        );
        Ok(config)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(BonekitConfig::default()));

        match &self.file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path: path.clone() });
                }
                figment = figment.merge(Self::load_config_file(path)?);
            }
            None => {
                if let Some(path) = Self::discover() {
                    figment = figment.merge(Self::load_config_file(&path)?);
                }
            }
        }

        Ok(figment.merge(Self::load_env_vars()))
    }

    fn discover() -> Option<PathBuf> {
        CONFIG_FILE_NAMES.iter().map(PathBuf::from).find(|path| {
            trace!(path = %path.display(), "probing configuration file");
            path.is_file()
        })
    }

    /// Load a single configuration file based on its extension
    fn load_config_file(path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let format = ConfigFormat::from_extension(ext).ok_or_else(|| ConfigError::UnsupportedFormat {
            format: ext.to_string(),
        })?;

        debug!(path = %path.display(), ?format, "loading configuration file");
        Ok(match format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        })
    }

    fn load_env_vars() -> Figment {
        Figment::from(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

/// Load configuration from the working directory and the environment.
pub fn load_configuration() -> ConfigResult<BonekitConfig> {
    ConfigProvider::new().load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("YML"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
    }

    #[test]
    #[serial]
    fn test_load_defaults_without_sources() {
        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();

        let result = ConfigProvider::new().load();

        std::env::set_current_dir(original_dir).unwrap();
        assert_eq!(result.unwrap(), BonekitConfig::default());
    }

    #[test]
    #[serial]
    fn test_discovers_yaml_in_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("bonekit.yaml"),
            "debug:\n  trace: true\ncurrency:\n  default_symbol: \"$\"\n",
        )
        .unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();

        let result = load_configuration();

        std::env::set_current_dir(original_dir).unwrap();
        let config = result.unwrap();
        assert!(config.debug.trace);
        assert_eq!(config.currency.default_symbol, "$");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = ConfigProvider::with_file("/nonexistent/bonekit.yaml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bonekit.ini");
        fs::write(&path, "trace = true").unwrap();

        let err = ConfigProvider::with_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { ref format } if format == "ini"));
    }

    #[test]
    #[serial]
    fn test_invalid_value_fails_validation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bonekit.toml");
        fs::write(&path, "[module_conf]\nquery_limit = 0\n").unwrap();

        let err = ConfigProvider::with_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
