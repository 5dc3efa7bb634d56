use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Settings for rendering asides and blurbs.
///
/// Every field is optional in the file:
///
/// ```toml
/// extra_classes = ["sidebar", "aside-note"]
/// warn_unknown_classes = true
/// xhtml_out = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blurb classes accepted on top of the built-in set.
    pub extra_classes: Vec<String>,
    /// Report blurb classes outside the known set.
    pub warn_unknown_classes: bool,
    /// Emit XHTML-style void elements.
    pub xhtml_out: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extra_classes: Vec::new(),
            warn_unknown_classes: true,
            xhtml_out: false,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.extra_classes.retain(|class| !class.trim().is_empty());

        Ok(Some(config))
    }

    /// `path` with `~` and variables expanded, or the default location.
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        match path {
            Some(path) => Self::expand_path(path).unwrap_or_else(|| path.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Loads from `path` when given, otherwise from the default location.
    /// A missing file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = Self::load_from_path(Self::resolve_path(path))?;
        Ok(loaded.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-aside");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
