//! Tool configuration
//!
//! Read from `linkreg.toml` next to the executable, or from the file given
//! with `--config`. Every field has a default so a partial file is fine.
//! The environment is never consulted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LinkregError, Result};
use crate::utils::Alphabet;
use crate::utils::code_generator::DEFAULT_CODE_LENGTH;

pub const CONFIG_FILE_NAME: &str = "linkreg.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub codes: CodeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeConfig {
    #[serde(default = "default_code_length")]
    pub length: usize,
    #[serde(default)]
    pub alphabet: Alphabet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    /// 为空时输出到 stderr
    #[serde(default)]
    pub file: String,
}

fn default_data_file() -> String {
    "links.json".to_string()
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: default_data_file(),
        }
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            length: default_code_length(),
            alphabet: Alphabet::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: String::new(),
        }
    }
}

/// Directory holding the running executable; relative paths resolve here.
pub fn tool_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A loaded configuration plus the reason the implicit file was skipped,
/// if it was. Logging is not set up yet while loading, so the caller
/// reports the warning once it is.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub warning: Option<String>,
}

impl Config {
    /// Load from an explicit path, or from the file beside the executable.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
        Self::load_with_default(explicit, &tool_dir().join(CONFIG_FILE_NAME))
    }

    /// An explicit path that is missing or malformed is an error. The
    /// default file is optional and a broken one falls back to defaults.
    pub fn load_with_default(explicit: Option<&Path>, default_path: &Path) -> Result<LoadedConfig> {
        if let Some(path) = explicit {
            return Ok(LoadedConfig {
                config: Self::load_from_file(path)?,
                warning: None,
            });
        }

        if !default_path.exists() {
            return Ok(LoadedConfig {
                config: Self::default(),
                warning: None,
            });
        }

        match Self::load_from_file(default_path) {
            Ok(config) => Ok(LoadedConfig {
                config,
                warning: None,
            }),
            Err(e) => Ok(LoadedConfig {
                config: Self::default(),
                warning: Some(format!(
                    "Ignoring config file {}: {}; using defaults",
                    default_path.display(),
                    e.message()
                )),
            }),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LinkregError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content).map_err(|e| {
            LinkregError::config(format!("{}: {}", path.display(), e.message()))
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str::<Config>(content)?)
    }

    /// The configured data file, resolved against the executable's
    /// directory when relative.
    pub fn data_file(&self) -> PathBuf {
        resolve_against_tool_dir(&self.storage.file)
    }

    /// Sample TOML with every default filled in
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Config::default())
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }
}

pub fn resolve_against_tool_dir(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        tool_dir().join(path)
    }
}
