use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default cap on the size of a single message handed to the parser.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

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

/// The host a message is rendered for.
///
/// Mobile hosts cannot show bare text outside a paragraph wrapper, which
/// changes how the grammar treats text and paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Desktop,
    Mobile,
}

impl Platform {
    pub fn is_mobile(self) -> bool {
        matches!(self, Platform::Mobile)
    }
}

/// Per-kind style names layered over the host's default markdown styles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverride {
    pub paragraph: Option<String>,
    pub strong: Option<String>,
    pub em: Option<String>,
    pub del: Option<String>,
    pub fence: Option<String>,
    pub inline_code: Option<String>,
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub platform: Platform,
    pub max_input_bytes: usize,
    pub allow_font_scaling: bool,
    pub small_standalone_emoji: bool,
    pub paragraph_text_class_name: Option<String>,
    /// Folder of extra `.sublime-syntax` definitions for code fences.
    pub syntaxes_path: Option<PathBuf>,
    pub style_override: StyleOverride,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            allow_font_scaling: true,
            small_standalone_emoji: false,
            paragraph_text_class_name: None,
            syntaxes_path: None,
            style_override: StyleOverride::default(),
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

        // Expand shell variables and tilde in the syntaxes folder
        config.syntaxes_path = config
            .syntaxes_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/chatmark");
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
