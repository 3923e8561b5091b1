//! Configuration module for multipick
//!
//! Holds the per-widget configuration record: which optional surfaces are
//! rendered (pills, counter, toolbar), the remote search endpoint, cosmetic
//! settings and label overrides.
//!
//! Configuration is read from `~/.config/multipick/config.toml` (or any TOML
//! file) with `MULTIPICK_*` environment variables layered on top.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Color theme choice
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Light palette
    Light,
    /// Dark palette
    #[default]
    Dark,
}

/// User-facing label overrides
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Strings {
    /// Label of the "select all" toolbar control
    pub all: String,
    /// Label of the "select none" toolbar control
    pub none: String,
    /// Shown in the search field when nothing is selected
    pub placeholder: String,
    /// Prompt of the search field while the dropdown is open
    pub search: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            all: "Select all".to_string(),
            none: "Select none".to_string(),
            placeholder: "Select...".to_string(),
            search: "Search...".to_string(),
        }
    }
}

/// Widget configuration record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetConfig {
    /// Render selected items as a separate pill list
    pub multi_tags: bool,

    /// Render a live selection counter
    pub multi_counter: bool,

    /// Render "select all" / "select none" controls
    pub toolbar: bool,

    /// Remote search endpoint; absent disables remote mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ajax_url: Option<String>,

    /// Color theme (cosmetic)
    pub theme: ThemeChoice,

    /// Height of one option row, in renderer units
    pub item_height: u32,

    /// Timeout for one remote request
    pub request_timeout_secs: u64,

    /// Cosmetic class name overrides, passed through to renderers
    pub class_names: BTreeMap<String, String>,

    /// Label overrides
    pub strings: Strings,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            multi_tags: false,
            multi_counter: false,
            toolbar: false,
            ajax_url: None,
            theme: ThemeChoice::default(),
            item_height: 1,
            request_timeout_secs: 10,
            class_names: BTreeMap::new(),
            strings: Strings::default(),
        }
    }
}

impl WidgetConfig {
    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("multipick").join("config.toml"))
    }

    /// Load configuration from the default path
    ///
    /// A missing file yields the defaults (plus environment overrides).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory is unknown or the file
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a TOML file with environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed, or a
    /// value has the wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("MULTIPICK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = self.to_toml()?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Whether remote search is configured
    #[must_use]
    pub fn remote_enabled(&self) -> bool {
        self.ajax_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    /// Enable or disable the pill list
    #[must_use]
    pub const fn with_multi_tags(mut self, enabled: bool) -> Self {
        self.multi_tags = enabled;
        self
    }

    /// Enable or disable the counter
    #[must_use]
    pub const fn with_multi_counter(mut self, enabled: bool) -> Self {
        self.multi_counter = enabled;
        self
    }

    /// Enable or disable the toolbar
    #[must_use]
    pub const fn with_toolbar(mut self, enabled: bool) -> Self {
        self.toolbar = enabled;
        self
    }

    /// Set the remote search endpoint
    #[must_use]
    pub fn with_ajax_url(mut self, url: impl Into<String>) -> Self {
        self.ajax_url = Some(url.into());
        self
    }

    /// Set the theme
    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeChoice) -> Self {
        self.theme = theme;
        self
    }

    /// Set the row height used for scroll offsets
    #[must_use]
    pub const fn with_item_height(mut self, height: u32) -> Self {
        self.item_height = height;
        self
    }

    /// Replace the label overrides
    #[must_use]
    pub fn with_strings(mut self, strings: Strings) -> Self {
        self.strings = strings;
        self
    }
}
