//! Configuration for pythonjs.
//!
//! Loads config from:
//! 1. Global: ~/.config/pythonjs/config.toml
//! 2. Per-project: .pythonjs/config.toml (overrides global)
//! 3. An explicit `--config` file, then command-line flags
//!
//! Example config.toml:
//! ```toml
//! [translate]
//! indent_width = 4
//!
//! [input]
//! language = "json"
//! ```

use anyhow::Context;
use pythonjs_codegen::TranslateOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Output formatting.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TranslateConfig {
    /// Spaces per indentation level.
    pub indent_width: Option<usize>,
}

/// Input handling.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Reader for stdin and for files with an unknown extension.
    pub language: Option<String>,
}

/// Root configuration structure.
///
/// Fields are optional so a layer only overrides what it sets.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PythonjsConfig {
    pub translate: TranslateConfig,
    pub input: InputConfig,
}

impl PythonjsConfig {
    pub const DEFAULT_LANGUAGE: &'static str = "python";

    /// Load configuration for a project: global config, then the project's
    /// `.pythonjs/config.toml`.
    pub fn load(root: &Path) -> Self {
        Self::load_layers(Self::global_config_path().as_deref(), root)
    }

    fn load_layers(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".pythonjs").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("pythonjs").join("config.toml"))
    }

    /// Load an implicit config layer. Missing or malformed files are skipped.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                None
            }
        }
    }

    /// Load a config file named on the command line. Errors are reported.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Merge another config into this one. Values set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            translate: TranslateConfig {
                indent_width: other.translate.indent_width.or(self.translate.indent_width),
            },
            input: InputConfig {
                language: other.input.language.or(self.input.language),
            },
        }
    }

    pub fn translate_options(&self) -> TranslateOptions {
        let mut options = TranslateOptions::default();
        if let Some(width) = self.translate.indent_width {
            options.indent_width = width;
        }
        options
    }

    pub fn language(&self) -> &str {
        self.input
            .language
            .as_deref()
            .unwrap_or(Self::DEFAULT_LANGUAGE)
    }
}
