//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeforge/treeforge.toml`
//!    (or an explicit file passed with `--config`)
//! 3. Environment variables: `TREEFORGE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::LayoutOptions;

/// Unified configuration for treeforge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// JSON file holding all named trees
    pub store_path: PathBuf,
    /// Fan-out bound for `insert` when none is given (0 = unbounded)
    pub default_max_children: usize,
    /// Spacing and margins for layout and SVG output
    pub layout: LayoutOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_max_children: 0,
            layout: LayoutOptions::default(),
        }
    }
}

/// Raw layout settings for intermediate parsing (None = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutSettings {
    pub x_spacing: Option<f64>,
    pub y_spacing: Option<f64>,
    pub top_margin: Option<f64>,
    pub left_margin: Option<f64>,
    pub right_padding: Option<f64>,
    pub bottom_padding: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub store_path: Option<PathBuf>,
    pub default_max_children: Option<usize>,
    pub layout: RawLayoutSettings,
}

/// Default store location (`$XDG_DATA_HOME/treeforge/trees.json`).
fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "treeforge")
        .map(|dirs| dirs.data_dir().join("trees.json"))
        .unwrap_or_else(|| PathBuf::from("trees.json"))
}

/// Get the XDG config directory for treeforge.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeforge").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeforge.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let l = &overlay.layout;
        Self {
            store_path: overlay
                .store_path
                .clone()
                .unwrap_or_else(|| self.store_path.clone()),
            default_max_children: overlay
                .default_max_children
                .unwrap_or(self.default_max_children),
            layout: LayoutOptions {
                x_spacing: l.x_spacing.unwrap_or(self.layout.x_spacing),
                y_spacing: l.y_spacing.unwrap_or(self.layout.y_spacing),
                top_margin: l.top_margin.unwrap_or(self.layout.top_margin),
                left_margin: l.left_margin.unwrap_or(self.layout.left_margin),
                right_padding: l.right_padding.unwrap_or(self.layout.right_padding),
                bottom_padding: l.bottom_padding.unwrap_or(self.layout.bottom_padding),
                ..self.layout
            },
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the store path.
    fn expand_paths(&mut self) {
        let raw = self.store_path.to_string_lossy().to_string();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.store_path = PathBuf::from(expanded.as_ref());
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; replaces the global config lookup
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let file = config_file
            .map(Path::to_path_buf)
            .or_else(global_config_path);
        if let Some(path) = file {
            if path.exists() {
                let raw = load_raw_settings(&path)?;
                current = current.merge_with(&raw);
            } else if config_file.is_some() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TREEFORGE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEFORGE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("store_path") {
            settings.store_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<usize>("default_max_children") {
            settings.default_max_children = val;
        }
        if let Ok(val) = config.get::<f64>("layout.x_spacing") {
            settings.layout.x_spacing = val;
        }
        if let Ok(val) = config.get::<f64>("layout.y_spacing") {
            settings.layout.y_spacing = val;
        }
        if let Ok(val) = config.get::<f64>("layout.top_margin") {
            settings.layout.top_margin = val;
        }
        if let Ok(val) = config.get::<f64>("layout.left_margin") {
            settings.layout.left_margin = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treeforge configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treeforge/treeforge.toml
#   Env:    TREEFORGE_* environment variables, e.g.
#           TREEFORGE_STORE_PATH, TREEFORGE_LAYOUT__X_SPACING

# JSON file holding all named trees
# store_path = "~/.local/share/treeforge/trees.json"

# Fan-out bound applied by `insert` when --max is not given (0 = unbounded)
# default_max_children = 0

[layout]
# x_spacing = 120.0
# y_spacing = 120.0
# top_margin = 60.0
# left_margin = 60.0
# right_padding = 60.0
# bottom_padding = 120.0
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
