//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/threadtrim/threadtrim.toml`
//! 3. Local config: `<dir>/.threadtrim.toml`
//! 4. Environment variables: `THREADTRIM_*` prefix
//!
//! Command line flags override all of the above and are applied by the CLI.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

const APP_NAME: &str = "threadtrim";
const ENV_PREFIX: &str = "THREADTRIM";

/// Unified configuration for threadtrim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Deepest comment level that may be selected (root is 0)
    pub depth_limit: usize,
    /// Thread file used when no file is given on the command line
    pub dataset: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            depth_limit: 2,
            dataset: PathBuf::from("comments.json"),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub depth_limit: Option<usize>,
    pub dataset: Option<PathBuf>,
}

/// Get the XDG config directory for threadtrim.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(format!("{}.toml", APP_NAME)))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(format!(".{}.toml", APP_NAME))
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
    /// Expand `~`, `$VAR` and `${VAR}` in the dataset path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.dataset.to_string_lossy().as_ref());
        self.dataset = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            depth_limit: overlay.depth_limit.unwrap_or(self.depth_limit),
            dataset: overlay
                .dataset
                .clone()
                .unwrap_or_else(|| self.dataset.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.threadtrim.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = current.apply_env_overrides(None)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply `THREADTRIM_*` variables as explicit overrides.
    ///
    /// `source` replaces the process environment when given.
    pub fn apply_env_overrides(
        mut self,
        source: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").source(source))
            .build()
            .map_err(config_err)?;

        match config.get_int("depth_limit") {
            Ok(val) => {
                self.depth_limit = usize::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("depth_limit must be non-negative, got {}", val),
                })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }
        if let Ok(val) = config.get_string("dataset") {
            self.dataset = PathBuf::from(val);
        }

        Ok(self)
    }

    /// Serialize the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }

    /// Commented template for `config init`.
    pub fn template() -> String {
        let defaults = Self::default();
        format!(
            r#"# threadtrim configuration
#
# Deepest comment level that may be selected (root is 0)
depth_limit = {}

# Thread file used when none is given on the command line
dataset = "{}"
"#,
            defaults.depth_limit,
            defaults.dataset.display()
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
