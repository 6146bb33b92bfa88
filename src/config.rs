//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dashlayout/dashlayout.toml`
//! 3. Local config: `<project_dir>/.dashlayout.toml`
//! 4. Environment variables: `DASHLAYOUT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub layout_file: Option<PathBuf>,
    pub pretty: Option<bool>,
    pub backup: Option<bool>,
    pub show_end_markers: Option<bool>,
}

/// Unified configuration for dashlayout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Dashboard document used when no `--file` is given
    pub layout_file: PathBuf,
    /// Pretty-print JSON on save
    pub pretty: bool,
    /// Keep `<file>.bak` of the previous document on save
    pub backup: bool,
    /// Show section end slots in `tree` output
    pub show_end_markers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout_file: PathBuf::from("dashboard.json"),
            pretty: true,
            backup: false,
            show_end_markers: false,
        }
    }
}

/// Get the XDG config directory for dashlayout.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dashlayout").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dashlayout.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".dashlayout.toml")
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
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            layout_file: overlay
                .layout_file
                .clone()
                .unwrap_or_else(|| self.layout_file.clone()),
            pretty: overlay.pretty.unwrap_or(self.pretty),
            backup: overlay.backup.unwrap_or(self.backup),
            show_end_markers: overlay.show_end_markers.unwrap_or(self.show_end_markers),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    ///
    /// Unresolvable variables leave the path as written.
    fn expand_paths(&mut self) {
        let raw = self.layout_file.to_string_lossy().to_string();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.layout_file = PathBuf::from(expanded.as_ref());
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply DASHLAYOUT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("DASHLAYOUT").prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("layout_file") {
            settings.layout_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
        }
        if let Ok(val) = config.get_bool("backup") {
            settings.backup = val;
        }
        if let Ok(val) = config.get_bool("show_end_markers") {
            settings.show_end_markers = val;
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
        r#"# dashlayout configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dashlayout/dashlayout.toml
#   Local:  <project_dir>/.dashlayout.toml
#   Env:    DASHLAYOUT_* environment variables

# Dashboard document used when --file is omitted
# layout_file = "dashboard.json"

# Pretty-print JSON when saving
# pretty = true

# Keep <file>.bak of the previous document when saving
# backup = false

# Show section end slots in `dashlayout tree`
# show_end_markers = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overlay_values_when_merging_then_keeps_base() {
        let base = Settings::default();
        assert_eq!(base.merge_with(&RawSettings::default()), base);
    }

    #[test]
    fn given_overlay_values_when_merging_then_overlay_wins() {
        let overlay = RawSettings {
            layout_file: Some(PathBuf::from("board.json")),
            backup: Some(true),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.layout_file, PathBuf::from("board.json"));
        assert!(merged.backup);
        assert!(merged.pretty);
    }

    #[test]
    fn given_tilde_in_layout_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            layout_file: PathBuf::from("~/boards/main.json"),
            ..Default::default()
        };
        settings.expand_paths();
        assert!(!settings.layout_file.to_string_lossy().starts_with('~'));
        assert!(settings.layout_file.ends_with("boards/main.json"));
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.layout_file.is_none());
    }

    #[test]
    fn given_settings_when_serializing_then_round_trips() {
        let settings = Settings::default();
        let back: Settings = toml::from_str(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(back, settings);
    }
}
