//! Configuration paths and settings for quickstep.
//!
//! Settings live in a YAML file, `~/.quickstep/config.yml` unless another
//! path is given. Every key is optional and a missing file means defaults:
//!
//! ```yaml
//! repositories:
//!   - ~/src/quickstep
//!   - ~/src/website
//! shell: /bin/zsh
//! git_command_template: "git {command} {args}"
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use leon::Template;
use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the settings file
const DEFAULT_CONFIG_PATH: &str = "~/.quickstep/config.yml";

/// Default shell to use for terminal commands
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Default template for commands run in the terminal
pub const DEFAULT_GIT_COMMAND_TEMPLATE: &str = "git {command} {args}";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Repositories offered by the wizard. Empty means the repository
    /// containing the working directory.
    pub repositories: Vec<String>,
    /// Shell used to run terminal commands. Falls back to `$SHELL`.
    pub shell: Option<String>,
    /// Leon template with `{command}` and `{args}` keys.
    pub git_command_template: Option<String>,
}

impl Settings {
    /// Repository paths with `~` expanded.
    pub fn repository_paths(&self) -> Vec<PathBuf> {
        self.repositories
            .iter()
            .map(|r| PathBuf::from(shellexpand::tilde(r).to_string()))
            .collect()
    }

    pub fn shell(&self) -> String {
        self.shell
            .clone()
            .or_else(|| std::env::var("SHELL").ok())
            .unwrap_or_else(|| DEFAULT_SHELL.to_string())
    }

    pub fn git_command_template(&self) -> &str {
        self.git_command_template
            .as_deref()
            .unwrap_or(DEFAULT_GIT_COMMAND_TEMPLATE)
    }
}

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use quickstep_core::config::get_config_path;
///
/// let custom_path = get_config_path(Some("/path/to/config.yml"));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: Option<&str>) -> String {
    let config_path = config_path_arg.unwrap_or(DEFAULT_CONFIG_PATH);

    shellexpand::tilde(config_path).to_string()
}

/// Reads and validates the settings file.
///
/// # Errors
///
/// Returns an error if:
/// - The file exists but cannot be read
/// - The file contains invalid YAML or unknown value types
/// - The git command template cannot be parsed
pub fn load_settings(config_path: &str) -> Result<Settings> {
    if !Path::new(config_path).exists() {
        debug!("No settings file at `{config_path}`, using defaults");
        return Ok(Settings::default());
    }

    let reader = File::open(config_path)
        .map_err(|e| Error::io_error("config".to_string(), config_path.to_string(), e))?;

    // An empty file deserializes to `None` rather than to the default struct
    let settings: Option<Settings> = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })?;
    let settings = settings.unwrap_or_default();

    Template::parse(settings.git_command_template())?;

    Ok(settings)
}
