use crate::error::{ScaffoldError, ScaffoldErrorExt};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the optional configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "plugkit.toml";

/// Prefix of environment variable overrides (e.g. `PLUGKIT__ENTRY_STYLE=tagged`).
pub const ENV_PREFIX: &str = "PLUGKIT";

/// Project-level scaffolding configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub registries: RegistryPaths,
    pub entry_style: EntryStyle,
    pub directory_match: DirectoryMatch,
    pub rollback_on_failure: bool,
    pub vcs_marker: String,
    pub lock_file: String,
}

/// Locations of the four registry files, relative to the project root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryPaths {
    pub aggregate_manifest: PathBuf,
    pub include_list: PathBuf,
    pub factory_list: PathBuf,
    pub link_list: PathBuf,
}

/// How registry lines belonging to a module are written and recognised.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryStyle {
    /// Plain lines; removal drops every line containing the module name.
    #[default]
    Keyword,
    /// Lines carry a trailing `plugkit:<name>` comment; removal matches the tag exactly.
    Tagged,
}

/// How `delete` finds the module directory among the project root's children.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryMatch {
    /// The directory must be named exactly like the module.
    #[default]
    Exact,
    /// First directory (in name order) whose name contains the module name.
    Substring,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            registries: RegistryPaths::default(),
            entry_style: EntryStyle::default(),
            directory_match: DirectoryMatch::default(),
            rollback_on_failure: false,
            vcs_marker: ".git".to_owned(),
            lock_file: ".plugkit.lock".to_owned(),
        }
    }
}

impl Default for RegistryPaths {
    fn default() -> Self {
        Self {
            aggregate_manifest: PathBuf::from("CMakeLists.txt"),
            include_list: PathBuf::from("Host/PluginInstanceIncludedHeader.inl"),
            factory_list: PathBuf::from("Host/PluginInstanceFactoryCreation.inl"),
            link_list: PathBuf::from("Host/CMakeLinkLibraries.cmake"),
        }
    }
}

/// Loads the configuration for the project at `root`.
///
/// Layers, lowest priority first:
/// 1. Built-in defaults.
/// 2. `path` if given (must exist), otherwise `<root>/plugkit.toml` if present.
/// 3. Environment variables prefixed with `PLUGKIT__`, nested keys separated by
///    double underscores (`PLUGKIT__REGISTRIES__LINK_LIST` maps to
///    `registries.link_list`).
///
/// # Errors
/// Returns [`ScaffoldError::Config`] if an explicit file is missing, a file is
/// not valid TOML, or a value does not fit the expected type.
pub fn load_config(root: &Path, path: Option<&Path>) -> Result<ScaffoldConfig, ScaffoldError> {
    let (file, required) = path.map_or_else(
        || (root.join(CONFIG_FILE_NAME), false),
        |p| (p.to_path_buf(), true),
    );

    if file.exists() {
        info!(path = %file.display(), "Loading scaffold config");
    } else {
        debug!(path = %file.display(), "No scaffold config file, using defaults");
    }

    Config::builder()
        .add_source(File::from(file.as_path()).format(FileFormat::Toml).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__"))
        .build()
        .context("Failed to build config")?
        .try_deserialize::<ScaffoldConfig>()
        .context("Failed to deserialize config")
}
