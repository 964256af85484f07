use crate::config::{ScaffoldConfig, load_config};
use crate::error::{ScaffoldError, ScaffoldErrorExt};
use crate::materializer::Materializer;
use crate::registry::RegistrySet;
use std::path::{Path, PathBuf};

/// A host project on disk: its root, configuration and registry files.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    config: ScaffoldConfig,
    registries: RegistrySet,
}

impl ProjectLayout {
    /// Opens the project at `root` with an explicit configuration.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::Io`] if `root` cannot be resolved.
    pub fn open(root: impl AsRef<Path>, config: ScaffoldConfig) -> Result<Self, ScaffoldError> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .context(format!("Failed to resolve project root: {}", root.display()))?;
        let registries = RegistrySet::resolve(&root, &config.registries);
        Ok(Self { root, config, registries })
    }

    /// Opens the project at `root`, loading `plugkit.toml` (or `config_path`)
    /// and `PLUGKIT__*` environment overrides.
    pub fn load(
        root: impl AsRef<Path>,
        config_path: Option<&Path>,
    ) -> Result<Self, ScaffoldError> {
        let config = load_config(root.as_ref(), config_path)?;
        Self::open(root, config)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    #[must_use]
    pub const fn registries(&self) -> &RegistrySet {
        &self.registries
    }

    #[must_use]
    pub fn materializer(&self) -> Materializer {
        Materializer::new(&self.root, &self.config.vcs_marker, self.config.directory_match)
    }
}
