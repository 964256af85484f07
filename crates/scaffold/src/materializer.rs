//! Filesystem side of scaffolding: module directories and generated files.
//!
//! Nothing here ever overwrites an existing path. Collisions are reported as
//! [`Materialized::AlreadyExists`]; every other I/O problem is an error.

use crate::config::DirectoryMatch;
use crate::error::{ScaffoldError, ScaffoldErrorExt};
use crate::name::ModuleName;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of a no-overwrite creation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone)]
pub struct Materializer {
    root: PathBuf,
    vcs_marker: String,
    directory_match: DirectoryMatch,
}

impl Materializer {
    pub fn new(
        root: impl Into<PathBuf>,
        vcs_marker: impl Into<String>,
        directory_match: DirectoryMatch,
    ) -> Self {
        Self { root: root.into(), vcs_marker: vcs_marker.into(), directory_match }
    }

    /// Path of the directory a module named `name` is created in.
    #[must_use]
    pub fn module_dir(&self, name: &ModuleName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// `<root>/<name>`, provided `name` is a single plain path component.
    ///
    /// Absolute names, `..` and names with separators would resolve outside the
    /// project's top level and yield `None`.
    #[must_use]
    pub fn confined_module_dir(&self, name: &ModuleName) -> Option<PathBuf> {
        let mut components = Path::new(name.as_str()).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.module_dir(name)),
            _ => None,
        }
    }

    /// Creates `<root>/<name>`, refusing if anything already exists at that path.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::InvalidName`] if `name` does not denote a
    /// top-level entry of the root, and [`ScaffoldError::Io`] on other failures.
    pub fn create_module_directory(&self, name: &ModuleName) -> Result<Materialized, ScaffoldError> {
        let Some(dir) = self.confined_module_dir(name) else {
            return Err(ScaffoldError::InvalidName {
                message: "module name must be a single directory name".into(),
                context: Some(name.to_string().into()),
            });
        };
        match fs::create_dir(&dir) {
            Ok(()) => {
                info!(module = %name, path = %dir.display(), "Module directory created");
                Ok(Materialized::Created)
            },
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!(module = %name, path = %dir.display(), "Module directory already exists");
                Ok(Materialized::AlreadyExists)
            },
            Err(e) => Err(e).context(format!("Failed to create directory: {}", dir.display())),
        }
    }

    /// Writes `content` to `path` unless the path already exists.
    ///
    /// Existence check and creation are a single `create_new` open, so a file
    /// appearing concurrently is never clobbered.
    pub fn write_new_file(&self, path: &Path, content: &str) -> Result<Materialized, ScaffoldError> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!(path = %path.display(), "File already exists");
                return Ok(Materialized::AlreadyExists);
            },
            Err(e) => {
                return Err(e).context(format!("Failed to create file: {}", path.display()));
            },
        };

        file.write_all(content.as_bytes())
            .context(format!("Failed to write file: {}", path.display()))?;
        info!(path = %path.display(), "File created");
        Ok(Materialized::Created)
    }

    /// Finds the directory of module `name` among the root's children.
    ///
    /// Directories whose name contains the VCS marker are never returned.
    pub fn find_module_directory(&self, name: &ModuleName) -> Result<Option<PathBuf>, ScaffoldError> {
        match self.directory_match {
            DirectoryMatch::Exact => {
                let Some(dir) = self.confined_module_dir(name) else {
                    warn!(module = %name, "Module name does not denote a top-level directory");
                    return Ok(None);
                };
                let eligible = !self.is_vcs(name) && dir.is_dir();
                Ok(eligible.then_some(dir))
            },
            DirectoryMatch::Substring => {
                let mut candidates = Vec::new();
                let entries = fs::read_dir(&self.root)
                    .context(format!("Failed to list project root: {}", self.root.display()))?;
                for entry in entries {
                    let entry = entry.context("Failed to read project root entry")?;
                    if !entry.path().is_dir() {
                        continue;
                    }
                    let Some(dir_name) = entry.file_name().to_str().map(str::to_owned) else {
                        continue;
                    };
                    if self.is_vcs(&dir_name) || !dir_name.contains(name.as_str()) {
                        continue;
                    }
                    candidates.push(dir_name);
                }
                candidates.sort_unstable();
                Ok(candidates.into_iter().next().map(|d| self.root.join(d)))
            },
        }
    }

    /// Recursively removes the directory of module `name`.
    ///
    /// Returns the removed path, or `None` if no matching directory exists.
    pub fn delete_module_directory(
        &self,
        name: &ModuleName,
    ) -> Result<Option<PathBuf>, ScaffoldError> {
        let Some(dir) = self.find_module_directory(name)? else {
            warn!(module = %name, "No module directory found");
            return Ok(None);
        };

        fs::remove_dir_all(&dir).context(format!("Failed to remove directory: {}", dir.display()))?;
        info!(module = %name, path = %dir.display(), "Module directory removed");
        Ok(Some(dir))
    }

    pub(crate) fn is_vcs(&self, dir_name: &str) -> bool {
        !self.vcs_marker.is_empty() && dir_name.contains(self.vcs_marker.as_str())
    }
}

/// Undo log for a single create operation.
///
/// Records the directory and files the operation created. Unless
/// [`CreationRollback::commit`] is called, everything recorded is removed when
/// the guard is dropped, including on early returns and panics. A disabled
/// guard records nothing and never removes anything.
#[derive(Debug)]
pub struct CreationRollback {
    enabled: bool,
    dir: Option<PathBuf>,
    files: Vec<PathBuf>,
}

impl CreationRollback {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled, dir: None, files: Vec::new() }
    }

    pub fn record_dir(&mut self, dir: &Path) {
        if self.enabled {
            self.dir = Some(dir.to_path_buf());
        }
    }

    pub fn record_file(&mut self, file: &Path) {
        if self.enabled {
            self.files.push(file.to_path_buf());
        }
    }

    /// Keeps everything that was created.
    pub fn commit(mut self) {
        self.dir = None;
        self.files.clear();
    }

    /// Removes everything recorded so far and returns the removed paths.
    pub fn undo(&mut self) -> Vec<PathBuf> {
        let mut removed = Vec::new();

        for file in self.files.drain(..).rev() {
            match fs::remove_file(&file) {
                Ok(()) => removed.push(file),
                Err(e) => warn!(path = %file.display(), error = %e, "Rollback failed to remove file"),
            }
        }

        if let Some(dir) = self.dir.take() {
            // Only the empty directory we created; foreign content stays.
            match fs::remove_dir(&dir) {
                Ok(()) => removed.push(dir),
                Err(e) => warn!(path = %dir.display(), error = %e, "Rollback kept directory"),
            }
        }

        if !removed.is_empty() {
            debug!(count = removed.len(), "Rolled back created paths");
        }
        removed
    }
}

impl Drop for CreationRollback {
    fn drop(&mut self) {
        if self.dir.is_some() || !self.files.is_empty() {
            self.undo();
        }
    }
}
