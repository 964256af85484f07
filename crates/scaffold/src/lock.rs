use crate::error::{ScaffoldError, ScaffoldErrorExt};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Exclusive advisory lock on a project root.
///
/// Registry files are edited by rewriting them whole, so two operations on the
/// same project must never overlap. The lock is held until the guard is dropped.
/// The lock file itself is left in place.
#[derive(Debug)]
pub struct ProjectLock {
    file: File,
    path: PathBuf,
}

impl ProjectLock {
    /// Takes the lock without waiting.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::Locked`] if another process (or another handle in
    /// this process) holds the lock, and [`ScaffoldError::Io`] if the lock file
    /// cannot be opened.
    pub fn acquire(root: &Path, file_name: &str) -> Result<Self, ScaffoldError> {
        let path = root.join(file_name);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .context(format!("Failed to open lock file: {}", path.display()))?;

        if let Err(e) = file.try_lock_exclusive() {
            warn!(path = %path.display(), error = %e, "Project lock is held elsewhere");
            return Err(ScaffoldError::Locked {
                message: format!("another plugkit operation is running ({e})").into(),
                context: Some(path.display().to_string().into()),
            });
        }

        debug!(path = %path.display(), "Project lock acquired");
        Ok(Self { file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(path = %self.path.display(), error = %e, "Failed to release project lock");
        }
    }
}
