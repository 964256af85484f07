//! Create and delete flows for a single module.
//!
//! Create: validate registries, create the module directory, write the five
//! generated files (each attempted even after a collision), then append to the
//! registries only if nothing collided. Delete: scrub all registries, then
//! remove the module directory. Any I/O error stops the flow immediately; steps
//! already applied stay applied.

use crate::error::ScaffoldError;
use crate::layout::ProjectLayout;
use crate::lock::ProjectLock;
use crate::materializer::{CreationRollback, Materialized};
use crate::name::ModuleName;
use crate::outcome::{Operation, OperationOutcome, OperationState, StepStatus};
use crate::registry::RegistryKind;
use crate::template::{FileKind, render};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

/// A module directory found in the project root, with its registration status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleListing {
    pub name: ModuleName,
    pub path: PathBuf,
    pub registered_in: Vec<RegistryKind>,
}

impl ModuleListing {
    #[must_use]
    pub fn is_fully_registered(&self) -> bool {
        self.registered_in.len() == RegistryKind::iter().count()
    }
}

#[derive(Debug, Clone)]
pub struct OperationController {
    layout: ProjectLayout,
}

impl OperationController {
    #[must_use]
    pub const fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    #[must_use]
    pub const fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Scaffolds module `name` and registers it.
    ///
    /// Collisions are not errors: they are reported in the outcome, every
    /// remaining file is still attempted, and no registry is touched. With
    /// `rollback_on_failure` the files and directory created by this call are
    /// removed again in that case.
    ///
    /// # Errors
    /// Fails before any side effect if the project is locked or a registry is
    /// missing or malformed; fails mid-way on any I/O error.
    #[instrument(skip_all, fields(module = %name))]
    pub fn create(&self, name: &ModuleName) -> Result<OperationOutcome, ScaffoldError> {
        let _lock = self.lock()?;
        let registries = self.layout.registries();
        registries.validate()?;

        let config = self.layout.config();
        let materializer = self.layout.materializer();
        let mut outcome = OperationOutcome::new(Operation::Create, name.clone());
        let mut rollback = CreationRollback::new(config.rollback_on_failure);

        let dir = materializer.module_dir(name);
        let created = materializer.create_module_directory(name)?;
        if created == Materialized::Created {
            rollback.record_dir(&dir);
        }
        let mut state = OperationState::Proceed.observe(created);
        outcome.record(created.into(), &dir);

        let occupied = created == Materialized::AlreadyExists && !dir.is_dir();
        if occupied {
            warn!(path = %dir.display(), "Module path is not a directory, files not written");
        }

        for kind in FileKind::iter() {
            let path = dir.join(kind.file_name());
            if occupied {
                outcome.record(StepStatus::Skipped, &path);
                continue;
            }
            let written = materializer.write_new_file(&path, &render(name, kind))?;
            if written == Materialized::Created {
                rollback.record_file(&path);
            }
            state = state.observe(written);
            outcome.record(written.into(), &path);
        }

        if !state.is_proceed() {
            warn!("Module already exists, registries left untouched");
            for path in rollback.undo() {
                outcome.record(StepStatus::RolledBack, &path);
            }
            for kind in RegistryKind::CREATE_ORDER {
                outcome.record(StepStatus::Skipped, registries.get(kind).path());
            }
            outcome.set_state(state);
            return Ok(outcome);
        }
        rollback.commit();

        for kind in RegistryKind::CREATE_ORDER {
            let registry = registries.get(kind);
            registry.append_entry(name, config.entry_style)?;
            outcome.record(StepStatus::Updated, registry.path());
        }

        info!("Module created");
        Ok(outcome)
    }

    /// Removes module `name` from every registry and deletes its directory.
    ///
    /// The registries are scrubbed even if no directory matches; the missing
    /// directory is reported as [`StepStatus::NotFound`].
    ///
    /// # Errors
    /// Fails before any side effect if the project is locked or a registry is
    /// missing or malformed; stops at the first I/O error.
    #[instrument(skip_all, fields(module = %name))]
    pub fn delete(&self, name: &ModuleName) -> Result<OperationOutcome, ScaffoldError> {
        let _lock = self.lock()?;
        let registries = self.layout.registries();
        registries.validate()?;

        let style = self.layout.config().entry_style;
        let mut outcome = OperationOutcome::new(Operation::Delete, name.clone());

        for kind in RegistryKind::DELETE_ORDER {
            let registry = registries.get(kind);
            let removed = registry.remove_entries(name, style)?;
            if removed == 0 {
                outcome.record(StepStatus::Unchanged, registry.path());
            } else {
                let detail = format!("{removed} line{}", if removed == 1 { "" } else { "s" });
                outcome.record_with(StepStatus::Removed, registry.path(), detail);
            }
        }

        let materializer = self.layout.materializer();
        match materializer.delete_module_directory(name)? {
            Some(dir) => outcome.record(StepStatus::Removed, &dir),
            None => outcome.record(StepStatus::NotFound, &materializer.module_dir(name)),
        }

        info!(completion = %outcome.completion(), "Module deleted");
        Ok(outcome)
    }

    /// Lists generated module directories and the registries mentioning each.
    ///
    /// # Errors
    /// Fails if the project is locked or the root or a registry is unreadable.
    pub fn list(&self) -> Result<Vec<ModuleListing>, ScaffoldError> {
        let _lock = self.lock()?;
        let config = self.layout.config();
        let materializer = self.layout.materializer();
        let mut listings = Vec::new();

        let entries = fs::read_dir(self.layout.root())?;
        for entry in entries {
            let path = entry?.path();
            let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if materializer.is_vcs(dir_name) || !path.is_dir() {
                continue;
            }
            let Ok(name) = ModuleName::new(dir_name) else {
                continue;
            };
            if !is_generated_module(&path, &name) {
                continue;
            }

            let mut registered_in = Vec::new();
            for kind in RegistryKind::CREATE_ORDER {
                if self.layout.registries().get(kind).mentions(&name, config.entry_style)? {
                    registered_in.push(kind);
                }
            }
            listings.push(ModuleListing { name, path, registered_in });
        }

        listings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listings)
    }

    fn lock(&self) -> Result<ProjectLock, ScaffoldError> {
        ProjectLock::acquire(self.layout.root(), &self.layout.config().lock_file)
    }
}

fn is_generated_module(dir: &Path, name: &ModuleName) -> bool {
    let descriptor = dir.join(FileKind::BuildDescriptor.file_name());
    let rendered = render(name, FileKind::BuildDescriptor);
    let Some(signature) = rendered.lines().next() else {
        return false;
    };
    fs::read_to_string(descriptor).is_ok_and(|text| text.starts_with(signature))
}
