//! # Scaffold
//!
//! Creates and retires plugin modules inside a multi-plugin host project and
//! keeps the host's four registry files consistent with the set of modules.
//!
//! * **Template rendering** ([`render`]): five source files per module, with the
//!   module name substituted verbatim.
//! * **Materializing** ([`Materializer`]): directory and file creation that never
//!   overwrites, plus directory removal on delete.
//! * **Registry sync** ([`RegistrySet`]): one line per module in the aggregate
//!   build manifest, the include list, the factory list and the link list.
//! * **Orchestration** ([`OperationController`]): create and delete flows under
//!   an exclusive project lock, reported as an [`OperationOutcome`].
//!
//! ## Example
//!
//! ```rust
//! use plugkit_scaffold::{Completion, ModuleName, OperationController, ProjectLayout, ScaffoldConfig};
//! # use std::fs;
//! # let tmp = tempfile::tempdir().unwrap();
//! # let root = tmp.path();
//! # fs::create_dir(root.join("Host")).unwrap();
//! # fs::write(root.join("CMakeLists.txt"), "project(Host)\n").unwrap();
//! # fs::write(root.join("Host/PluginInstanceIncludedHeader.inl"), "").unwrap();
//! # fs::write(root.join("Host/PluginInstanceFactoryCreation.inl"), "").unwrap();
//! # fs::write(root.join("Host/CMakeLinkLibraries.cmake"), "set(PLUGINS\n)\n").unwrap();
//!
//! let layout = ProjectLayout::open(root, ScaffoldConfig::default())?;
//! let controller = OperationController::new(layout);
//!
//! let name = ModuleName::new("Delay")?;
//! let created = controller.create(&name)?;
//! assert_eq!(created.completion(), Completion::Success);
//!
//! let deleted = controller.delete(&name)?;
//! assert_eq!(deleted.completion(), Completion::Success);
//! # Ok::<(), plugkit_scaffold::ScaffoldError>(())
//! ```
//!
//! ## Limitations
//!
//! There is no transactional guarantee. If an operation is interrupted or hits
//! an I/O error part-way, the project keeps whatever the completed steps did.

mod config;
mod controller;
mod error;
mod layout;
mod lock;
mod materializer;
mod name;
mod outcome;
mod registry;
mod template;

pub use crate::config::{
    CONFIG_FILE_NAME, DirectoryMatch, ENV_PREFIX, EntryStyle, RegistryPaths, ScaffoldConfig,
    load_config,
};
pub use crate::controller::{ModuleListing, OperationController};
pub use crate::error::{ScaffoldError, ScaffoldErrorExt};
pub use crate::layout::ProjectLayout;
pub use crate::lock::ProjectLock;
pub use crate::materializer::{CreationRollback, Materialized, Materializer};
pub use crate::name::ModuleName;
pub use crate::outcome::{
    Completion, Operation, OperationOutcome, OperationState, StepReport, StepStatus,
};
pub use crate::registry::{Registry, RegistryKind, RegistrySet, TAG_PREFIX};
pub use crate::template::{FileKind, PLACEHOLDER, render};
