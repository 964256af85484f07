#![allow(dead_code)]

use plugkit_scaffold::{OperationController, ProjectLayout, RegistryKind, ScaffoldConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) const AGGREGATE_MANIFEST: &str = "cmake_minimum_required(VERSION 3.22)\n\
project(PluginWorkbench VERSION 0.0.1)\n\
add_subdirectory(JUCE)\n\
add_subdirectory(Host)\n";

pub(crate) const INCLUDE_LIST: &str = "#pragma once\n";

pub(crate) const FACTORY_LIST: &str = "// instance factories\n";

pub(crate) const LINK_LIST: &str = "target_link_libraries(Host\n\tPRIVATE\n)";

/// A throwaway host project with the default registry layout.
pub(crate) struct HostProject {
    dir: TempDir,
}

impl HostProject {
    pub(crate) fn new() -> Self {
        Self::with_link_list(LINK_LIST)
    }

    pub(crate) fn with_link_list(link_list: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = dir.path();
        fs::create_dir(root.join("Host")).expect("host dir");
        fs::write(root.join("CMakeLists.txt"), AGGREGATE_MANIFEST).expect("manifest");
        fs::write(root.join("Host/PluginInstanceIncludedHeader.inl"), INCLUDE_LIST)
            .expect("include list");
        fs::write(root.join("Host/PluginInstanceFactoryCreation.inl"), FACTORY_LIST)
            .expect("factory list");
        fs::write(root.join("Host/CMakeLinkLibraries.cmake"), link_list).expect("link list");
        Self { dir }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub(crate) fn controller(&self) -> OperationController {
        self.controller_with(ScaffoldConfig::default())
    }

    pub(crate) fn controller_with(&self, config: ScaffoldConfig) -> OperationController {
        OperationController::new(ProjectLayout::open(self.root(), config).expect("layout"))
    }

    pub(crate) fn registry_path(&self, kind: RegistryKind) -> PathBuf {
        let paths = ScaffoldConfig::default().registries;
        let relative = match kind {
            RegistryKind::AggregateManifest => paths.aggregate_manifest,
            RegistryKind::IncludeList => paths.include_list,
            RegistryKind::FactoryList => paths.factory_list,
            RegistryKind::LinkList => paths.link_list,
        };
        self.root().join(relative)
    }

    pub(crate) fn registry(&self, kind: RegistryKind) -> String {
        fs::read_to_string(self.registry_path(kind)).expect("registry readable")
    }

    /// Contents of all four registries, in delete order.
    pub(crate) fn snapshot(&self) -> Vec<String> {
        RegistryKind::DELETE_ORDER.iter().map(|&kind| self.registry(kind)).collect()
    }

    pub(crate) fn lines_containing(&self, kind: RegistryKind, needle: &str) -> usize {
        self.registry(kind).lines().filter(|l| l.contains(needle)).count()
    }
}
