//! Source templates for a freshly scaffolded plugin module.
//!
//! Every template is embedded at compile time and contains the
//! [`PLACEHOLDER`] token wherever the module name belongs. Rendering is a
//! plain textual substitution: no escaping and no identifier sanitization.

use crate::name::ModuleName;
use strum_macros::{Display, EnumIter};

/// Token replaced by the module name in every template.
pub const PLACEHOLDER: &str = "{{module_name}}";

/// The files generated inside a module directory, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum FileKind {
    BuildDescriptor,
    ProcessorHeader,
    ProcessorSource,
    EditorHeader,
    EditorSource,
}

impl FileKind {
    /// File name relative to the module directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::BuildDescriptor => "CMakeLists.txt",
            Self::ProcessorHeader => "PluginProcessor.h",
            Self::ProcessorSource => "PluginProcessor.cpp",
            Self::EditorHeader => "PluginEditor.h",
            Self::EditorSource => "PluginEditor.cpp",
        }
    }

    const fn template(self) -> &'static str {
        match self {
            Self::BuildDescriptor => include_str!("../templates/plugin/CMakeLists.txt.tmpl"),
            Self::ProcessorHeader => include_str!("../templates/plugin/PluginProcessor.h.tmpl"),
            Self::ProcessorSource => include_str!("../templates/plugin/PluginProcessor.cpp.tmpl"),
            Self::EditorHeader => include_str!("../templates/plugin/PluginEditor.h.tmpl"),
            Self::EditorSource => include_str!("../templates/plugin/PluginEditor.cpp.tmpl"),
        }
    }
}

/// Renders the content of `kind` for the module `name`.
#[must_use]
pub fn render(name: &ModuleName, kind: FileKind) -> String {
    kind.template().replace(PLACEHOLDER, name.as_str())
}
