//! The four host-project files that must list every live module.
//!
//! Each registry is a plain line list. Creating a module appends one line per
//! registry; deleting it drops the module's lines again. In
//! [`EntryStyle::Keyword`] mode a line belongs to a module when it contains the
//! module name anywhere, so deleting `Delay` also drops `PingPongDelay`'s
//! lines. [`EntryStyle::Tagged`] mode marks every appended line with a trailing
//! `plugkit:<name>` comment and only drops lines carrying exactly that tag.

mod lines;

use crate::config::{EntryStyle, RegistryPaths};
use crate::error::ScaffoldError;
use crate::name::ModuleName;
use lines::LineBuffer;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter};
use tracing::{debug, info};

/// Marker prefix of the comment tag written in [`EntryStyle::Tagged`] mode.
pub const TAG_PREFIX: &str = "plugkit:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum RegistryKind {
    /// Top-level build file pulling in every module directory.
    AggregateManifest,
    /// Header include list compiled into the host.
    IncludeList,
    /// Factory list the host uses to instantiate every plugin.
    FactoryList,
    /// Link-library block of the host target; its last line closes the block.
    LinkList,
}

impl RegistryKind {
    /// Order in which registries are appended to when a module is created.
    pub const CREATE_ORDER: [Self; 4] =
        [Self::IncludeList, Self::FactoryList, Self::AggregateManifest, Self::LinkList];

    /// Order in which registries are scrubbed when a module is deleted.
    pub const DELETE_ORDER: [Self; 4] =
        [Self::AggregateManifest, Self::IncludeList, Self::FactoryList, Self::LinkList];

    /// The line registering `name`, without any tag.
    #[must_use]
    pub fn entry(self, name: &ModuleName) -> String {
        match self {
            Self::AggregateManifest => format!("add_subdirectory({name})"),
            Self::IncludeList => format!("#include \"{name}/PluginProcessor.h\""),
            Self::FactoryList => format!(
                "[] {{ return std::make_unique<PluginInstanceProxy> (std::make_unique<{name}AudioProcessor>()); }},"
            ),
            Self::LinkList => format!("\t{name}"),
        }
    }

    const fn comment(self) -> &'static str {
        match self {
            Self::AggregateManifest | Self::LinkList => "#",
            Self::IncludeList | Self::FactoryList => "//",
        }
    }

    fn tag(self, name: &ModuleName) -> String {
        format!("{} {TAG_PREFIX}{name}", self.comment())
    }

    fn line(self, name: &ModuleName, style: EntryStyle) -> String {
        match style {
            EntryStyle::Keyword => self.entry(name),
            EntryStyle::Tagged => format!("{} {}", self.entry(name), self.tag(name)),
        }
    }

    fn belongs_to(self, line: &str, name: &ModuleName, style: EntryStyle) -> bool {
        match style {
            EntryStyle::Keyword => line.contains(name.as_str()),
            EntryStyle::Tagged => line.ends_with(&self.tag(name)),
        }
    }
}

/// One registry file of the host project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    kind: RegistryKind,
    path: PathBuf,
}

impl Registry {
    #[must_use]
    pub fn new(kind: RegistryKind, path: impl Into<PathBuf>) -> Self {
        Self { kind, path: path.into() }
    }

    #[must_use]
    pub const fn kind(&self) -> RegistryKind {
        self.kind
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks that the file exists and, for the link list, that it has a closing line.
    ///
    /// # Errors
    /// Returns [`ScaffoldError::Io`] if the file cannot be read and
    /// [`ScaffoldError::MalformedRegistry`] if the link list is empty.
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        let buf = LineBuffer::read(&self.path)?;
        if self.kind == RegistryKind::LinkList && buf.last().is_none() {
            return Err(self.malformed("link list has no closing line"));
        }
        Ok(())
    }

    /// Registers `name` in this file.
    ///
    /// Every registry gets one line appended at the end, except the link list,
    /// where the line goes right before the closing line.
    pub fn append_entry(&self, name: &ModuleName, style: EntryStyle) -> Result<(), ScaffoldError> {
        let mut buf = LineBuffer::read(&self.path)?;
        let line = self.kind.line(name, style);

        if self.kind == RegistryKind::LinkList {
            if !buf.insert_before_last(&line) {
                return Err(self.malformed("link list has no closing line"));
            }
        } else {
            buf.push(&line);
        }

        buf.write(&self.path)?;
        info!(module = %name, registry = %self.kind, path = %self.path.display(), "Registry entry appended");
        Ok(())
    }

    /// Drops every line of this file that belongs to `name`.
    ///
    /// The closing line of the link list is never dropped. Returns the number of
    /// removed lines; the file is rewritten even when nothing matched.
    pub fn remove_entries(
        &self,
        name: &ModuleName,
        style: EntryStyle,
    ) -> Result<usize, ScaffoldError> {
        let mut buf = LineBuffer::read(&self.path)?;
        let kind = self.kind;
        let matches = |line: &str| kind.belongs_to(line, name, style);

        let removed = if kind == RegistryKind::LinkList {
            buf.remove_where_before_last(matches)
        } else {
            buf.remove_where(matches)
        };

        buf.write(&self.path)?;
        debug!(module = %name, registry = %kind, removed, "Registry lines erased");
        Ok(removed)
    }

    /// Whether any line of this file belongs to `name`.
    pub fn mentions(&self, name: &ModuleName, style: EntryStyle) -> Result<bool, ScaffoldError> {
        let buf = LineBuffer::read(&self.path)?;
        Ok(buf.lines().any(|line| self.kind.belongs_to(line, name, style)))
    }

    fn malformed(&self, message: &'static str) -> ScaffoldError {
        ScaffoldError::MalformedRegistry {
            message: message.into(),
            context: Some(self.path.display().to_string().into()),
        }
    }
}

/// The four registries of one host project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySet {
    aggregate_manifest: Registry,
    include_list: Registry,
    factory_list: Registry,
    link_list: Registry,
}

impl RegistrySet {
    /// Resolves the configured registry paths against `root`.
    #[must_use]
    pub fn resolve(root: &Path, paths: &RegistryPaths) -> Self {
        Self {
            aggregate_manifest: Registry::new(
                RegistryKind::AggregateManifest,
                root.join(&paths.aggregate_manifest),
            ),
            include_list: Registry::new(RegistryKind::IncludeList, root.join(&paths.include_list)),
            factory_list: Registry::new(RegistryKind::FactoryList, root.join(&paths.factory_list)),
            link_list: Registry::new(RegistryKind::LinkList, root.join(&paths.link_list)),
        }
    }

    #[must_use]
    pub const fn get(&self, kind: RegistryKind) -> &Registry {
        match kind {
            RegistryKind::AggregateManifest => &self.aggregate_manifest,
            RegistryKind::IncludeList => &self.include_list,
            RegistryKind::FactoryList => &self.factory_list,
            RegistryKind::LinkList => &self.link_list,
        }
    }

    /// Validates all four registries, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        RegistryKind::DELETE_ORDER.iter().try_for_each(|&kind| self.get(kind).validate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn name(s: &str) -> ModuleName {
        ModuleName::new(s).unwrap()
    }

    #[test]
    fn test_entries_match_host_conventions() {
        let n = name("Delay");
        assert_eq!(RegistryKind::AggregateManifest.entry(&n), "add_subdirectory(Delay)");
        assert_eq!(RegistryKind::IncludeList.entry(&n), "#include \"Delay/PluginProcessor.h\"");
        assert_eq!(
            RegistryKind::FactoryList.entry(&n),
            "[] { return std::make_unique<PluginInstanceProxy> (std::make_unique<DelayAudioProcessor>()); },"
        );
        assert_eq!(RegistryKind::LinkList.entry(&n), "\tDelay");
    }

    #[test]
    fn test_tagged_lines_use_artifact_comment_syntax() {
        let n = name("Gain");
        assert_eq!(
            RegistryKind::AggregateManifest.line(&n, EntryStyle::Tagged),
            "add_subdirectory(Gain) # plugkit:Gain"
        );
        assert_eq!(
            RegistryKind::IncludeList.line(&n, EntryStyle::Tagged),
            "#include \"Gain/PluginProcessor.h\" // plugkit:Gain"
        );
    }

    #[test]
    fn test_tag_match_is_exact() {
        let kind = RegistryKind::AggregateManifest;
        let line = kind.line(&name("PingPongDelay"), EntryStyle::Tagged);
        assert!(kind.belongs_to(&line, &name("PingPongDelay"), EntryStyle::Tagged));
        assert!(!kind.belongs_to(&line, &name("Delay"), EntryStyle::Tagged));
        assert!(kind.belongs_to(&line, &name("Delay"), EntryStyle::Keyword));
    }

    #[test]
    fn test_tag_match_keeps_trailing_whitespace_in_names() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        let original = "project(Host)\n";
        fs::write(&path, original).unwrap();
        let registry = Registry::new(RegistryKind::AggregateManifest, &path);

        registry.append_entry(&name("Gain "), EntryStyle::Tagged).unwrap();
        registry.append_entry(&name("Gain"), EntryStyle::Tagged).unwrap();

        assert_eq!(registry.remove_entries(&name("Gain "), EntryStyle::Tagged).unwrap(), 1);
        assert!(registry.mentions(&name("Gain"), EntryStyle::Tagged).unwrap());
        assert_eq!(registry.remove_entries(&name("Gain "), EntryStyle::Tagged).unwrap(), 0);

        assert_eq!(registry.remove_entries(&name("Gain"), EntryStyle::Tagged).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_link_list_append_and_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("libs.cmake");
        fs::write(&path, "target_link_libraries(Host PRIVATE\n)").unwrap();
        let registry = Registry::new(RegistryKind::LinkList, &path);

        registry.append_entry(&name("Gain"), EntryStyle::Keyword).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "target_link_libraries(Host PRIVATE\n\tGain\n)");

        assert_eq!(registry.remove_entries(&name("Gain"), EntryStyle::Keyword).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "target_link_libraries(Host PRIVATE\n)");
    }

    #[test]
    fn test_empty_link_list_is_malformed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("libs.cmake");
        fs::write(&path, "").unwrap();
        let registry = Registry::new(RegistryKind::LinkList, &path);

        assert!(matches!(registry.validate(), Err(ScaffoldError::MalformedRegistry { .. })));
        assert!(matches!(
            registry.append_entry(&name("Gain"), EntryStyle::Keyword),
            Err(ScaffoldError::MalformedRegistry { .. })
        ));
    }

    #[test]
    fn test_missing_registry_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let registry = Registry::new(RegistryKind::IncludeList, tmp.path().join("missing.inl"));

        assert!(matches!(registry.validate(), Err(ScaffoldError::Io { .. })));
        assert!(matches!(
            registry.remove_entries(&name("Gain"), EntryStyle::Keyword),
            Err(ScaffoldError::Io { .. })
        ));
    }

    #[test]
    fn test_mentions() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("CMakeLists.txt");
        fs::write(&path, "project(Host)\nadd_subdirectory(Gain)\n").unwrap();
        let registry = Registry::new(RegistryKind::AggregateManifest, &path);

        assert!(registry.mentions(&name("Gain"), EntryStyle::Keyword).unwrap());
        assert!(!registry.mentions(&name("Chorus"), EntryStyle::Keyword).unwrap());
        assert!(!registry.mentions(&name("Gain"), EntryStyle::Tagged).unwrap());
    }
}
