use super::target_framework::TargetFramework;
use crate::project_model::services::TargetFrameworkParser;
use crate::shared::collections::ContentHash;
use dashmap::DashMap;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error};

/// Kind of library entry in a lock file target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetsFileLibraryType {
    Package,
    Project,
    Unknown,
}

impl AssetsFileLibraryType {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(kind) if kind.eq_ignore_ascii_case("package") => Self::Package,
            Some(kind) if kind.eq_ignore_ascii_case("project") => Self::Project,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Project => "project",
            Self::Unknown => "unknown",
        }
    }
}

/// Severity of a restore diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetsFileLogLevel {
    Debug,
    Verbose,
    Information,
    Minimal,
    Warning,
    Error,
}

impl AssetsFileLogLevel {
    /// Unknown level names are treated as informational.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "verbose" => Self::Verbose,
            "minimal" => Self::Minimal,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Information,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Verbose => "Verbose",
            Self::Information => "Information",
            Self::Minimal => "Minimal",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A diagnostic NuGet recorded during restore.
///
/// Equality covers every field a consumer can observe; target graphs are
/// compared as a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsFileLogMessage {
    code: String,
    level: AssetsFileLogLevel,
    warning_level: u32,
    message: String,
    library_id: Option<String>,
    target_graphs: Vec<String>,
}

impl AssetsFileLogMessage {
    pub fn new(
        code: impl Into<String>,
        level: AssetsFileLogLevel,
        warning_level: u32,
        message: impl Into<String>,
        library_id: Option<String>,
        target_graphs: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut target_graphs: Vec<String> = target_graphs.into_iter().collect();
        target_graphs.sort();
        target_graphs.dedup();
        Self {
            code: code.into(),
            level,
            warning_level,
            message: message.into(),
            library_id: library_id.filter(|id| !id.is_empty()),
            target_graphs,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn level(&self) -> AssetsFileLogLevel {
        self.level
    }

    pub fn warning_level(&self) -> u32 {
        self.warning_level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn library_id(&self) -> Option<&str> {
        self.library_id.as_deref()
    }

    pub fn target_graphs(&self) -> &[String] {
        &self.target_graphs
    }

    /// A message without target graphs applies to every target.
    pub fn applies_to(&self, target: &AssetsFileTarget) -> bool {
        self.target_graphs.is_empty()
            || self
                .target_graphs
                .iter()
                .any(|graph| target.is_named(graph))
    }
}

/// One resolved library in a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsFileTargetLibrary {
    name: String,
    version: String,
    library_type: AssetsFileLibraryType,
    dependencies: Vec<String>,
    path: Option<String>,
}

impl AssetsFileTargetLibrary {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        library_type: AssetsFileLibraryType,
        dependencies: Vec<String>,
        path: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            library_type,
            dependencies,
            path,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn library_type(&self) -> AssetsFileLibraryType {
        self.library_type
    }

    /// Names of the libraries this one depends on.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Package folder relative path, or project file path for projects.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// Restore results for one target framework.
#[derive(Debug, Clone)]
pub struct AssetsFileTarget {
    target: String,
    framework: TargetFramework,
    alias: Option<String>,
    library_by_name: BTreeMap<String, Arc<AssetsFileTargetLibrary>>,
    top_level_dependencies: BTreeSet<String>,
    logs: Vec<Arc<AssetsFileLogMessage>>,
}

impl AssetsFileTarget {
    pub fn new(
        target: impl Into<String>,
        alias: Option<String>,
        libraries: impl IntoIterator<Item = AssetsFileTargetLibrary>,
        top_level_dependencies: BTreeSet<String>,
        logs: Vec<Arc<AssetsFileLogMessage>>,
    ) -> Self {
        let target = target.into();
        Self {
            framework: TargetFrameworkParser::resolve(&target),
            target,
            alias,
            library_by_name: libraries
                .into_iter()
                .map(|library| (library.name().to_ascii_lowercase(), Arc::new(library)))
                .collect(),
            top_level_dependencies,
            logs,
        }
    }

    pub(crate) fn with_logs(mut self, logs: Vec<Arc<AssetsFileLogMessage>>) -> Self {
        self.logs = logs;
        self
    }

    /// Target key as written in the lock file.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn framework(&self) -> &TargetFramework {
        &self.framework
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Matches the lock file key, the alias, or any name of the same framework.
    pub fn is_named(&self, name: &str) -> bool {
        self.target.eq_ignore_ascii_case(name)
            || self
                .alias
                .as_deref()
                .is_some_and(|alias| alias.eq_ignore_ascii_case(name))
            || TargetFrameworkParser::resolve(name) == self.framework
            || self.framework.matches(name)
    }

    /// Library by name, case-insensitively as NuGet compares ids.
    pub fn library(&self, name: &str) -> Option<&Arc<AssetsFileTargetLibrary>> {
        self.library_by_name.get(&name.to_ascii_lowercase())
    }

    pub fn libraries(&self) -> impl Iterator<Item = &Arc<AssetsFileTargetLibrary>> {
        self.library_by_name.values()
    }

    pub fn library_count(&self) -> usize {
        self.library_by_name.len()
    }

    pub fn top_level_dependencies(&self) -> &BTreeSet<String> {
        &self.top_level_dependencies
    }

    pub fn logs(&self) -> &[Arc<AssetsFileLogMessage>] {
        &self.logs
    }

    /// Names referenced as dependencies but missing from this target.
    pub fn unresolved_dependencies(&self) -> Vec<(&str, &str)> {
        self.library_by_name
            .values()
            .flat_map(|library| {
                library
                    .dependencies()
                    .iter()
                    .filter(|dependency| self.library(dependency).is_none())
                    .map(move |dependency| (library.name(), dependency.as_str()))
            })
            .collect()
    }
}

/// Immutable view of one `project.assets.json` revision.
///
/// Revisions are derived with `update_from_assets_file`, which preserves
/// unchanged log message objects and returns the receiver itself when the
/// file cannot be read or has not changed.
#[derive(Debug, Default)]
pub struct AssetsFileDependenciesSnapshot {
    content_hash: Option<ContentHash>,
    targets: BTreeMap<String, Arc<AssetsFileTarget>>,
    package_folders: Vec<PathBuf>,
    resolved_paths: DashMap<String, Option<PathBuf>>,
}

impl AssetsFileDependenciesSnapshot {
    /// The state before any assets file has been read.
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn from_parts(
        content_hash: ContentHash,
        targets: Vec<AssetsFileTarget>,
        package_folders: Vec<PathBuf>,
    ) -> Self {
        Self {
            content_hash: Some(content_hash),
            targets: targets
                .into_iter()
                .map(|target| (target.target().to_string(), Arc::new(target)))
                .collect(),
            package_folders,
            resolved_paths: DashMap::new(),
        }
    }

    /// Appends extra probing folders after those recorded in the file.
    ///
    /// Folders already present are skipped; cached lookups are discarded.
    pub fn with_additional_package_folders(mut self, folders: impl IntoIterator<Item = PathBuf>) -> Self {
        for folder in folders {
            if !self.package_folders.contains(&folder) {
                self.package_folders.push(folder);
            }
        }
        self.resolved_paths.clear();
        self
    }

    pub fn content_hash(&self) -> Option<&ContentHash> {
        self.content_hash.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &Arc<AssetsFileTarget>> {
        self.targets.values()
    }

    /// Package folders in probing order; the first is the user package folder.
    pub fn package_folders(&self) -> &[PathBuf] {
        &self.package_folders
    }

    /// Finds a target by name, or the sole target when `target` is `None`.
    ///
    /// An exact lock file key wins. Otherwise the name must match exactly one
    /// target: a full framework name shared by platform variants such as
    /// `net8.0` and `net8.0-windows` is ambiguous and fails closed, as does
    /// omitting the target while the snapshot has several.
    pub fn target(&self, target: Option<&str>) -> Option<&Arc<AssetsFileTarget>> {
        match target {
            Some(name) => self.targets.get(name).or_else(|| {
                let mut matches = self.targets.values().filter(|candidate| candidate.is_named(name));
                let found = matches.next()?;
                if matches.next().is_some() {
                    debug!(requested = name, "target name matches several targets");
                    return None;
                }
                Some(found)
            }),
            None if self.targets.len() == 1 => self.targets.values().next(),
            None => None,
        }
    }

    /// Resolved dependencies of a library.
    ///
    /// Returns `None` when the target or library is unknown, or when any
    /// dependency is missing from the target; the latter is logged as an
    /// inconsistent assets file.
    pub fn try_get_dependencies(
        &self,
        library_name: &str,
        version: Option<&str>,
        target: Option<&str>,
    ) -> Option<Vec<Arc<AssetsFileTargetLibrary>>> {
        let target = self.target(target)?;
        let library = target
            .library(library_name)
            .filter(|library| version_matches(library, version))?;

        let mut dependencies = Vec::with_capacity(library.dependencies().len());
        for name in library.dependencies() {
            match target.library(name) {
                Some(dependency) => dependencies.push(Arc::clone(dependency)),
                None => {
                    error!(
                        target_framework = target.target(),
                        library = library.name(),
                        dependency = name.as_str(),
                        "dependency missing from assets file target"
                    );
                    return None;
                }
            }
        }
        Some(dependencies)
    }

    /// A package library; project references and other kinds are not packages.
    pub fn try_get_package(
        &self,
        package_id: &str,
        version: Option<&str>,
        target: Option<&str>,
    ) -> Option<&Arc<AssetsFileTargetLibrary>> {
        self.target(target)?
            .library(package_id)
            .filter(|library| library.library_type() == AssetsFileLibraryType::Package)
            .filter(|library| version_matches(library, version))
    }

    pub fn try_get_log_messages(&self, target: Option<&str>) -> Option<&[Arc<AssetsFileLogMessage>]> {
        self.target(target).map(|target| target.logs())
    }

    /// Locates a package on disk, probing the package folders in order.
    ///
    /// The first folder containing the package wins. Results, including
    /// misses, are cached for the lifetime of this snapshot.
    pub fn try_resolve_package_path(&self, package_id: &str, version: &str) -> Option<PathBuf> {
        let key = format!(
            "{}/{}",
            package_id.to_ascii_lowercase(),
            version.to_ascii_lowercase()
        );

        if let Some(cached) = self.resolved_paths.get(&key) {
            return cached.value().clone();
        }

        let relative = self
            .package_relative_path(package_id, version)
            .unwrap_or_else(|| PathBuf::from(&key));
        let resolved = first_existing(&self.package_folders, &relative);
        self.resolved_paths.insert(key, resolved.clone());
        resolved
    }

    fn package_relative_path(&self, package_id: &str, version: &str) -> Option<PathBuf> {
        self.targets
            .values()
            .filter_map(|target| target.library(package_id))
            .find(|library| {
                library.library_type() == AssetsFileLibraryType::Package
                    && library.version().eq_ignore_ascii_case(version)
            })
            .and_then(|library| library.path())
            .map(PathBuf::from)
    }
}

fn version_matches(library: &AssetsFileTargetLibrary, version: Option<&str>) -> bool {
    version.map_or(true, |version| library.version().eq_ignore_ascii_case(version))
}

fn first_existing(folders: &[PathBuf], relative: &Path) -> Option<PathBuf> {
    folders
        .iter()
        .map(|folder| folder.join(relative))
        .find(|candidate| candidate.is_dir())
}
