use super::lock_file::{split_library_key, LockFile, LockFileLogMessage};
use super::target_framework_parser::TargetFrameworkParser;
use crate::project_model::domain::{
    AssetsFileDependenciesSnapshot, AssetsFileLibraryType, AssetsFileLogLevel,
    AssetsFileLogMessage, AssetsFileTarget, AssetsFileTargetLibrary,
};
use crate::shared::collections::{ContentHash, IncrementalHasher};
use crate::shared::error::ProjectSystemError;
use crate::shared::security::check_readable_file;
use crate::shared::Result;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// AssetsFileSnapshotBuilder service for deriving snapshots from lock files
///
/// Reading and building report failures explicitly; the snapshot's own
/// update operation turns any failure into "no change".
pub struct AssetsFileSnapshotBuilder;

impl AssetsFileSnapshotBuilder {
    /// Reads the raw bytes of an assets file
    ///
    /// # Errors
    /// Returns [`ProjectSystemError::AssetsFileReadError`] if the file is
    /// missing, not a regular file, too large, or cannot be read.
    pub fn read(path: &Path) -> Result<Vec<u8>> {
        let read_error = |details: String| ProjectSystemError::AssetsFileReadError {
            path: path.to_path_buf(),
            details,
        };

        let size = check_readable_file(path, "assets file").map_err(|e| read_error(e.to_string()))?;

        // Read sequentially; the file is only opened for reading so a
        // concurrent restore can still replace it.
        let mut contents = Vec::with_capacity(size as usize);
        File::open(path)
            .and_then(|mut file| file.read_to_end(&mut contents))
            .map_err(|e| read_error(e.to_string()))?;
        Ok(contents)
    }

    /// Fingerprint used to skip rebuilding unchanged files.
    pub fn fingerprint(contents: &[u8]) -> ContentHash {
        let mut hasher = IncrementalHasher::new();
        hasher.append_bytes(contents);
        hasher.finish()
    }

    /// Builds a new snapshot, reusing unchanged log messages of `previous`
    ///
    /// # Arguments
    /// * `previous` - Snapshot whose log message objects may be reused
    /// * `contents` - Raw assets file bytes
    /// * `path` - Path the bytes were read from, for error reporting
    ///
    /// # Errors
    /// Returns [`ProjectSystemError::AssetsFileParseError`] if the contents
    /// are not a valid lock file.
    pub fn build(
        previous: &AssetsFileDependenciesSnapshot,
        contents: &[u8],
        path: &Path,
    ) -> Result<AssetsFileDependenciesSnapshot> {
        Self::build_with_hash(previous, contents, Self::fingerprint(contents), path)
    }

    fn build_with_hash(
        previous: &AssetsFileDependenciesSnapshot,
        contents: &[u8],
        content_hash: ContentHash,
        path: &Path,
    ) -> Result<AssetsFileDependenciesSnapshot> {
        let lock_file = LockFile::parse(contents).map_err(|e| {
            ProjectSystemError::AssetsFileParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        if lock_file.version != 3 {
            debug!(path = %path.display(), version = lock_file.version, "unexpected assets file version");
        }

        let mut targets = Vec::new();
        for target_key in lock_file.targets.keys() {
            if target_key.contains('/') {
                // Runtime-specific graph, e.g. net8.0/win-x64
                continue;
            }
            let target = Self::build_target(&lock_file, target_key);
            let logs = Self::target_logs(&lock_file.logs, &target);
            let previous_logs = previous
                .target(Some(target_key))
                .map(|target| target.logs())
                .unwrap_or_default();
            targets.push(target.with_logs(diff_log_messages(previous_logs, logs)));
        }

        Ok(AssetsFileDependenciesSnapshot::from_parts(
            content_hash,
            targets,
            Self::package_folders(&lock_file),
        ))
    }

    fn build_target(lock_file: &LockFile, target_key: &str) -> AssetsFileTarget {
        let framework = TargetFrameworkParser::resolve(target_key);

        let alias = lock_file.project.as_ref().and_then(|project| {
            project
                .frameworks
                .iter()
                .find(|(name, _)| {
                    name.eq_ignore_ascii_case(target_key)
                        || TargetFrameworkParser::resolve(name) == framework
                })
                .map(|(name, entry)| entry.target_alias.clone().unwrap_or_else(|| name.clone()))
        });

        let mut libraries = Vec::new();
        if let Some(entries) = lock_file.targets.get(target_key) {
            for (key, entry) in entries {
                let (name, version) = split_library_key(key);
                let info = lock_file.libraries.get(key);
                let library_type = AssetsFileLibraryType::parse(
                    entry
                        .library_type
                        .as_deref()
                        .or_else(|| info.and_then(|info| info.library_type.as_deref())),
                );
                let path = info.and_then(|info| info.path.clone().or_else(|| info.msbuild_project.clone()));
                libraries.push(AssetsFileTargetLibrary::new(
                    name,
                    version,
                    library_type,
                    entry.dependencies.keys().cloned().collect(),
                    path,
                ));
            }
        }

        let top_level_dependencies = Self::top_level_dependencies(lock_file, target_key, alias.as_deref());
        let target = AssetsFileTarget::new(target_key, alias, libraries, top_level_dependencies, Vec::new());

        for (library, dependency) in target.unresolved_dependencies() {
            error!(
                target_framework = target_key,
                library,
                dependency,
                "assets file references a dependency missing from its target"
            );
        }

        target
    }

    /// Library names from the dependency groups that apply to the target.
    ///
    /// The empty group key holds framework-independent references.
    fn top_level_dependencies(
        lock_file: &LockFile,
        target_key: &str,
        alias: Option<&str>,
    ) -> BTreeSet<String> {
        let framework = TargetFrameworkParser::resolve(target_key);
        lock_file
            .project_file_dependency_groups
            .iter()
            .filter(|(group, _)| {
                group.is_empty()
                    || group.eq_ignore_ascii_case(target_key)
                    || alias.is_some_and(|alias| group.eq_ignore_ascii_case(alias))
                    || TargetFrameworkParser::resolve(group) == framework
            })
            .flat_map(|(_, entries)| entries.iter())
            .filter_map(|entry| {
                // "Newtonsoft.Json >= 13.0.1"
                let name = entry.split(' ').next().unwrap_or(entry).trim();
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect()
    }

    fn target_logs(logs: &[LockFileLogMessage], target: &AssetsFileTarget) -> Vec<AssetsFileLogMessage> {
        logs.iter()
            .map(|log| {
                AssetsFileLogMessage::new(
                    log.code.clone(),
                    AssetsFileLogLevel::parse(&log.level),
                    log.warning_level,
                    log.message.clone(),
                    log.library_id.clone(),
                    log.target_graphs.iter().cloned(),
                )
            })
            .filter(|message| message.applies_to(target))
            .collect()
    }

    /// `packageFolders` in order; older files fall back to the restore section.
    fn package_folders(lock_file: &LockFile) -> Vec<PathBuf> {
        if !lock_file.package_folders.is_empty() {
            return lock_file.package_folders.iter().map(PathBuf::from).collect();
        }

        lock_file
            .project
            .as_ref()
            .and_then(|project| project.restore.as_ref())
            .map(|restore| {
                restore
                    .packages_path
                    .iter()
                    .chain(restore.fallback_folders.iter())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Positional diff of log messages.
///
/// An entry equal to the previous entry at the same index reuses the
/// previous object; every other entry is wrapped fresh. Reordered messages
/// therefore lose reuse but are never attributed to the wrong entry.
pub fn diff_log_messages(
    previous: &[Arc<AssetsFileLogMessage>],
    current: Vec<AssetsFileLogMessage>,
) -> Vec<Arc<AssetsFileLogMessage>> {
    current
        .into_iter()
        .enumerate()
        .map(|(index, message)| match previous.get(index) {
            Some(prior) if **prior == message => Arc::clone(prior),
            _ => Arc::new(message),
        })
        .collect()
}

impl AssetsFileDependenciesSnapshot {
    /// Derives the next snapshot from an assets file on disk.
    ///
    /// Never fails: a missing, locked or malformed file returns this same
    /// snapshot, as does a file whose contents have not changed.
    pub fn update_from_assets_file(self: &Arc<Self>, path: &Path) -> Arc<Self> {
        match AssetsFileSnapshotBuilder::read(path) {
            Ok(contents) => self.update_from_contents(&contents, path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "keeping previous assets snapshot");
                Arc::clone(self)
            }
        }
    }

    /// Same as [`update_from_assets_file`](Self::update_from_assets_file) for
    /// contents already in memory.
    pub fn update_from_contents(self: &Arc<Self>, contents: &[u8], path: &Path) -> Arc<Self> {
        let content_hash = AssetsFileSnapshotBuilder::fingerprint(contents);
        if self.content_hash() == Some(&content_hash) {
            debug!(path = %path.display(), "assets file unchanged");
            return Arc::clone(self);
        }

        match AssetsFileSnapshotBuilder::build_with_hash(self, contents, content_hash, path) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "keeping previous assets snapshot");
                Arc::clone(self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ASSETS: &str = r#"{
        "version": 3,
        "targets": {
            "net8.0": {
                "Foo/1.0.0": {"type": "package", "dependencies": {"Bar": "2.0.0"}},
                "Bar/2.0.0": {"type": "package"},
                "Lib/1.0.0": {"type": "project"}
            },
            "net8.0/win-x64": {
                "Foo/1.0.0": {"type": "package"}
            }
        },
        "libraries": {
            "Foo/1.0.0": {"type": "package", "path": "foo/1.0.0"},
            "Bar/2.0.0": {"type": "package", "path": "bar/2.0.0"},
            "Lib/1.0.0": {"type": "project", "path": "../Lib/Lib.csproj", "msbuildProject": "../Lib/Lib.csproj"}
        },
        "projectFileDependencyGroups": {
            "net8.0": ["Foo >= 1.0.0", "Lib >= 1.0.0"]
        },
        "packageFolders": {"/packages/": {}},
        "project": {"frameworks": {"net8.0": {"targetAlias": "net8.0"}}},
        "logs": [
            {"code": "NU1603", "level": "Warning", "warningLevel": 1, "message": "Foo approx", "libraryId": "Foo", "targetGraphs": ["net8.0"]},
            {"code": "NU1101", "level": "Error", "message": "Missing", "targetGraphs": ["net48"]}
        ]
    }"#;

    fn write_assets(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("project.assets.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_build_skips_runtime_targets() {
        let dir = TempDir::new().unwrap();
        let path = write_assets(&dir, ASSETS);
        let snapshot = AssetsFileDependenciesSnapshot::empty().update_from_assets_file(&path);

        let targets: Vec<_> = snapshot.targets().map(|t| t.target().to_string()).collect();
        assert_eq!(targets, ["net8.0"]);
    }

    #[test]
    fn test_build_target_contents() {
        let dir = TempDir::new().unwrap();
        let path = write_assets(&dir, ASSETS);
        let snapshot = AssetsFileDependenciesSnapshot::empty().update_from_assets_file(&path);
        let target = snapshot.target(None).unwrap();

        assert_eq!(target.library_count(), 3);
        assert_eq!(target.alias(), Some("net8.0"));
        assert_eq!(
            target.library("Lib").unwrap().library_type(),
            AssetsFileLibraryType::Project
        );
        assert_eq!(target.library("foo").unwrap().path(), Some("foo/1.0.0"));
        let top: Vec<_> = target.top_level_dependencies().iter().cloned().collect();
        assert_eq!(top, ["Foo", "Lib"]);

        // Only the message for this target graph is kept
        assert_eq!(target.logs().len(), 1);
        assert_eq!(target.logs()[0].code(), "NU1603");
        assert_eq!(snapshot.package_folders(), [PathBuf::from("/packages/")]);
    }

    #[test]
    fn test_update_is_identity_preserving() {
        let dir = TempDir::new().unwrap();
        let path = write_assets(&dir, ASSETS);
        let first = AssetsFileDependenciesSnapshot::empty().update_from_assets_file(&path);

        // Same logs, different library set: a new snapshot reusing log objects
        let changed = ASSETS.replace("\"Lib/1.0.0\": {\"type\": \"project\"}", "\"Lib/1.0.0\": {\"type\": \"project\", \"dependencies\": {}}");
        let path = write_assets(&dir, &changed);
        let second = first.update_from_assets_file(&path);

        assert!(!Arc::ptr_eq(&first, &second));
        let first_logs = first.try_get_log_messages(None).unwrap();
        let second_logs = second.try_get_log_messages(None).unwrap();
        assert_eq!(first_logs.len(), second_logs.len());
        for (a, b) in first_logs.iter().zip(second_logs) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_unchanged_file_returns_same_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write_assets(&dir, ASSETS);
        let first = AssetsFileDependenciesSnapshot::empty().update_from_assets_file(&path);
        let second = first.update_from_assets_file(&path);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file_returns_same_snapshot() {
        let dir = TempDir::new().unwrap();
        let snapshot = AssetsFileDependenciesSnapshot::empty();
        let updated = snapshot.update_from_assets_file(&dir.path().join("nope.json"));
        assert!(Arc::ptr_eq(&snapshot, &updated));
    }

    #[cfg(unix)]
    #[test]
    fn test_update_reads_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = write_assets(&dir, ASSETS);
        let link = dir.path().join("linked.assets.json");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let snapshot = AssetsFileDependenciesSnapshot::empty().update_from_assets_file(&link);
        assert_eq!(snapshot.targets().count(), 1);
        assert!(snapshot.content_hash().is_some());
    }

    #[test]
    fn test_malformed_file_returns_same_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = write_assets(&dir, ASSETS);
        let first = AssetsFileDependenciesSnapshot::empty().update_from_assets_file(&path);

        let path = write_assets(&dir, "{ \"targets\": ");
        let second = first.update_from_assets_file(&path);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_build_reports_parse_errors() {
        let result = AssetsFileSnapshotBuilder::build(
            &AssetsFileDependenciesSnapshot::default(),
            b"[]",
            Path::new("project.assets.json"),
        );
        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ProjectSystemError>(),
            Some(ProjectSystemError::AssetsFileParseError { .. })
        ));
    }

    #[test]
    fn test_read_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let error = AssetsFileSnapshotBuilder::read(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<ProjectSystemError>(),
            Some(ProjectSystemError::AssetsFileReadError { .. })
        ));
    }

    #[test]
    fn test_package_folders_fall_back_to_restore_section() {
        let contents = br#"{
            "project": {"restore": {"packagesPath": "/home/.nuget/packages/", "fallbackFolders": ["/fallback"]}}
        }"#;
        let snapshot = AssetsFileSnapshotBuilder::build(
            &AssetsFileDependenciesSnapshot::default(),
            contents,
            Path::new("project.assets.json"),
        )
        .unwrap();
        assert_eq!(
            snapshot.package_folders(),
            [PathBuf::from("/home/.nuget/packages/"), PathBuf::from("/fallback")]
        );
    }

    #[test]
    fn test_diff_reuses_by_position_only() {
        let message = |code: &str| {
            AssetsFileLogMessage::new(code, AssetsFileLogLevel::Warning, 1, "m", None, Vec::new())
        };
        let previous = vec![Arc::new(message("A")), Arc::new(message("B"))];

        let same = diff_log_messages(&previous, vec![message("A"), message("B")]);
        assert!(Arc::ptr_eq(&same[0], &previous[0]));
        assert!(Arc::ptr_eq(&same[1], &previous[1]));

        let swapped = diff_log_messages(&previous, vec![message("B"), message("A")]);
        assert!(!Arc::ptr_eq(&swapped[0], &previous[1]));
        assert_eq!(swapped[0].code(), "B");
        assert_eq!(swapped[1].code(), "A");
    }
}
