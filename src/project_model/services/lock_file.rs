use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Raw shape of `project.assets.json`, limited to what the snapshot uses.
///
/// Every section is optional so that partially written or older files
/// still parse; missing sections read as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFile {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub targets: BTreeMap<String, BTreeMap<String, LockFileTargetLibrary>>,
    #[serde(default)]
    pub libraries: BTreeMap<String, LockFileLibrary>,
    #[serde(default)]
    pub project_file_dependency_groups: BTreeMap<String, Vec<String>>,
    /// Keys of the `packageFolders` object, in file order.
    #[serde(default, deserialize_with = "ordered_keys")]
    pub package_folders: Vec<String>,
    #[serde(default)]
    pub project: Option<LockFileProject>,
    #[serde(default)]
    pub logs: Vec<LockFileLogMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LockFileTargetLibrary {
    #[serde(rename = "type")]
    pub library_type: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFileLibrary {
    #[serde(rename = "type")]
    pub library_type: Option<String>,
    pub path: Option<String>,
    pub msbuild_project: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LockFileProject {
    #[serde(default)]
    pub frameworks: BTreeMap<String, LockFileProjectFramework>,
    #[serde(default)]
    pub restore: Option<LockFileRestore>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFileProjectFramework {
    pub target_alias: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFileRestore {
    pub packages_path: Option<String>,
    #[serde(default)]
    pub fallback_folders: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFileLogMessage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub warning_level: u32,
    #[serde(default)]
    pub message: String,
    pub library_id: Option<String>,
    #[serde(default)]
    pub target_graphs: Vec<String>,
}

impl LockFile {
    pub fn parse(contents: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(contents)
    }
}

/// Splits a `Name/Version` library key.
pub fn split_library_key(key: &str) -> (&str, &str) {
    key.split_once('/').unwrap_or((key, ""))
}

fn ordered_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an object keyed by folder path")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some((key, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_map(KeysVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_file() {
        let lock = LockFile::parse(br#"{"version": 3}"#).unwrap();
        assert_eq!(lock.version, 3);
        assert!(lock.targets.is_empty());
        assert!(lock.package_folders.is_empty());
        assert!(lock.project.is_none());
    }

    #[test]
    fn test_package_folders_keep_file_order() {
        let lock = LockFile::parse(
            br#"{"packageFolders": {"/z/primary/": {}, "/a/fallback/": {}}}"#,
        )
        .unwrap();
        assert_eq!(lock.package_folders, ["/z/primary/", "/a/fallback/"]);
    }

    #[test]
    fn test_parse_targets_and_logs() {
        let lock = LockFile::parse(
            br#"{
                "targets": {
                    "net8.0": {
                        "A/1.0.0": {"type": "package", "dependencies": {"B": "2.0.0"}},
                        "B/2.0.0": {"type": "package"}
                    }
                },
                "logs": [
                    {"code": "NU1603", "level": "Warning", "warningLevel": 1,
                     "message": "m", "libraryId": "A", "targetGraphs": ["net8.0"]}
                ]
            }"#,
        )
        .unwrap();

        let target = &lock.targets["net8.0"];
        assert_eq!(target["A/1.0.0"].dependencies["B"], "2.0.0");
        assert_eq!(lock.logs[0].warning_level, 1);
        assert_eq!(lock.logs[0].library_id.as_deref(), Some("A"));
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(LockFile::parse(b"{ not json").is_err());
        assert!(LockFile::parse(br#"{"targets": []}"#).is_err());
    }

    #[test]
    fn test_split_library_key() {
        assert_eq!(split_library_key("Newtonsoft.Json/13.0.1"), ("Newtonsoft.Json", "13.0.1"));
        assert_eq!(split_library_key("odd"), ("odd", ""));
    }
}
