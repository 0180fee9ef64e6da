use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Stable identity of a data source, e.g. `ConfigurationGeneral` or
/// `AssetsFileDependencies`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceKey(Arc<str>);

impl SourceKey {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SourceKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Monotonic version of one source. Every publish advances it by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DataSourceVersion(u64);

impl DataSourceVersion {
    /// Version of a source that has not published anything yet
    pub const INITIAL: DataSourceVersion = DataSourceVersion(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DataSourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The versions of every source a value was derived from, its producer included.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionMap(BTreeMap<SourceKey, DataSourceVersion>);

impl VersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(key: SourceKey, version: DataSourceVersion) -> Self {
        let mut map = BTreeMap::new();
        map.insert(key, version);
        Self(map)
    }

    pub fn get(&self, key: &SourceKey) -> Option<DataSourceVersion> {
        self.0.get(key).copied()
    }

    pub fn contains_key(&self, key: &SourceKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SourceKey, DataSourceVersion)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    /// Returns a copy with `key` set to `version`.
    pub fn with(&self, key: SourceKey, version: DataSourceVersion) -> Self {
        let mut map = self.0.clone();
        map.insert(key, version);
        Self(map)
    }

    /// Two maps are consistent when every key they share carries the same version.
    pub fn is_consistent_with(&self, other: &VersionMap) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .0
            .iter()
            .all(|(key, version)| large.0.get(key).map_or(true, |v| v == version))
    }

    /// Union of both maps, or `None` when they disagree on a shared key.
    pub fn union(&self, other: &VersionMap) -> Option<VersionMap> {
        if !self.is_consistent_with(other) {
            return None;
        }
        let mut map = self.0.clone();
        for (key, version) in &other.0 {
            map.entry(key.clone()).or_insert(*version);
        }
        Some(Self(map))
    }
}

impl FromIterator<(SourceKey, DataSourceVersion)> for VersionMap {
    fn from_iter<I: IntoIterator<Item = (SourceKey, DataSourceVersion)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An immutable value together with the versions it was derived from.
///
/// Cloning is cheap; the payload and the version map are shared.
#[derive(Debug)]
pub struct VersionedValue<T> {
    value: Arc<T>,
    versions: Arc<VersionMap>,
}

impl<T> Clone for VersionedValue<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            versions: Arc::clone(&self.versions),
        }
    }
}

impl<T> VersionedValue<T> {
    pub fn new(value: T, versions: VersionMap) -> Self {
        Self::from_arc(Arc::new(value), versions)
    }

    pub fn from_arc(value: Arc<T>, versions: VersionMap) -> Self {
        Self {
            value,
            versions: Arc::new(versions),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_arc(&self) -> &Arc<T> {
        &self.value
    }

    pub fn versions(&self) -> &VersionMap {
        &self.versions
    }

    pub fn version_of(&self, key: &SourceKey) -> Option<DataSourceVersion> {
        self.versions.get(key)
    }

    pub fn is_joinable_with<U>(&self, other: &VersionedValue<U>) -> bool {
        self.versions.is_consistent_with(&other.versions)
    }
}
