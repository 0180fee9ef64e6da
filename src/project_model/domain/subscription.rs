use crate::shared::collections::{dictionaries_equal, dictionary_hash, LazyStringSplit};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

/// Rule carrying the evaluated general project properties
pub const CONFIGURATION_GENERAL_RULE: &str = "ConfigurationGeneral";

/// Rule whose items name workloads the SDK suggests installing
pub const SUGGESTED_WORKLOAD_RULE: &str = "SuggestedWorkload";

/// Current state of one MSBuild rule: evaluated properties and items.
#[derive(Debug, Clone, Default)]
pub struct RuleSnapshot {
    properties: HashMap<String, String>,
    items: BTreeMap<String, HashMap<String, String>>,
}

impl RuleSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_item<K, V>(
        mut self,
        item: impl Into<String>,
        metadata: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.items.insert(
            item.into(),
            metadata
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// Property value, treating empty strings as absent.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn items(&self) -> &BTreeMap<String, HashMap<String, String>> {
        &self.items
    }

    pub fn item_metadata(&self, item: &str, name: &str) -> Option<&str> {
        self.items
            .get(item)
            .and_then(|metadata| metadata.get(name))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Splits a list-valued property such as `TargetFrameworks`.
    pub fn list_property(&self, name: &str) -> Vec<&str> {
        self.property(name)
            .map(|value| LazyStringSplit::new(value, ';').collect())
            .unwrap_or_default()
    }
}

impl PartialEq for RuleSnapshot {
    fn eq(&self, other: &Self) -> bool {
        dictionaries_equal(&self.properties, &other.properties)
            && self.items.len() == other.items.len()
            && self.items.iter().all(|(item, metadata)| {
                other
                    .items
                    .get(item)
                    .is_some_and(|other_metadata| dictionaries_equal(metadata, other_metadata))
            })
    }
}

impl Eq for RuleSnapshot {}

impl Hash for RuleSnapshot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(dictionary_hash(&self.properties));
        for (item, metadata) in &self.items {
            item.hash(state);
            state.write_u64(dictionary_hash(metadata));
        }
    }
}

/// Rule-keyed evaluation / design-time build state of one configured project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProjectSubscriptionUpdate {
    rules: BTreeMap<String, RuleSnapshot>,
}

impl ProjectSubscriptionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, name: impl Into<String>, snapshot: RuleSnapshot) -> Self {
        self.rules.insert(name.into(), snapshot);
        self
    }

    pub fn rule(&self, name: &str) -> Option<&RuleSnapshot> {
        self.rules.get(name)
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

/// The capabilities a project currently declares (`CSharp`, `WPF`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCapabilitiesSnapshot {
    capabilities: BTreeSet<String>,
}

impl ProjectCapabilitiesSnapshot {
    pub fn new<I, S>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Capability names compare case-insensitively.
    pub fn is_present(&self, capability: &str) -> bool {
        self.capabilities
            .iter()
            .any(|c| c.eq_ignore_ascii_case(capability))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.capabilities.iter().map(String::as_str)
    }
}
