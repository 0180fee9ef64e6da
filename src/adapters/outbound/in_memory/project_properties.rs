use crate::project_model::domain::ProjectProperties;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Evaluated properties held in a map; names compare case-insensitively
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectProperties {
    values: HashMap<String, String>,
}

impl InMemoryProjectProperties {
    pub fn new<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(name, value)| (name.as_ref().to_ascii_lowercase(), value.into()))
                .collect(),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_ascii_lowercase(), value.into());
    }
}

#[async_trait]
impl ProjectProperties for InMemoryProjectProperties {
    async fn evaluated_property_value(&self, name: &str) -> Result<Option<String>> {
        Ok(self.values.get(&name.to_ascii_lowercase()).cloned())
    }
}
