use crate::project_model::domain::ProjectProperties;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Rewrites the evaluated value of selected properties.
pub trait PropertyValueInterceptor: Send + Sync {
    fn applies_to(&self, property: &str) -> bool;

    /// Receives the value from the provider (or the previous interceptor).
    fn on_get_evaluated_value(&self, property: &str, value: Option<String>) -> Option<String>;
}

/// Properties provider wrapped in an ordered list of interceptors.
///
/// Interceptors run in the order given at construction; each sees the
/// output of the one before it.
pub struct InterceptedProjectProperties {
    inner: Arc<dyn ProjectProperties>,
    interceptors: Vec<Arc<dyn PropertyValueInterceptor>>,
}

impl InterceptedProjectProperties {
    pub fn new(
        inner: Arc<dyn ProjectProperties>,
        interceptors: Vec<Arc<dyn PropertyValueInterceptor>>,
    ) -> Self {
        Self {
            inner,
            interceptors,
        }
    }
}

#[async_trait]
impl ProjectProperties for InterceptedProjectProperties {
    async fn evaluated_property_value(&self, name: &str) -> Result<Option<String>> {
        let value = self.inner.evaluated_property_value(name).await?;
        Ok(self
            .interceptors
            .iter()
            .filter(|interceptor| interceptor.applies_to(name))
            .fold(value, |value, interceptor| {
                interceptor.on_get_evaluated_value(name, value)
            }))
    }
}

/// Supplies a value when a property is undefined or empty.
pub struct DefaultValueInterceptor {
    property: String,
    default: String,
}

impl DefaultValueInterceptor {
    pub fn new(property: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            default: default.into(),
        }
    }
}

impl PropertyValueInterceptor for DefaultValueInterceptor {
    fn applies_to(&self, property: &str) -> bool {
        self.property.eq_ignore_ascii_case(property)
    }

    fn on_get_evaluated_value(&self, _property: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) if !value.is_empty() => Some(value),
            _ => Some(self.default.clone()),
        }
    }
}
