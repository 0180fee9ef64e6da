use super::descriptor_source::DescriptorDataSource;
use crate::dataflow::{ProjectValueSource, SourceKey, Transform, VersionedValue};
use crate::ports::outbound::{FaultHandler, InstalledRuntimeRegistry};
use crate::project_model::domain::{
    ProjectSubscriptionUpdate, RuntimeDescriptor, CONFIGURATION_GENERAL_RULE,
};
use crate::project_model::policies::{RuntimeComponentMap, NETCORE_APP_PACKAGE};
use crate::shared::collections::ConcurrentHashSet;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const TARGET_FRAMEWORK_IDENTIFIER_PROPERTY: &str = "TargetFrameworkIdentifier";

pub const TARGET_FRAMEWORK_VERSION_PROPERTY: &str = "TargetFrameworkVersion";

const NET_CORE_APP_IDENTIFIER: &str = ".NETCoreApp";

/// Reports the shared runtime a .NET project targets when it is not installed.
///
/// The installed runtime list is read once per data source and kept for its
/// lifetime. When the list cannot be read nothing is reported.
pub struct RuntimeDescriptorDataSource;

impl RuntimeDescriptorDataSource {
    pub const KEY: &'static str = "RuntimeDescriptors";

    pub fn create(
        subscription: Arc<dyn ProjectValueSource<ProjectSubscriptionUpdate>>,
        registry: Arc<dyn InstalledRuntimeRegistry>,
        fault_handler: Arc<dyn FaultHandler>,
        cancel: CancellationToken,
    ) -> DescriptorDataSource<RuntimeDescriptor> {
        DescriptorDataSource::from_upstream(
            SourceKey::new(Self::KEY),
            subscription,
            MissingRuntimeDetector {
                registry,
                installed: None,
                component_ids_detected: ConcurrentHashSet::new(),
                cancel,
            },
            fault_handler,
        )
    }
}

struct MissingRuntimeDetector {
    registry: Arc<dyn InstalledRuntimeRegistry>,
    /// `major.minor` of installed runtimes
    installed: Option<BTreeSet<String>>,
    component_ids_detected: ConcurrentHashSet<String>,
    cancel: CancellationToken,
}

impl MissingRuntimeDetector {
    fn installed_runtimes(&mut self) -> Option<&BTreeSet<String>> {
        if self.installed.is_none() {
            match self.registry.installed_runtime_versions() {
                Ok(versions) => {
                    let installed: BTreeSet<String> = versions
                        .iter()
                        .filter_map(|version| RuntimeComponentMap::major_minor(version))
                        .collect();
                    debug!(?installed, "read installed runtimes");
                    self.installed = Some(installed);
                }
                Err(e) => {
                    warn!(error = %e, "cannot read installed runtimes");
                    return None;
                }
            }
        }
        self.installed.as_ref()
    }
}

#[async_trait]
impl Transform<ProjectSubscriptionUpdate> for MissingRuntimeDetector {
    type Output = Vec<RuntimeDescriptor>;

    async fn transform(
        &mut self,
        input: &VersionedValue<ProjectSubscriptionUpdate>,
    ) -> Result<Vec<RuntimeDescriptor>> {
        let Some(general) = input.value().rule(CONFIGURATION_GENERAL_RULE) else {
            return Ok(Vec::new());
        };

        let is_net_core = general
            .property(TARGET_FRAMEWORK_IDENTIFIER_PROPERTY)
            .is_some_and(|identifier| identifier.eq_ignore_ascii_case(NET_CORE_APP_IDENTIFIER));
        let Some(version) = general.property(TARGET_FRAMEWORK_VERSION_PROPERTY) else {
            return Ok(Vec::new());
        };
        if !is_net_core {
            return Ok(Vec::new());
        }

        let component_id =
            RuntimeComponentMap::map_package_name_to_component_id(NETCORE_APP_PACKAGE, version);
        if component_id.is_empty() || self.component_ids_detected.contains(&component_id) {
            return Ok(Vec::new());
        }

        if self.cancel.is_cancelled() {
            return Ok(Vec::new());
        }

        let Some(major_minor) = RuntimeComponentMap::major_minor(version) else {
            return Ok(Vec::new());
        };
        let Some(installed) = self.installed_runtimes() else {
            return Ok(Vec::new());
        };
        if installed.contains(&major_minor) {
            return Ok(Vec::new());
        }

        if !self.component_ids_detected.add(component_id.clone()) {
            return Ok(Vec::new());
        }
        Ok(vec![RuntimeDescriptor::new(component_id, major_minor)])
    }
}
