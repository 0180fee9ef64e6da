use super::descriptor_source::DescriptorDataSource;
use crate::dataflow::{ProjectValueSource, SourceKey, Transform, VersionedValue};
use crate::ports::outbound::FaultHandler;
use crate::project_model::domain::{
    ProjectCapabilitiesSnapshot, ProjectSubscriptionUpdate, WorkloadDescriptor,
    CONFIGURATION_GENERAL_RULE,
};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub const DOTNET_CORE_CAPABILITY: &str = "DotNetCore";

pub const USE_WPF_PROPERTY: &str = "UseWPF";

pub const WPF_WORKLOAD_NAME: &str = "Microsoft.VisualStudio.Workload.ManagedDesktop";

pub const WPF_COMPONENT_ID: &str = "Microsoft.VisualStudio.Component.ManagedDesktop.Prerequisites";

/// Reports the desktop workload once for .NET projects that use WPF.
///
/// Joins capabilities with the rule subscription so the property and the
/// capability set always come from the same project state.
pub struct WpfWorkloadDescriptorDataSource;

impl WpfWorkloadDescriptorDataSource {
    pub const KEY: &'static str = "WpfWorkloadDescriptors";

    pub fn create(
        capabilities: Arc<dyn ProjectValueSource<ProjectCapabilitiesSnapshot>>,
        subscription: Arc<dyn ProjectValueSource<ProjectSubscriptionUpdate>>,
        fault_handler: Arc<dyn FaultHandler>,
    ) -> DescriptorDataSource<WorkloadDescriptor> {
        DescriptorDataSource::from_joined(
            SourceKey::new(Self::KEY),
            capabilities,
            subscription,
            WpfWorkloadDetector::default(),
            fault_handler,
        )
    }
}

#[derive(Default)]
struct WpfWorkloadDetector {
    have_reported: bool,
}

#[async_trait]
impl Transform<(Arc<ProjectCapabilitiesSnapshot>, Arc<ProjectSubscriptionUpdate>)>
    for WpfWorkloadDetector
{
    type Output = Vec<WorkloadDescriptor>;

    async fn transform(
        &mut self,
        input: &VersionedValue<(Arc<ProjectCapabilitiesSnapshot>, Arc<ProjectSubscriptionUpdate>)>,
    ) -> Result<Vec<WorkloadDescriptor>> {
        let (capabilities, update) = input.value();
        let uses_wpf = update
            .rule(CONFIGURATION_GENERAL_RULE)
            .and_then(|rule| rule.property(USE_WPF_PROPERTY))
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        if self.have_reported || !uses_wpf || !capabilities.is_present(DOTNET_CORE_CAPABILITY) {
            return Ok(Vec::new());
        }
        self.have_reported = true;
        Ok(vec![WorkloadDescriptor::new(
            WPF_WORKLOAD_NAME,
            [WPF_COMPONENT_ID],
        )])
    }
}
