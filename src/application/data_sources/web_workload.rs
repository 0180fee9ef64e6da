use super::descriptor_source::DescriptorDataSource;
use crate::dataflow::{ProjectValueSource, SourceKey, Transform, VersionedValue};
use crate::ports::outbound::FaultHandler;
use crate::project_model::domain::{ProjectCapabilitiesSnapshot, WorkloadDescriptor};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability of projects built with the ASP.NET Core SDK
pub const WEB_CAPABILITY: &str = "DotNetCoreWeb";

pub const WEB_WORKLOAD_NAME: &str = "Microsoft.VisualStudio.Workload.NetWeb";

pub const WEB_COMPONENT_ID: &str = "Microsoft.VisualStudio.Component.Web";

/// Reports the web workload once for web projects.
pub struct WebWorkloadDescriptorDataSource;

impl WebWorkloadDescriptorDataSource {
    pub const KEY: &'static str = "WebWorkloadDescriptors";

    pub fn create(
        capabilities: Arc<dyn ProjectValueSource<ProjectCapabilitiesSnapshot>>,
        fault_handler: Arc<dyn FaultHandler>,
    ) -> DescriptorDataSource<WorkloadDescriptor> {
        DescriptorDataSource::from_upstream(
            SourceKey::new(Self::KEY),
            capabilities,
            WebWorkloadDetector::default(),
            fault_handler,
        )
    }
}

#[derive(Default)]
struct WebWorkloadDetector {
    have_reported_web_workload: bool,
}

#[async_trait]
impl Transform<ProjectCapabilitiesSnapshot> for WebWorkloadDetector {
    type Output = Vec<WorkloadDescriptor>;

    async fn transform(
        &mut self,
        input: &VersionedValue<ProjectCapabilitiesSnapshot>,
    ) -> Result<Vec<WorkloadDescriptor>> {
        if self.have_reported_web_workload || !input.value().is_present(WEB_CAPABILITY) {
            return Ok(Vec::new());
        }
        self.have_reported_web_workload = true;
        Ok(vec![WorkloadDescriptor::new(
            WEB_WORKLOAD_NAME,
            [WEB_COMPONENT_ID],
        )])
    }
}
