use super::descriptor_source::DescriptorDataSource;
use crate::dataflow::{ProjectValueSource, SourceKey, Transform, VersionedValue};
use crate::ports::outbound::FaultHandler;
use crate::project_model::domain::{
    ProjectSubscriptionUpdate, WorkloadDescriptor, SUGGESTED_WORKLOAD_RULE,
};
use crate::shared::collections::{ConcurrentHashSet, LazyStringSplit};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Item metadata listing the setup components of a suggested workload
pub const VISUAL_STUDIO_COMPONENT_IDS_METADATA: &str = "VisualStudioComponentIds";

/// Single-component form written by older SDKs
pub const VISUAL_STUDIO_COMPONENT_ID_METADATA: &str = "VisualStudioComponentId";

/// Reports workloads the SDK suggests through `SuggestedWorkload` items.
///
/// A workload is reported while at least one of its component ids has not
/// been reported before.
pub struct WorkloadDescriptorDataSource;

impl WorkloadDescriptorDataSource {
    pub const KEY: &'static str = "WorkloadDescriptors";

    pub fn create(
        subscription: Arc<dyn ProjectValueSource<ProjectSubscriptionUpdate>>,
        fault_handler: Arc<dyn FaultHandler>,
    ) -> DescriptorDataSource<WorkloadDescriptor> {
        DescriptorDataSource::from_upstream(
            SourceKey::new(Self::KEY),
            subscription,
            SuggestedWorkloadDetector::default(),
            fault_handler,
        )
    }
}

#[derive(Default)]
struct SuggestedWorkloadDetector {
    component_ids_detected: ConcurrentHashSet<String>,
}

#[async_trait]
impl Transform<ProjectSubscriptionUpdate> for SuggestedWorkloadDetector {
    type Output = Vec<WorkloadDescriptor>;

    async fn transform(
        &mut self,
        input: &VersionedValue<ProjectSubscriptionUpdate>,
    ) -> Result<Vec<WorkloadDescriptor>> {
        let Some(rule) = input.value().rule(SUGGESTED_WORKLOAD_RULE) else {
            return Ok(Vec::new());
        };

        let mut descriptors = Vec::new();
        for (workload_name, metadata) in rule.items() {
            let component_ids: Vec<&str> = metadata
                .get(VISUAL_STUDIO_COMPONENT_IDS_METADATA)
                .or_else(|| metadata.get(VISUAL_STUDIO_COMPONENT_ID_METADATA))
                .map(|ids| LazyStringSplit::new(ids, ';').collect())
                .unwrap_or_default();

            // Nothing to install without a component id
            if component_ids.is_empty() {
                continue;
            }

            let mut any_new = false;
            for id in &component_ids {
                any_new |= self.component_ids_detected.add(id.to_string());
            }
            if any_new {
                descriptors.push(WorkloadDescriptor::new(workload_name.as_str(), component_ids));
            }
        }
        Ok(descriptors)
    }
}
