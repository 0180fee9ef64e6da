use serde::Serialize;
use std::hash::{Hash, Hasher};

/// A .NET runtime the project needs but the machine does not have.
///
/// Identity is the setup component id only; the runtime version is carried
/// for display.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeDescriptor {
    component_id: String,
    runtime_version: String,
}

impl RuntimeDescriptor {
    pub fn new(component_id: impl Into<String>, runtime_version: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into().trim().to_string(),
            runtime_version: runtime_version.into(),
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }
}

impl PartialEq for RuntimeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.component_id == other.component_id
    }
}

impl Eq for RuntimeDescriptor {}

impl Hash for RuntimeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.component_id.hash(state);
    }
}

/// An IDE workload the project needs, identified by workload name.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadDescriptor {
    workload_name: String,
    component_ids: Vec<String>,
}

impl WorkloadDescriptor {
    pub fn new<I, S>(workload_name: impl Into<String>, component_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut component_ids: Vec<String> = component_ids.into_iter().map(Into::into).collect();
        component_ids.sort();
        component_ids.dedup();
        Self {
            workload_name: workload_name.into().trim().to_string(),
            component_ids,
        }
    }

    pub fn workload_name(&self) -> &str {
        &self.workload_name
    }

    /// Setup component ids that install the workload, sorted.
    pub fn component_ids(&self) -> &[String] {
        &self.component_ids
    }
}

impl PartialEq for WorkloadDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.workload_name == other.workload_name
    }
}

impl Eq for WorkloadDescriptor {}

impl Hash for WorkloadDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.workload_name.hash(state);
    }
}
