use project_system::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock InstalledRuntimeRegistry with a fixed version list and a call counter
#[derive(Clone, Default)]
pub struct MockRuntimeRegistry {
    pub versions: Vec<String>,
    pub should_fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl MockRuntimeRegistry {
    pub fn with_versions(versions: &[&str]) -> Self {
        Self {
            versions: versions.iter().map(|v| v.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InstalledRuntimeRegistry for MockRuntimeRegistry {
    fn installed_runtime_versions(&self) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            anyhow::bail!("Mock registry unavailable");
        }
        Ok(self.versions.clone())
    }
}
