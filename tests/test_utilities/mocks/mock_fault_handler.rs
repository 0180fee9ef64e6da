use project_system::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock FaultHandler recording the key and message of every fault
#[derive(Clone, Default)]
pub struct MockFaultHandler {
    pub faults: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockFaultHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_faults(&self) -> Vec<(String, String)> {
        self.faults.lock().unwrap().clone()
    }
}

impl FaultHandler for MockFaultHandler {
    fn report_fault(&self, source: &SourceKey, error: &anyhow::Error) {
        self.faults
            .lock()
            .unwrap()
            .push((source.to_string(), error.to_string()));
    }
}
