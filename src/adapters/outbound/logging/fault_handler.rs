use crate::dataflow::SourceKey;
use crate::ports::outbound::FaultHandler;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::error;

/// Reports data source faults as `tracing` error events
#[derive(Debug, Default)]
pub struct TracingFaultHandler {
    faults: AtomicUsize,
}

impl TracingFaultHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of faults reported so far
    pub fn fault_count(&self) -> usize {
        self.faults.load(Ordering::Relaxed)
    }
}

impl FaultHandler for TracingFaultHandler {
    fn report_fault(&self, source: &SourceKey, err: &anyhow::Error) {
        self.faults.fetch_add(1, Ordering::Relaxed);
        error!(source = %source, error = format!("{:#}", err), "data source transform faulted");
    }
}
