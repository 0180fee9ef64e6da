use crate::dataflow::SourceKey;

/// FaultHandler port for reporting data source faults
///
/// A transform that fails inside a data source is reported here instead of
/// tearing down the subscription graph. Implementations must not block.
pub trait FaultHandler: Send + Sync {
    /// Reports a failed transform
    ///
    /// # Arguments
    /// * `source` - Key of the data source whose transform failed
    /// * `error` - The failure
    fn report_fault(&self, source: &SourceKey, error: &anyhow::Error);
}
