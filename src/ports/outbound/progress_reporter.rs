/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts progress reporting (e.g., to stderr) so the CLI can
/// give feedback while snapshots are read and resolved.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports progress through a known number of steps
    ///
    /// # Arguments
    /// * `current` - Steps completed
    /// * `total` - Total steps
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
