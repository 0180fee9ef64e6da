use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where a formatted report is written.
pub trait OutputPresenter {
    /// Presents the formatted report to the output destination
    ///
    /// # Arguments
    /// * `content` - The formatted report
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    fn present(&self, content: &str) -> Result<()>;
}
