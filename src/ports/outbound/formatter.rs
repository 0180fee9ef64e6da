use crate::application::read_models::AssetsReadModel;
use crate::shared::Result;

/// AssetsFormatter port for rendering assets reports
///
/// This port abstracts the formatting logic for different report formats
/// (JSON, Markdown).
pub trait AssetsFormatter {
    /// Formats the assets read model
    ///
    /// # Arguments
    /// * `model` - Targets, libraries and diagnostics of one assets snapshot
    ///
    /// # Returns
    /// Formatted report content as a string
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &AssetsReadModel) -> Result<String>;
}
