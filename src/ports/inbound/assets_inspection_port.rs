use crate::application::dto::{InspectRequest, InspectResponse};
use crate::shared::Result;

/// AssetsInspectionPort - Inbound port for inspecting an assets file
///
/// This port defines the interface the CLI uses to turn a
/// `project.assets.json` into a formatted report.
pub trait AssetsInspectionPort {
    /// Reads, parses and renders an assets file
    ///
    /// # Arguments
    /// * `request` - Assets file path, target filter and report options
    ///
    /// # Returns
    /// The formatted report and a summary of what it contains
    ///
    /// # Errors
    /// Returns an error if:
    /// - The assets file cannot be read or parsed
    /// - The requested target does not exist
    /// - Formatting fails
    fn inspect(&self, request: InspectRequest) -> Result<InspectResponse>;
}
