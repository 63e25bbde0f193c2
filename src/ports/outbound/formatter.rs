use crate::application::read_models::ReportModel;
use crate::shared::Result;

/// ReportFormatter port for rendering comparison reports
///
/// This port abstracts the rendering of one output format (JSON, HTML,
/// plain-text status, Markdown) from the shared report model.
pub trait ReportFormatter {
    /// Formats the report model
    ///
    /// # Arguments
    /// * `model` - The immutable report model of a finished run
    ///
    /// # Returns
    /// Formatted report content as a string
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &ReportModel) -> Result<String>;
}
