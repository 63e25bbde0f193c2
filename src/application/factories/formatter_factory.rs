use crate::adapters::outbound::formatters::{
    HtmlFormatter, JsonFormatter, MarkdownFormatter, TextStatusFormatter,
};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for the formatter
/// implementations, following the Factory Pattern. It belongs in the
/// application layer as it selects infrastructure adapters based on
/// application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use distro_diff::application::dto::OutputFormat;
    /// use distro_diff::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Html => Box::new(HtmlFormatter::new()),
            OutputFormat::Txt => Box::new(TextStatusFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use distro_diff::application::dto::OutputFormat;
    /// use distro_diff::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Html);
    /// assert_eq!(message, "📝 Rendering HTML status page...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Rendering JSON report...",
            OutputFormat::Html => "📝 Rendering HTML status page...",
            OutputFormat::Txt => "📝 Rendering plain-text status list...",
            OutputFormat::Markdown => "📝 Rendering Markdown report...",
        }
    }
}
