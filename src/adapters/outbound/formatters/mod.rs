/// Formatter adapters for the report output formats
mod escape;
mod html_formatter;
mod json_formatter;
mod markdown_formatter;
mod text_formatter;

pub use html_formatter::HtmlFormatter;
pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
pub use text_formatter::TextStatusFormatter;
