/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod compare_request;
mod output_format;

pub use compare_request::CompareRequest;
pub use output_format::OutputFormat;
