/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (build trackers, package lists,
/// report rendering and storage, console).
pub mod artifact_sink;
pub mod build_tracker;
pub mod formatter;
pub mod package_list_source;
pub mod progress_reporter;

pub use artifact_sink::ArtifactSink;
pub use build_tracker::BuildTracker;
pub use formatter::ReportFormatter;
pub use package_list_source::PackageListSource;
pub use progress_reporter::ProgressReporter;
