/// Mock implementations for testing
mod mock_build_tracker;
mod mock_package_list_source;
mod mock_progress_reporter;

pub use mock_build_tracker::MockBuildTracker;
pub use mock_package_list_source::MockPackageListSource;
pub use mock_progress_reporter::MockProgressReporter;
