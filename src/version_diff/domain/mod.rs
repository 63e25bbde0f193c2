pub mod build;
pub mod status;
pub mod universe;
pub mod version_key;

pub use build::{validate_package_name, Build, BuildId};
pub use status::{ComparisonResult, ComparisonStatus, StatusCounts};
pub use universe::{PackageOrigin, PackageUniverse};
pub use version_key::{DistTagPattern, KeyPolicy, VersionKey, DEFAULT_DIST_MARKERS};
