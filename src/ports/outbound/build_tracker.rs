use crate::shared::Result;
use crate::version_diff::domain::Build;

/// BuildTracker port for querying a backing build-tracking service
///
/// This port abstracts the remote service (e.g., a Koji hub) that knows
/// which builds are tagged into which tag.
pub trait BuildTracker {
    /// Lists the latest builds tagged into `tag`
    ///
    /// # Arguments
    /// * `tag` - Tag to query
    /// * `package` - When given, restricts the listing to this package and
    ///   returns at most one build; when `None`, returns the latest build
    ///   of every package in the tag
    ///
    /// # Returns
    /// The builds found. An empty list means "no build tagged", which is a
    /// normal outcome and not an error.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The service is unreachable or the request times out
    /// - The service answers with an error status or a fault
    /// - The response cannot be decoded
    fn list_latest_tagged(&self, tag: &str, package: Option<&str>) -> Result<Vec<Build>>;
}

impl<T: BuildTracker + ?Sized> BuildTracker for &T {
    fn list_latest_tagged(&self, tag: &str, package: Option<&str>) -> Result<Vec<Build>> {
        (**self).list_latest_tagged(tag, package)
    }
}
