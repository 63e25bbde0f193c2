use crate::shared::Result;
use crate::version_diff::domain::PackageOrigin;

/// PackageListSource port for enumerating the packages of a distro view
///
/// This port abstracts the content-resolution service that publishes one
/// package-name list per (view, architecture, origin) combination.
pub trait PackageListSource {
    /// Fetches one package-name list
    ///
    /// # Arguments
    /// * `view` - Distro view name (e.g., "eln")
    /// * `arch` - Architecture (e.g., "x86_64")
    /// * `origin` - Whether to list directly shipped or buildroot-only sources
    ///
    /// # Errors
    /// Returns an error if the list cannot be retrieved; callers merging
    /// several lists treat each failure independently.
    fn fetch_package_list(&self, view: &str, arch: &str, origin: PackageOrigin)
        -> Result<Vec<String>>;

    /// Human-readable location of the service, used in diagnostics
    fn location(&self) -> String;
}
