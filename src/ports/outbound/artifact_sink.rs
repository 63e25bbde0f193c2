use crate::shared::Result;
use std::path::PathBuf;

/// ArtifactSink port for persisting rendered report artifacts
///
/// This port abstracts where report files end up, so use cases can hand
/// over named artifacts without touching the filesystem themselves.
pub trait ArtifactSink {
    /// Stores one artifact under `name`, replacing any previous content
    ///
    /// # Returns
    /// The location the artifact was written to
    ///
    /// # Errors
    /// Returns an error if:
    /// - The name is not a plain file name
    /// - The destination is a symbolic link or a directory
    /// - Writing fails (permissions, disk space)
    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf>;
}
