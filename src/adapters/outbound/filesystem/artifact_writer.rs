use crate::ports::outbound::ArtifactSink;
use crate::shared::error::DiffError;
use crate::shared::security::validate_output_target;
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// FileSystemArtifactWriter adapter for writing report artifacts
///
/// This adapter implements the ArtifactSink port. Every artifact is first
/// written to a temporary file inside the output directory and then renamed
/// over the target, so readers never observe a half-written report.
pub struct FileSystemArtifactWriter {
    output_dir: PathBuf,
}

impl FileSystemArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_error(path: &Path, details: impl Into<String>) -> anyhow::Error {
        DiffError::FileWrite {
            path: path.to_path_buf(),
            details: details.into(),
        }
        .into()
    }

    /// Creates the output directory if needed, refusing symlinked directories
    fn ensure_output_dir(&self) -> Result<()> {
        match fs::symlink_metadata(&self.output_dir) {
            Ok(metadata) if metadata.is_symlink() => Err(Self::write_error(
                &self.output_dir,
                "Security: Output directory is a symbolic link. For security reasons, writing through symbolic links is not allowed.",
            )),
            Ok(metadata) if !metadata.is_dir() => Err(Self::write_error(
                &self.output_dir,
                "Output path exists and is not a directory",
            )),
            Ok(_) => Ok(()),
            Err(_) => fs::create_dir_all(&self.output_dir).map_err(|e| {
                Self::write_error(
                    &self.output_dir,
                    format!("Failed to create output directory: {}", e),
                )
            }),
        }
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\\');
        if !plain {
            return Err(Self::write_error(
                &self.output_dir.join(name),
                format!("Artifact name '{}' is not a plain file name", name),
            ));
        }
        Ok(())
    }
}

impl ArtifactSink for FileSystemArtifactWriter {
    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf> {
        self.validate_name(name)?;
        self.ensure_output_dir()?;

        let target = self.output_dir.join(name);
        validate_output_target(&target).map_err(|e| Self::write_error(&target, e.to_string()))?;

        let mut temp = NamedTempFile::new_in(&self.output_dir)
            .map_err(|e| Self::write_error(&target, format!("Failed to create temporary file: {}", e)))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.flush())
            .map_err(|e| Self::write_error(&target, e.to_string()))?;
        temp.persist(&target)
            .map_err(|e| Self::write_error(&target, e.error.to_string()))?;

        tracing::debug!("Wrote {}", target.display());
        Ok(target)
    }
}
