use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum configuration file size (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum accepted size of a single HTTP response body (64 MB).
///
/// A bulk `listTagged` over a whole distribution tag is a few megabytes;
/// anything far beyond that is treated as a misbehaving endpoint.
pub const MAX_RESPONSE_SIZE: u64 = 64 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates that an output target is not a symbolic link.
///
/// A target that does not exist yet is accepted.
pub fn validate_output_target(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
            path.display()
        ),
        Ok(metadata) if metadata.is_dir() => {
            anyhow::bail!("{} is a directory, expected a file path", path.display())
        }
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => anyhow::bail!("Failed to read metadata for {}: {}", path.display(), e),
    }
}

/// Validates size is within acceptable limits
///
/// # Errors
/// Returns an error if the size exceeds the maximum
pub fn validate_size(size: u64, what: &str, max_size: u64) -> Result<()> {
    if size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            what,
            size,
            max_size
        );
    }
    Ok(())
}
