/// Filesystem adapters for report output
mod artifact_writer;

pub use artifact_writer::FileSystemArtifactWriter;
