use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers to distinguish a clean run from one that
/// completed with gaps and from one that could not run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every package classified and every requested artifact written
    Success = 0,
    /// The run completed but some package queries or report formats failed
    PartialFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, network, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PartialFailure => write!(f, "Partial Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// A backing build system could not answer a query.
///
/// This is deliberately a separate type from "no build found": a
/// `BuildSource` returns `Ok(None)` for a package without a tagged build
/// and this error when the backing system itself failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to query tag '{tag}'{}: {details}", package_suffix(.package))]
pub struct SourceQueryError {
    pub tag: String,
    pub package: Option<String>,
    pub details: String,
}

fn package_suffix(package: &Option<String>) -> String {
    match package {
        Some(name) => format!(" for package '{}'", name),
        None => String::new(),
    }
}

/// Application-specific errors for build comparison runs.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Unknown build source: {name}\n\n💡 Hint: Known sources are: {known}")]
    UnknownSource { name: String, known: String },

    #[error(transparent)]
    SourceQuery(#[from] SourceQueryError),

    #[error("XML-RPC fault {code} from {endpoint}: {message}")]
    XmlRpcFault {
        endpoint: String,
        code: i64,
        message: String,
    },

    #[error("Failed to render {format} report\nDetails: {details}")]
    Render { format: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },

    #[error("No package list could be retrieved from {base_url}\n\n💡 Hint: Check network access or pass package names explicitly")]
    EmptyUniverse { base_url: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
