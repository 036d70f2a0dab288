//! Error types for depsync
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for depsync operations
pub type DepsyncResult<T> = Result<T, DepsyncError>;

/// How an error should be treated by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Inputs are not in a syncable shape. Always fatal, never retried.
    Configuration,
    /// Proceeding would risk data loss. Always fatal.
    InvariantViolation,
    /// Filesystem failure while mirroring or watching.
    Io,
}

/// Main error type for depsync operations
#[derive(Error, Debug)]
pub enum DepsyncError {
    /// No workspace root above the starting directory
    #[error("could not find workspace root (no pnpm-workspace.yaml above {start})")]
    WorkspaceRootNotFound { start: PathBuf },

    /// A package manifest does not exist
    #[error("manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// A package manifest could not be parsed
    #[error("invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// The workspace definition could not be parsed
    #[error("invalid workspace config {path}: {message}")]
    InvalidWorkspaceConfig { path: PathBuf, message: String },

    /// An injected dependency is not installed anywhere resolvable
    #[error("could not find package '{name}' from {from}")]
    PackageNotFound { name: String, from: PathBuf },

    /// Selected package has `exports` but no `files` entry
    #[error(
        "{package} did not specify a 'files' entry in package.json; it is required to know which directories to sync"
    )]
    MissingFilesDeclaration { package: String },

    /// Source and destination are the same directory
    #[error("refusing to sync {path} onto itself")]
    SelfSync { path: PathBuf },

    /// Delete or link failure while mirroring
    #[error("failed to sync {from} to {to}: {source}")]
    MirrorIo {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File watcher could not be set up
    #[error("watch error: {message}")]
    Watch { message: String },

    /// Config file could not be parsed
    #[error("invalid config {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DepsyncError {
    /// Classify the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfSync { .. } => ErrorKind::InvariantViolation,
            Self::MirrorIo { .. } | Self::Watch { .. } | Self::Io(_) => ErrorKind::Io,
            Self::WorkspaceRootNotFound { .. }
            | Self::ManifestNotFound { .. }
            | Self::InvalidManifest { .. }
            | Self::InvalidWorkspaceConfig { .. }
            | Self::PackageNotFound { .. }
            | Self::MissingFilesDeclaration { .. }
            | Self::Config { .. } => ErrorKind::Configuration,
        }
    }

    /// The path most relevant to this error, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::WorkspaceRootNotFound { start } => Some(start),
            Self::ManifestNotFound { path }
            | Self::InvalidManifest { path, .. }
            | Self::InvalidWorkspaceConfig { path, .. }
            | Self::SelfSync { path } => Some(path),
            Self::PackageNotFound { from, .. } => Some(from),
            Self::MirrorIo { to, .. } => Some(to),
            Self::Config { file, .. } => Some(file),
            Self::MissingFilesDeclaration { .. } | Self::Watch { .. } | Self::Io(_) => None,
        }
    }
}

impl From<notify::Error> for DepsyncError {
    fn from(err: notify::Error) -> Self {
        Self::Watch {
            message: err.to_string(),
        }
    }
}
