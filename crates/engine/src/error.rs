//! Engine Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Errors fall in two groups. Configuration errors stop a batch before it
//! starts ([`ErrorKind::is_fatal`]). Everything else happens to a single file
//! and ends up as a [`Status::Failed`](crate::Status::Failed) outcome while the
//! batch carries on.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// An engine error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The directory to rename does not exist.
    #[display("directory not found: {}", _0.display())]
    DirectoryNotFound(#[error(not(source))] PathBuf),
    /// The path exists, but is not a directory.
    #[display("not a directory: {}", _0.display())]
    NotADirectory(#[error(not(source))] PathBuf),
    /// The directory could not be listed.
    #[display("could not list directory: {}", _0.display())]
    Listing(#[error(not(source))] PathBuf),
    /// The naming template does not compile, or uses a placeholder that does
    /// not exist.
    #[display("invalid naming template: {_0:?}")]
    Template(#[error(not(source))] String),
    /// The file could not be stat'ed or its timestamps could not be read.
    #[display("could not inspect file: {}", _0.display())]
    Inspect(#[error(not(source))] PathBuf),
    /// Names are handled as UTF-8 throughout templating.
    #[display("file name is not valid UTF-8: {}", _0.display())]
    NonUtf8Name(#[error(not(source))] PathBuf),
    /// The template rendered something that cannot be used as a file name.
    #[display("rendered an unusable file name: {_0:?}")]
    InvalidName(#[error(not(source))] String),
    /// Every suffix up to the resolution bound was already taken.
    #[display("no free name for {candidate:?} after {attempts} attempts")]
    Conflict { candidate: String, attempts: usize },
    /// The resolved name was free in the batch's bookkeeping but something
    /// appeared at that path on disk in the meantime.
    #[display("refusing to overwrite existing file: {_0}")]
    TargetExists(#[error(not(source))] String),
    /// The rename itself failed.
    #[display("could not rename {from:?} to {to:?}: {source}")]
    Rename { from: String, to: String, source: IoError },
}

impl ErrorKind {
    /// Returns `true` if the error prevents a batch from starting at all.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DirectoryNotFound(_) | Self::NotADirectory(_) | Self::Listing(_) | Self::Template(_))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Listing(_) | Self::Inspect(_) | Self::TargetExists(_) | Self::Rename { .. })
    }
}
