//! Describe Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Almost nothing here escapes the crate: describers swallow their own errors
//! and degrade to a fallback fragment. The error tree is still useful for the
//! fallback reason, and for [`classify`](crate::classify) where the file
//! itself could not be inspected.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A describe error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for describe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The file could not be stat'ed (vanished, permissions, broken symlink).
    #[display("could not read metadata: {}", _0.display())]
    Metadata(#[error(not(source))] PathBuf),
    /// The file exists but its contents could not be read.
    #[display("could not read contents: {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    /// The contents were read but are not valid for the expected format.
    #[display("could not decode {_0} content")]
    Decode(#[error(not(source))] &'static str),
    /// The content decoded fine, it just carries nothing worth describing.
    #[display("no {_0} present")]
    Missing(#[error(not(source))] &'static str),
    /// There is no reader for this format, or support for it was not
    /// compiled in.
    #[display("no support for {_0} content")]
    Unsupported(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Metadata(_) | Self::Read(_))
    }
}
