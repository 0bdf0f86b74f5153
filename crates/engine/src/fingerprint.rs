//! Short content fingerprints.
//!
//! A fingerprint is a naming aid, not an identity: it only covers the leading
//! [`FINGERPRINT_WINDOW`] bytes, so files sharing a header share a
//! fingerprint. Uniqueness of final names is the job of [`Claims`](crate::Claims).

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::instrument;

/// Number of leading bytes hashed.
pub const FINGERPRINT_WINDOW: u64 = 4096;

/// CRC32 of a file's leading bytes, or a marker that it could not be read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    Crc32(u32),
    /// Renders as `nohash`.
    Unavailable,
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crc32(crc) => write!(f, "{crc:08x}"),
            Self::Unavailable => f.write_str("nohash"),
        }
    }
}

/// Fingerprints the first [`FINGERPRINT_WINDOW`] bytes of `path`. Never fails.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn fingerprint(path: impl AsRef<Path>) -> Fingerprint {
    let mut buffer = Vec::new();
    let read = File::open(path.as_ref()).and_then(|f| f.take(FINGERPRINT_WINDOW).read_to_end(&mut buffer));
    match read {
        Ok(_) => Fingerprint::Crc32(crc32fast::hash(&buffer)),
        Err(e) => {
            tracing::debug!(error = %e, "Could not read file for fingerprinting");
            Fingerprint::Unavailable
        },
    }
}
