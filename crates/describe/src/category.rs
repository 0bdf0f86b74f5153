//! Coarse content classification.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use mime::Mime;
use std::fmt;
use std::path::Path;
use tracing::instrument;

const LOW_CEILING: u64 = 1_000_000;
const MID_CEILING: u64 = 100_000_000;

/// Rough size class of a file, as used in generated names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeBucket {
    /// Under 1 MB.
    Low,
    /// Under 100 MB.
    Mid,
    /// 100 MB and above.
    High,
}

impl SizeBucket {
    /// Buckets are decimal megabytes, inclusive at the lower bound.
    pub fn from_bytes(size: u64) -> Self {
        match size {
            s if s < LOW_CEILING => Self::Low,
            s if s < MID_CEILING => Self::Mid,
            _ => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mid => "Mid",
            Self::High => "High",
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The content category of a file, guessed from its extension.
///
/// Each known variant keeps the full MIME type so the subtype label survives
/// into generated names (`text_plain`, `image_jpeg`). Files without a
/// recognisable extension are [`Unknown`](Self::Unknown) and are labelled
/// `unknown_file`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Category {
    Text(Mime),
    Image(Mime),
    Audio(Mime),
    Video(Mime),
    /// A recognised MIME type outside the four media families (PDFs, archives, ...).
    Other(Mime),
    Unknown,
}

impl Category {
    /// Best-effort guess from the path's extension. Never fails.
    pub fn guess(path: impl AsRef<Path>) -> Self {
        mime_guess::from_path(path).first().map(Self::from).unwrap_or(Self::Unknown)
    }

    /// Primary label, e.g. `"text"`.
    pub fn primary(&self) -> &str {
        match self.mime() {
            Some(mime) => mime.type_().as_str(),
            None => "unknown",
        }
    }

    /// Secondary label, e.g. `"plain"`.
    pub fn secondary(&self) -> &str {
        match self.mime() {
            Some(mime) => mime.subtype().as_str(),
            None => "file",
        }
    }

    /// The `{type}` label used in naming templates: `"{primary}_{secondary}"`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.primary(), self.secondary())
    }

    pub fn mime(&self) -> Option<&Mime> {
        match self {
            Self::Text(m) | Self::Image(m) | Self::Audio(m) | Self::Video(m) | Self::Other(m) => Some(m),
            Self::Unknown => None,
        }
    }
}

impl From<Mime> for Category {
    fn from(mime: Mime) -> Self {
        let family = mime.type_();
        if family == mime::TEXT {
            Self::Text(mime)
        } else if family == mime::IMAGE {
            Self::Image(mime)
        } else if family == mime::AUDIO {
            Self::Audio(mime)
        } else if family == mime::VIDEO {
            Self::Video(mime)
        } else {
            Self::Other(mime)
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.primary(), self.secondary())
    }
}

/// The result of classifying a single file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub size_bytes: u64,
    pub size_bucket: SizeBucket,
}

impl Classification {
    /// Classifies a file whose size is already known (no I/O).
    pub fn new(path: impl AsRef<Path>, size_bytes: u64) -> Self {
        Self {
            category: Category::guess(path),
            size_bytes,
            size_bucket: SizeBucket::from_bytes(size_bytes),
        }
    }
}

/// Stats `path` and classifies it.
///
/// Category guessing cannot fail; the only error is the stat itself.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn classify(path: impl AsRef<Path>) -> Result<Classification> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path).or_raise(|| ErrorKind::Metadata(path.to_path_buf()))?;
    Ok(Classification::new(path, metadata.len()))
}
