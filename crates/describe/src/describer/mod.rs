//! Content describers.
//!
//! A [`Describer`] turns a file into a short [`Fragment`] summarising what is
//! inside it: a text snippet, an image's resolution and camera, an audio
//! track's artist and album. Describers are best-effort by contract and never
//! fail; when they cannot read what they need they degrade to a documented
//! fallback fragment and say so through [`Description::Fallback`].
//!
//! The [`DescriberRegistry`] selects a describer per [`DescriberKind`] through
//! a lookup table, so the rest of the pipeline never compares MIME strings.

mod audio;
mod fixed;
#[cfg(test)]
mod fixtures;
mod image;
mod text;
mod title;

pub use self::audio::AudioDescriber;
pub use self::fixed::FixedDescriber;
pub use self::image::ImageDescriber;
pub use self::text::TextDescriber;
pub use self::title::TitleDescriber;

use crate::category::Category;
use crate::fragment::Fragment;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::instrument;

/// What a describer produced, and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Description {
    /// The fragment was derived from the file's content or metadata.
    Extracted(Fragment),
    /// The describer does not inspect content for this kind of file and always
    /// answers with the same literal.
    Fixed(Fragment),
    /// Extraction failed entirely; `fragment` is the describer's fallback.
    Fallback { fragment: Fragment, reason: String },
}

impl Description {
    pub fn fragment(&self) -> &Fragment {
        match self {
            Self::Extracted(f) | Self::Fixed(f) => f,
            Self::Fallback { fragment, .. } => fragment,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Produces a descriptive fragment for one kind of file.
///
/// Implementations must not fail: every error path is mapped to
/// [`Description::Fallback`]. The registry additionally guards against panics
/// in third-party decoders and substitutes [`fallback`](Self::fallback).
pub trait Describer: Send + Sync {
    fn describe(&self, path: &Path, category: &Category) -> Description;

    /// The fragment used when content could not be read at all.
    fn fallback(&self) -> Fragment;
}

/// The describer slots available in a [`DescriberRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriberKind {
    Text,
    Image,
    Audio,
    Video,
    Other,
}

impl DescriberKind {
    /// Picks the describer slot for a file.
    ///
    /// `.txt` and `.pdf` files always go to [`Text`](Self::Text), whatever
    /// their guessed category; PDFs are `application/pdf` but their useful
    /// content is text.
    pub fn select(path: &Path, category: &Category) -> Self {
        let textual_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt") || e.eq_ignore_ascii_case("pdf"));
        if textual_ext {
            return Self::Text;
        }
        match category {
            Category::Text(_) => Self::Text,
            Category::Image(_) => Self::Image,
            Category::Audio(_) => Self::Audio,
            Category::Video(_) => Self::Video,
            Category::Other(_) | Category::Unknown => Self::Other,
        }
    }
}

/// Lookup table from [`DescriberKind`] to [`Describer`].
///
/// [`Default`] registers the built-in describers; individual slots can be
/// replaced with [`with`](Self::with), which is how alternative content
/// extractors plug into the naming engine.
pub struct DescriberRegistry {
    describers: HashMap<DescriberKind, Box<dyn Describer>>,
}

impl Default for DescriberRegistry {
    fn default() -> Self {
        Self::empty()
            .with(DescriberKind::Text, TextDescriber::default())
            .with(DescriberKind::Image, ImageDescriber)
            .with(DescriberKind::Audio, AudioDescriber)
            .with(DescriberKind::Video, FixedDescriber::new("videoFile"))
            .with(DescriberKind::Other, FixedDescriber::new("meta"))
    }
}

impl DescriberRegistry {
    /// A registry with no describers; every lookup answers with the generic
    /// `"meta"` literal until slots are filled.
    pub fn empty() -> Self {
        Self { describers: HashMap::new() }
    }

    pub fn with(mut self, kind: DescriberKind, describer: impl Describer + 'static) -> Self {
        self.describers.insert(kind, Box::new(describer));
        self
    }

    /// Describes `path`, dispatching on its category (and extension).
    #[instrument(skip_all, fields(path = %path.display(), category = %category))]
    pub fn describe(&self, path: &Path, category: &Category) -> Description {
        let kind = DescriberKind::select(path, category);
        let Some(describer) = self.describers.get(&kind) else {
            tracing::debug!(?kind, "No describer registered; using generic fragment");
            return Description::Fixed(Fragment::literal("meta"));
        };
        let description = match panic::catch_unwind(AssertUnwindSafe(|| describer.describe(path, category))) {
            Ok(description) => description,
            Err(_panic) => {
                tracing::error!(?kind, "Describer panicked; likely a malformed file");
                Description::Fallback {
                    fragment: describer.fallback(),
                    reason: "describer panicked".to_string(),
                }
            },
        };
        if let Description::Fallback { fragment, reason } = &description {
            tracing::debug!(?kind, %fragment, %reason, "Description fell back");
        }
        description
    }
}
