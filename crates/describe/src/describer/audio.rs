use super::{Describer, Description};
use crate::category::Category;
use crate::error::{ErrorKind, Result};
use crate::fragment::Fragment;
use std::path::Path;

const UNKNOWN_ARTIST: &str = "unknownArtist";
const UNKNOWN_ALBUM: &str = "unknownAlbum";
const FALLBACK: &str = "unknownArtist_unknownAlbum";

/// Describes audio files as `"{artist}_{album}"` from their ID3 tag
/// (`TPE1` and `TALB`).
///
/// A tag carrying only one of the two is still an extraction; the missing
/// half is replaced by its `unknown*` placeholder. Files without a readable
/// tag, or whose tag has neither frame, fall back.
pub struct AudioDescriber;

impl AudioDescriber {
    fn read_tag(path: &Path) -> Result<(Option<String>, Option<String>)> {
        let tag = id3::Tag::read_from_path(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Could not read ID3 tag");
            exn::Exn::from(ErrorKind::Decode("audio tag"))
        })?;
        let clean = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        Ok((clean(id3::TagLike::artist(&tag)), clean(id3::TagLike::album(&tag))))
    }
}

impl Describer for AudioDescriber {
    fn describe(&self, path: &Path, _category: &Category) -> Description {
        let (artist, album) = match Self::read_tag(path) {
            Ok((None, None)) => {
                return Description::Fallback {
                    fragment: self.fallback(),
                    reason: ErrorKind::Missing("artist or album").to_string(),
                };
            },
            Ok(fields) => fields,
            Err(e) => {
                return Description::Fallback {
                    fragment: self.fallback(),
                    reason: e.to_string(),
                };
            },
        };
        let artist = artist.as_deref().unwrap_or(UNKNOWN_ARTIST);
        let album = album.as_deref().unwrap_or(UNKNOWN_ALBUM);
        match Fragment::new(format!("{artist}_{album}")) {
            Some(fragment) => Description::Extracted(fragment),
            // Infallible: both halves are non-empty.
            None => Description::Fallback {
                fragment: self.fallback(),
                reason: ErrorKind::Missing("artist or album").to_string(),
            },
        }
    }

    fn fallback(&self) -> Fragment {
        Fragment::literal(FALLBACK)
    }
}
