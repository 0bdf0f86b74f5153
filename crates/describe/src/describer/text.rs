use super::{Describer, Description};
use crate::category::Category;
use crate::error::{ErrorKind, Result};
use crate::fragment::Fragment;
use exn::{OptionExt, ResultExt};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const FALLBACK: &str = "content";
const DEFAULT_MAX_CHARS: usize = 100;

/// Describes text-bearing files by a snippet of their leading text.
///
/// Only `.txt` and `.pdf` files are read. Plain files are read directly
/// (lossily, so stray non-UTF-8 bytes are dropped rather than failing the
/// read), and for PDFs only the first page is extracted. Other `text/*` types
/// such as CSV or HTML carry markup rather than prose, and fall back.
/// Only the first `max_chars` characters are considered, and of those only
/// the first non-blank line is kept: line breaks have no business in a
/// filename.
pub struct TextDescriber {
    max_chars: usize,
}

impl Default for TextDescriber {
    fn default() -> Self {
        Self { max_chars: DEFAULT_MAX_CHARS }
    }
}

impl TextDescriber {
    pub fn with_max_chars(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Reads at most `max_chars` characters of text from a `.txt` or `.pdf`.
    pub(super) fn read(&self, path: &Path) -> Result<String> {
        let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        let text = match ext.as_deref() {
            Some("txt") => self.read_plain(path)?,
            Some("pdf") => self.read_pdf(path)?,
            _ => exn::bail!(ErrorKind::Unsupported("text")),
        };
        Ok(text.chars().take(self.max_chars).collect())
    }

    fn read_plain(&self, path: &Path) -> Result<String> {
        let file = File::open(path).or_raise(|| ErrorKind::Read(path.to_path_buf()))?;
        // UTF-8 tops out at four bytes per character.
        let limit = self.max_chars.saturating_mul(4);
        let mut buffer = Vec::with_capacity(limit.min(64 * 1024));
        file.take(u64::try_from(limit).unwrap_or(u64::MAX))
            .read_to_end(&mut buffer)
            .or_raise(|| ErrorKind::Read(path.to_path_buf()))?;
        Ok(String::from_utf8_lossy(&buffer).chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect())
    }

    #[cfg(feature = "pdf")]
    fn read_pdf(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).or_raise(|| ErrorKind::Read(path.to_path_buf()))?;
        // The extractor (and its font parsers) can panic on malformed input,
        // so contain that here as well.
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(&bytes)) {
            Ok(Ok(pages)) => pages.into_iter().next().ok_or_raise(|| ErrorKind::Missing("pdf page")),
            Ok(Err(e)) => {
                tracing::debug!(path = %path.display(), error = %e, "PDF text extraction failed");
                exn::bail!(ErrorKind::Decode("pdf"))
            },
            Err(_panic) => {
                tracing::warn!(path = %path.display(), "PDF text extraction panicked");
                exn::bail!(ErrorKind::Decode("pdf"))
            },
        }
    }

    #[cfg(not(feature = "pdf"))]
    fn read_pdf(&self, _path: &Path) -> Result<String> {
        exn::bail!(ErrorKind::Unsupported("pdf"))
    }

    fn snippet(text: &str) -> Option<Fragment> {
        text.lines().map(str::trim).find(|line| !line.is_empty()).and_then(Fragment::new)
    }
}

impl Describer for TextDescriber {
    fn describe(&self, path: &Path, _category: &Category) -> Description {
        match self.read(path) {
            Ok(text) => match Self::snippet(&text) {
                Some(fragment) => Description::Extracted(fragment),
                None => Description::Fallback {
                    fragment: self.fallback(),
                    reason: ErrorKind::Missing("text").to_string(),
                },
            },
            Err(e) => Description::Fallback {
                fragment: self.fallback(),
                reason: e.to_string(),
            },
        }
    }

    fn fallback(&self) -> Fragment {
        Fragment::literal(FALLBACK)
    }
}
