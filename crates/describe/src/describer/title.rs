use super::text::TextDescriber;
use super::{Describer, Description};
use crate::category::Category;
use crate::error::ErrorKind;
use crate::fragment::Fragment;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const FALLBACK: &str = "content";
/// Enough text to find a date somewhere past the first paragraph.
const READ_CHARS: usize = 4096;
const MAX_LEN: usize = 50;

static TITLE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_ -]").unwrap());
static WORD_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());
static DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b").unwrap());

/// Describes `.txt` and `.pdf` files by a title-like name derived from their
/// text, trying in order:
///
/// 1. The first line, if it is between 6 and 49 characters long, reduced to
///    ASCII letters, digits, `_`, `-` and spaces (which become `_`).
/// 2. The first date such as `3/14/2024` or `14-03-24`, as `document_on_3-14-2024`.
/// 3. The first five words joined by `_`, reduced to ASCII letters, digits
///    and `_`.
///
/// Every result is capped at 50 bytes. Text that yields no letters or digits
/// falls back to `"content"`.
pub struct TitleDescriber {
    reader: TextDescriber,
}

impl Default for TitleDescriber {
    fn default() -> Self {
        Self { reader: TextDescriber::with_max_chars(READ_CHARS) }
    }
}

impl TitleDescriber {
    pub(crate) fn title(text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        // Only a line that is terminated counts as a title line.
        if let Some((line, _)) = text.split_once('\n') {
            let line = line.trim();
            if (6..50).contains(&line.chars().count()) {
                let cleaned = TITLE_CHARS.replace_all(line, "").replace(' ', "_");
                if let Some(title) = Self::capped(cleaned) {
                    return Some(title);
                }
            }
        }
        if let Some(date) = DATE.captures(text).and_then(|c| c.get(1)) {
            return Some(format!("document_on_{}", date.as_str().replace('/', "-")));
        }
        let words = text.split_whitespace().take(5).collect::<Vec<_>>().join("_");
        Self::capped(WORD_CHARS.replace_all(&words, "").into_owned())
    }

    /// Everything left after cleaning is ASCII, so any byte index is a
    /// character boundary. Bare separators are not a title.
    fn capped(mut s: String) -> Option<String> {
        s.truncate(MAX_LEN);
        s.chars().any(|c| c.is_ascii_alphanumeric()).then_some(s)
    }
}

impl Describer for TitleDescriber {
    fn describe(&self, path: &Path, _category: &Category) -> Description {
        let text = match self.reader.read(path) {
            Ok(text) => text,
            Err(e) => {
                return Description::Fallback {
                    fragment: self.fallback(),
                    reason: e.to_string(),
                };
            },
        };
        match Self::title(&text).and_then(Fragment::new) {
            Some(fragment) => Description::Extracted(fragment),
            None => Description::Fallback {
                fragment: self.fallback(),
                reason: ErrorKind::Missing("title").to_string(),
            },
        }
    }

    fn fallback(&self) -> Fragment {
        Fragment::literal(FALLBACK)
    }
}
