//! Filename-safe fragments.

use std::fmt;

/// Characters that either separate paths or are rejected by at least one
/// mainstream filesystem.
const UNSAFE_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replaces every path-breaking character with an underscore.
///
/// ```
/// use renamr_describe::sanitize;
/// assert_eq!(sanitize(r#"a:b"c/d*e"#), "a_b_c_d_e");
/// assert_eq!(sanitize("already fine"), "already fine");
/// ```
pub fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().chars().map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c }).collect()
}

/// A short, sanitized, never-empty piece of a filename.
///
/// The only way to build one is through [`Fragment::new`] (which sanitizes
/// and rejects blank input) or [`Fragment::literal`] for compile-time
/// constants, so holding a `Fragment` is proof that it is safe to splice into
/// a filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    /// Sanitizes and trims `s`, returning `None` if nothing is left.
    ///
    /// Control characters (line breaks, tabs, NUL) become spaces first, so a
    /// multi-line tag value turns into a single line.
    pub fn new(s: impl AsRef<str>) -> Option<Self> {
        let flattened: String = s.as_ref().chars().map(|c| if c.is_control() { ' ' } else { c }).collect();
        let trimmed = flattened.trim();
        match trimmed.is_empty() {
            true => None,
            false => Some(Self(sanitize(trimmed))),
        }
    }

    /// Wraps a known-good constant.
    pub fn literal(s: &'static str) -> Self {
        debug_assert!(!s.trim().is_empty(), "fragment literals must not be blank");
        Self(sanitize(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("a\\b", "a_b")]
    #[case("a/b", "a_b")]
    #[case("what?", "what_")]
    #[case("12:30", "12_30")]
    #[case("\"quoted\"", "_quoted_")]
    #[case("<tag>", "_tag_")]
    #[case("pipe|d", "pipe_d")]
    #[case("star*", "star_")]
    fn test_sanitize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize(input), expected);
    }

    #[test]
    fn test_fragment_rejects_blank() {
        assert!(Fragment::new("").is_none());
        assert!(Fragment::new("  \t\n").is_none());
    }

    #[test]
    fn test_fragment_trims_and_sanitizes() {
        let fragment = Fragment::new("  Q3: \"final\" */draft  ").unwrap();
        assert_eq!(fragment.as_str(), "Q3_ _final_ __draft");
    }

    #[rstest]
    #[case("Daft\nPunk", "Daft Punk")]
    #[case("Canon\0EOS\r\n", "Canon EOS")]
    #[case("\tleading tab", "leading tab")]
    #[case("bell\u{7}", "bell")]
    fn test_fragment_flattens_control_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Fragment::new(input).unwrap().as_str(), expected);
    }

    #[test]
    fn test_fragment_of_only_control_characters_is_blank() {
        assert!(Fragment::new("\0\u{1b}\r").is_none());
    }

    #[test]
    fn test_fragment_keeps_unicode() {
        assert_eq!(Fragment::new("Café Ünïcode").unwrap().as_str(), "Café Ünïcode");
    }
}
