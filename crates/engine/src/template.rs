//! Naming templates.
//!
//! Converts a file's [`Attributes`] into a candidate file name using a
//! user-configured [upon] template. Placeholders are single-brace expressions
//! (`{folder}`), and the library-specific formatters from the `addons` module
//! are available inside them:
//!
//! - **`slug`**: converts strings to URL-safe slugs, stripping quotation marks
//!   first to avoid artifacts like leading/trailing hyphens.
//! - **`truncate`**: truncates strings to a maximum byte length at a character
//!   boundary, usable as either `{truncate(extra, 20)}` or `{extra|truncate: 20}`.
//!
//! # Template Variables
//!
//! | Variable  | Example                  | Description                               |
//! |-----------|--------------------------|-------------------------------------------|
//! | `folder`  | `holiday`                | Name of the directory being renamed       |
//! | `type`    | `image_jpeg`             | Primary and secondary content type        |
//! | `extra`   | `4032x3024_Pixel 7`      | Descriptive fragment from a describer     |
//! | `size`    | `Mid`                    | Size bucket (`Low`, `Mid`, `High`)        |
//! | `date`    | `20240101`               | Creation date as `YYYYMMDD`               |
//! | `hash`    | `a1b2c3d4`               | Fingerprint of the leading 4KB            |
//! | `i`       | `3`                      | 1-based position in the sorted listing    |
//! | `ext`     | `.jpg`                   | Original extension, including the dot     |
//!
//! # Example
//!
//! ```
//! use renamr_engine::{Attributes, NamingTemplate};
//! use renamr_engine::describe::SizeBucket;
//!
//! let template: NamingTemplate = "{folder}_{extra|slug}_{i}{ext}".parse().unwrap();
//! let attributes = Attributes {
//!     folder: "holiday".into(),
//!     kind: "image_jpeg".into(),
//!     extra: "4032x3024 Pixel 7".into(),
//!     size: SizeBucket::Mid,
//!     date: "20240101".into(),
//!     hash: "a1b2c3d4".into(),
//!     index: 3,
//!     ext: ".jpg".into(),
//! };
//! assert_eq!(template.render(&attributes).unwrap(), "holiday_4032x3024-pixel-7_3.jpg");
//! ```

use crate::error::{Error, ErrorKind, Result};
use crate::record::FileRecord;
use exn::ResultExt;
use renamr_describe::{SizeBucket, sanitize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::instrument;
use upon::{Engine, Syntax, Template, Value};

/// The template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "{folder}_{type}_{extra}_{size}_{date}_{hash}_{i}{ext}";

/// Everything a template can refer to for a single file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attributes {
    pub folder: String,
    /// Exposed to templates as `type`.
    pub kind: String,
    pub extra: String,
    pub size: SizeBucket,
    pub date: String,
    pub hash: String,
    /// Exposed to templates as `i`.
    pub index: usize,
    pub ext: String,
}

impl Attributes {
    pub fn new(folder: impl Into<String>, index: usize, record: &FileRecord) -> Self {
        Self {
            folder: folder.into(),
            kind: record.category.label(),
            extra: record.description.fragment().to_string(),
            size: record.size_bucket,
            date: record.created_at.clone(),
            hash: record.fingerprint.to_string(),
            index,
            ext: record.extension.clone(),
        }
    }

    /// Stand-in values used to check, before touching any file, that a
    /// template only refers to variables that exist.
    fn sample() -> Self {
        Self {
            folder: "folder".into(),
            kind: "unknown_file".into(),
            extra: "meta".into(),
            size: SizeBucket::Low,
            date: "19700101".into(),
            hash: "00000000".into(),
            index: 1,
            ext: ".ext".into(),
        }
    }

    /// Builds the [`upon::Value`] map exposed to the template engine.
    fn parameters(&self) -> Value {
        let index = i64::try_from(self.index).unwrap_or(i64::MAX);
        let map: BTreeMap<String, Value> = [
            ("folder", Value::from(self.folder.as_str())),
            ("type", Value::from(self.kind.as_str())),
            ("extra", Value::from(self.extra.as_str())),
            ("size", Value::from(self.size.as_str())),
            ("date", Value::from(self.date.as_str())),
            ("hash", Value::from(self.hash.as_str())),
            ("i", Value::from(index)),
            ("ext", Value::from(self.ext.as_str())),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Value::Map(map)
    }
}

/// A compiled, validated naming template.
///
/// Constructed via [`FromStr`], which compiles the template eagerly and
/// renders it once against sample attributes, so both syntax errors and
/// unknown placeholders surface at creation time rather than halfway through
/// a batch. The compiled template is reusable across many
/// [`render`](Self::render) calls.
pub struct NamingTemplate {
    source: String,
    engine: Engine<'static>,
    template: Template<'static>,
}

impl FromStr for NamingTemplate {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::with_syntax(Syntax::builder().expr("{", "}").build());
        addons::configure(&mut engine);
        // Compile the template early so we can fail-fast in construction.
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template(s.to_string()))?;
        let compiled = Self { source: s.to_string(), engine, template };
        compiled.render_raw(&Attributes::sample()).or_raise(|| ErrorKind::Template(s.to_string()))?;
        Ok(compiled)
    }
}

impl Default for NamingTemplate {
    fn default() -> Self {
        // Infallible: the default template is covered by tests.
        DEFAULT_TEMPLATE.parse().unwrap_or_else(|_| unreachable!("default template must compile"))
    }
}

impl fmt::Debug for NamingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NamingTemplate").field(&self.source).finish()
    }
}

impl NamingTemplate {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders the template against `attributes`, returning a sanitized file
    /// name.
    ///
    /// The sanitizer runs over the whole rendered name, not just the
    /// descriptive fragment, so literal text and the folder name cannot smuggle
    /// path separators in either.
    #[instrument(skip_all, fields(i = attributes.index))]
    pub fn render(&self, attributes: &Attributes) -> Result<String> {
        let name = self.render_raw(attributes).or_raise(|| ErrorKind::Template(self.source.clone()))?;
        Self::validate(sanitize(name))
    }

    fn render_raw(&self, attributes: &Attributes) -> std::result::Result<String, upon::Error> {
        self.template.render(&self.engine, attributes.parameters()).to_string()
    }

    /// Rejects names that are blank or that refer to the directory itself.
    fn validate(name: String) -> Result<String> {
        match name.trim() {
            "" | "." | ".." => exn::bail!(ErrorKind::InvalidName(name)),
            _ if name.contains('\0') => exn::bail!(ErrorKind::InvalidName(name)),
            _ => Ok(name),
        }
    }
}

/// Custom [`upon`] extensions for path-safe string manipulation.
mod addons {
    use rslug::slugify;
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Custom formatter that converts strings to URL-safe slugs.
    ///
    /// Strips quotation marks before slugifying to avoid awkward slug output
    /// like `"hello"` becoming `-hello-`.
    fn slug_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                // Various quotation marks: '"‘’“”„‛`«»‹›
                let marks = [
                    '\u{0027}', '\u{0022}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201B}',
                    '\u{0060}', '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
                ];
                let stripped: String = s.chars().filter(|c| !marks.contains(c)).collect();
                write!(f, "{}", slugify!(&stripped))?
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Truncates a string to a maximum byte length at a character boundary.
    fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> String {
        s[..s.floor_char_boundary(max_bytes)].to_string()
    }

    /// Registers the `slug` formatter and `truncate` function on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("slug", slug_formatter);
        engine.add_function("truncate", truncate_to_char_boundary);
    }
}
