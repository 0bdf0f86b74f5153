//! File classification and content description.
//!
//! Two questions are answered here for any file on disk:
//!
//! - **What is it?** [`classify`] guesses a [`Category`] from the extension
//!   and buckets the file size into a [`SizeBucket`].
//! - **What is in it?** A [`DescriberRegistry`] dispatches to a per-category
//!   [`Describer`] that summarises content as a short, filename-safe
//!   [`Fragment`]: a text snippet, `"{width}x{height}_{camera}"` for images,
//!   `"{artist}_{album}"` for audio, and fixed literals for everything else.
//!
//! Neither question ever fails because of the *content* of a file; unreadable
//! or unexpected content degrades to a fallback fragment which is reported via
//! [`Description::Fallback`].
//!
//! ```no_run
//! use renamr_describe::{DescriberRegistry, classify};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = std::path::Path::new("/tmp/report.txt");
//! let classification = classify(path).map_err(|e| e.to_string())?;
//! let description = DescriberRegistry::default().describe(path, &classification.category);
//! println!("{} {}", classification.size_bucket, description.fragment());
//! # Ok(())
//! # }
//! ```

mod category;
pub mod describer;
pub mod error;
mod fragment;

pub use crate::category::{Category, Classification, SizeBucket, classify};
pub use crate::describer::{Describer, DescriberKind, DescriberRegistry, Description};
pub use crate::fragment::{Fragment, sanitize};
