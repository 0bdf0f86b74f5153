//! Batch renaming.
//!
//! [`Renamer`] drives the whole pipeline for one directory: it lists the
//! entries once, sorts them by name, and then for each file runs
//! classify → describe → fingerprint → render → resolve → rename.
//!
//! The primary entry point is [`Renamer::batch`], which returns a [`Batch`]
//! iterator yielding one [`RenameOutcome`] per directory entry. Work happens
//! lazily as the iterator is advanced, strictly one file at a time, so a
//! caller that stops iterating cancels the batch cleanly between files.
//! [`rename_batch`] is the collect-everything convenience on top.
//!
//! Entry indices (`{i}` in templates) are positions in the sorted listing.
//! Subdirectories are skipped but still occupy their position, so the index a
//! file receives does not depend on which of its neighbours are directories.

mod file;
mod iter;
mod outcome;

pub use self::iter::Batch;
pub use self::outcome::{RenameOutcome, SkipReason, Status};

use crate::error::Result;
use crate::template::NamingTemplate;
use renamr_describe::DescriberRegistry;
use std::path::Path;

/// A configured renaming pipeline, reusable across directories.
pub struct Renamer {
    template: NamingTemplate,
    registry: DescriberRegistry,
    dry_run: bool,
}

impl Default for Renamer {
    fn default() -> Self {
        Self::new(NamingTemplate::default())
    }
}

impl Renamer {
    pub fn new(template: NamingTemplate) -> Self {
        Self {
            template,
            registry: DescriberRegistry::default(),
            dry_run: false,
        }
    }

    /// Replaces the content describers.
    pub fn with_registry(mut self, registry: DescriberRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// In a dry run every step runs (including collision resolution against
    /// the names the batch *would* have claimed) but nothing is renamed, and
    /// outcomes are [`Status::Planned`].
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn template(&self) -> &NamingTemplate {
        &self.template
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Lists `directory` and prepares a lazy batch over its entries.
    ///
    /// # Errors
    /// Fails with a configuration error if the directory does not exist, is
    /// not a directory, or cannot be listed. Nothing is renamed in that case.
    pub fn batch(&self, directory: impl AsRef<Path>) -> Result<Batch<'_>> {
        Batch::new(self, directory.as_ref())
    }

    /// Renames every file in `directory` and returns one outcome per entry.
    pub fn rename_batch(&self, directory: impl AsRef<Path>) -> Result<Vec<RenameOutcome>> {
        Ok(self.batch(directory)?.collect())
    }
}

/// Renames every file in `directory` according to `template`.
///
/// ```no_run
/// use renamr_engine::{DEFAULT_TEMPLATE, rename_batch};
///
/// for outcome in rename_batch("/home/me/Downloads", DEFAULT_TEMPLATE).unwrap() {
///     println!("{outcome}");
/// }
/// ```
///
/// # Errors
/// Fails before touching any file if the template is invalid or the directory
/// cannot be listed. Per-file problems are reported as
/// [`Status::Failed`] outcomes instead.
pub fn rename_batch(directory: impl AsRef<Path>, template: &str) -> Result<Vec<RenameOutcome>> {
    Renamer::new(template.parse()?).rename_batch(directory)
}
