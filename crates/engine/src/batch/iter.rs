use super::{RenameOutcome, Renamer, SkipReason};
use crate::conflict::Claims;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::vec::IntoIter;

pub(super) struct Entry {
    pub(super) name: OsString,
    pub(super) path: PathBuf,
}

/// A lazily-processed batch over one directory listing.
///
/// Created by [`Renamer::batch`]. Each call to [`next`](Iterator::next)
/// processes exactly one entry (renaming it unless this is a dry run) and
/// yields its outcome. Dropping the batch part-way leaves the remaining files
/// untouched.
pub struct Batch<'a> {
    pub(super) renamer: &'a Renamer,
    pub(super) directory: PathBuf,
    pub(super) folder: String,
    pub(super) claims: Claims,
    entries: IntoIter<(usize, Entry)>,
}

impl<'a> Batch<'a> {
    pub(super) fn new(renamer: &'a Renamer, directory: &Path) -> Result<Self> {
        let directory = match fs::canonicalize(directory) {
            Ok(d) => d,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                exn::bail!(ErrorKind::DirectoryNotFound(directory.to_path_buf()))
            },
            Err(e) => return Err(e).or_raise(|| ErrorKind::Listing(directory.to_path_buf())),
        };
        if !directory.is_dir() {
            exn::bail!(ErrorKind::NotADirectory(directory));
        }
        let folder = directory.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();

        let mut entries = Vec::new();
        for entry in fs::read_dir(&directory).or_raise(|| ErrorKind::Listing(directory.clone()))? {
            let entry = entry.or_raise(|| ErrorKind::Listing(directory.clone()))?;
            entries.push(Entry { name: entry.file_name(), path: entry.path() });
        }
        // Byte-wise name order, which is code point order for UTF-8 names.
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let claims = Claims::new(entries.iter().map(|e| e.name.clone()));
        tracing::info!(directory = %directory.display(), entries = entries.len(), dry_run = renamer.is_dry_run(), "Starting batch");

        Ok(Self {
            renamer,
            directory,
            folder,
            claims,
            entries: entries.into_iter().enumerate().map(|(i, e)| (i + 1, e)).collect::<Vec<_>>().into_iter(),
        })
    }

    /// The canonicalized directory being renamed.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The directory's own name, as exposed to templates as `folder`.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    fn process(&mut self, index: usize, entry: Entry) -> RenameOutcome {
        let original = entry.name.to_string_lossy().into_owned();
        let span = tracing::info_span!("entry", name = %original, i = index);
        let _guard = span.enter();

        // Follows symlinks: a link to a directory is treated as a directory.
        // Stat failures fall through to the file step, which reports them.
        if let Ok(metadata) = fs::metadata(&entry.path) {
            if metadata.is_dir() {
                return RenameOutcome::skipped(original, SkipReason::Directory);
            }
            if !metadata.is_file() {
                return RenameOutcome::skipped(original, SkipReason::NotAFile);
            }
        }

        match self.process_file(index, &entry) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = ?e, "Could not rename file");
                RenameOutcome::failed(original, e.to_string())
            },
        }
    }
}

impl Iterator for Batch<'_> {
    type Item = RenameOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, entry) = self.entries.next()?;
        Some(self.process(index, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Batch<'_> {}
