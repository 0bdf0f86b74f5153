use super::iter::{Batch, Entry};
use super::{RenameOutcome, SkipReason};
use crate::error::{ErrorKind, Result};
use crate::record::FileRecord;
use crate::template::Attributes;
use exn::OptionExt;
use std::fs;

/// How the commit step of a single file ended.
enum Commit {
    Renamed(String),
    Planned(String),
    Unchanged,
}

impl Batch<'_> {
    /// Runs the full pipeline for one regular file.
    pub(super) fn process_file(&mut self, index: usize, entry: &Entry) -> Result<RenameOutcome> {
        let name = entry.name.to_str().ok_or_raise(|| ErrorKind::NonUtf8Name(entry.path.clone()))?.to_string();
        let record = FileRecord::inspect(&entry.path, &self.renamer.registry)?;
        tracing::debug!(
            category = %record.category,
            size = %record.size_bucket,
            fragment = %record.description.fragment(),
            fallback = record.description.is_fallback(),
            hash = %record.fingerprint,
            "Inspected file"
        );
        let attributes = Attributes::new(self.folder.as_str(), index, &record);
        let candidate = self.renamer.template.render(&attributes)?;

        // The file's own name is not a collision for itself. Release it while
        // resolving and commit, then claim whichever name it ends up with.
        self.claims.release(&entry.name);
        let commit = self.commit(entry, &name, &candidate, &record.extension);
        match &commit {
            Ok(Commit::Renamed(new_name) | Commit::Planned(new_name)) => self.claims.claim(new_name),
            Ok(Commit::Unchanged) | Err(_) => self.claims.claim(&entry.name),
        };

        Ok(match commit? {
            Commit::Renamed(new_name) => RenameOutcome::renamed(name, new_name),
            Commit::Planned(new_name) => RenameOutcome::planned(name, new_name),
            Commit::Unchanged => RenameOutcome::skipped(name, SkipReason::Unchanged),
        })
    }

    fn commit(&self, entry: &Entry, name: &str, candidate: &str, extension: &str) -> Result<Commit> {
        let resolved = self.claims.resolve(candidate, extension)?;
        if resolved == name {
            return Ok(Commit::Unchanged);
        }
        if self.renamer.dry_run {
            return Ok(Commit::Planned(resolved));
        }
        let target = self.directory.join(&resolved);
        // Only possible if something outside this batch created the file
        // after the directory was listed. Never overwrite it.
        if target.symlink_metadata().is_ok() {
            exn::bail!(ErrorKind::TargetExists(resolved));
        }
        fs::rename(&entry.path, &target).map_err(|source| ErrorKind::Rename {
            from: name.to_string(),
            to: resolved.clone(),
            source,
        })?;
        tracing::info!(from = %name, to = %resolved, "Renamed");
        Ok(Commit::Renamed(resolved))
    }
}
