//! Collision resolution.
//!
//! [`Claims`] is the authoritative view of which names in a directory are
//! taken during a batch. It starts as the directory listing and is updated as
//! each rename commits, so names handed out earlier in the same batch are
//! occupied for later files even though the directory is never re-listed.

use crate::error::{ErrorKind, Result};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};

#[derive(Clone, Debug, Default)]
pub struct Claims {
    names: HashSet<OsString>,
}

impl Claims {
    pub fn new(names: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        Self { names: names.into_iter().map(Into::into).collect() }
    }

    pub fn is_claimed(&self, name: impl AsRef<OsStr>) -> bool {
        self.names.contains(name.as_ref())
    }

    /// Returns `false` if the name was already claimed.
    pub fn claim(&mut self, name: impl Into<OsString>) -> bool {
        self.names.insert(name.into())
    }

    /// Returns `false` if the name was not claimed.
    pub fn release(&mut self, name: impl AsRef<OsStr>) -> bool {
        self.names.remove(name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Finds the first free name for `candidate`.
    ///
    /// An unclaimed candidate is returned as-is. Otherwise the candidate's own
    /// suffix (everything from its last non-leading dot) is dropped, and
    /// `_1`, `_2`, … plus the file's original `extension` are appended, so the
    /// result keeps the extension of the file being renamed even when the
    /// template did not. Every claimed name can block at most one suffix, so a
    /// free name is always found within `len() + 1` attempts; running out is
    /// reported as [`ErrorKind::Conflict`]. Does not claim the result.
    pub fn resolve(&self, candidate: &str, extension: &str) -> Result<String> {
        if !self.is_claimed(candidate) {
            return Ok(candidate.to_string());
        }
        let stem = match candidate.rfind('.') {
            Some(dot) if dot > 0 => &candidate[..dot],
            _ => candidate,
        };
        let attempts = self.names.len() + 1;
        for n in 1..=attempts {
            let name = format!("{stem}_{n}{extension}");
            if !self.is_claimed(&name) {
                tracing::debug!(%candidate, resolved = %name, "Resolved name collision");
                return Ok(name);
            }
        }
        exn::bail!(ErrorKind::Conflict { candidate: candidate.to_string(), attempts })
    }
}
