use std::fmt;

/// Why an entry was left alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    /// Sockets, FIFOs and other entries that are neither files nor directories.
    NotAFile,
    /// The resolved name is the name the file already has.
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Directory => "is a directory",
            Self::NotAFile => "not a regular file",
            Self::Unchanged => "name unchanged",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Renamed,
    /// Dry run: the file would have been renamed.
    Planned,
    Skipped(SkipReason),
    Failed(String),
}

/// What happened to one directory entry. Exactly one is produced per entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameOutcome {
    original_name: String,
    final_name: Option<String>,
    status: Status,
}

impl RenameOutcome {
    pub(crate) fn renamed(original_name: String, final_name: String) -> Self {
        Self { original_name, final_name: Some(final_name), status: Status::Renamed }
    }

    pub(crate) fn planned(original_name: String, final_name: String) -> Self {
        Self { original_name, final_name: Some(final_name), status: Status::Planned }
    }

    pub(crate) fn skipped(original_name: String, reason: SkipReason) -> Self {
        Self { original_name, final_name: None, status: Status::Skipped(reason) }
    }

    pub(crate) fn failed(original_name: String, reason: impl Into<String>) -> Self {
        Self { original_name, final_name: None, status: Status::Failed(reason.into()) }
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// The new name, for renamed and planned entries.
    pub fn final_name(&self) -> Option<&str> {
        self.final_name.as_deref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The name the entry has once the batch is done.
    pub fn current_name(&self) -> &str {
        match self.status {
            Status::Renamed => self.final_name().unwrap_or(&self.original_name),
            _ => &self.original_name,
        }
    }
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to = self.final_name().unwrap_or(&self.original_name);
        match &self.status {
            Status::Renamed => write!(f, "Renamed: {} -> {to}", self.original_name),
            Status::Planned => write!(f, "Would rename: {} -> {to}", self.original_name),
            Status::Skipped(reason) => write!(f, "Skipped: {} ({reason})", self.original_name),
            Status::Failed(reason) => write!(f, "Failed: {} ({reason})", self.original_name),
        }
    }
}
