use crate::error::{ErrorKind, Result};
use crate::fingerprint::{Fingerprint, fingerprint};
use exn::{OptionExt, ResultExt};
use renamr_describe::{Category, Classification, DescriberRegistry, Description, SizeBucket};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use time::{OffsetDateTime, UtcOffset};
use time::macros::format_description;
use tracing::instrument;

/// Everything the engine learns about a single file before naming it.
///
/// Built once per file by [`FileRecord::inspect`] and dropped when the batch
/// moves on; nothing here is cached between runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub size_bucket: SizeBucket,
    pub category: Category,
    /// Original extension including the leading dot, or empty.
    pub extension: String,
    /// Creation date as `YYYYMMDD` in local time.
    pub created_at: String,
    pub description: Description,
    pub fingerprint: Fingerprint,
}

impl FileRecord {
    /// Stats, classifies, describes and fingerprints `path`.
    ///
    /// Content problems never fail here (they become fallback fragments). Only
    /// a file that cannot be stat'ed, or whose extension is not UTF-8, is an
    /// error.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn inspect(path: impl AsRef<Path>, registry: &DescriberRegistry) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).or_raise(|| ErrorKind::Inspect(path.to_path_buf()))?;
        let Classification { category, size_bytes, size_bucket } = Classification::new(path, metadata.len());
        // Creation time is not tracked by every filesystem.
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .or_raise(|| ErrorKind::Inspect(path.to_path_buf()))?;
        let extension = match path.extension() {
            Some(ext) => format!(".{}", ext.to_str().ok_or_raise(|| ErrorKind::NonUtf8Name(path.to_path_buf()))?),
            None => String::new(),
        };
        let description = registry.describe(path, &category);
        Ok(Self {
            path: path.to_path_buf(),
            size_bytes,
            size_bucket,
            category,
            extension,
            created_at: format_date(created, local_offset(), path)?,
            description,
            fingerprint: fingerprint(path),
        })
    }
}

/// The local UTC offset, or UTC when it cannot be determined soundly (for
/// example on Unix once several threads are running).
fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn format_date(time: SystemTime, offset: UtcOffset, path: &Path) -> Result<String> {
    OffsetDateTime::from(time)
        .to_offset(offset)
        .format(format_description!("[year][month][day]"))
        .or_raise(|| ErrorKind::Inspect(path.to_path_buf()))
}
