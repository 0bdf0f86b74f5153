//! Content-aware naming engine.
//!
//! Renames every file in a flat directory to a descriptive, collision-free
//! name built from a [`NamingTemplate`]:
//!
//! 1. **Classify** the file ([`describe::classify`]) into a category and size
//!    bucket.
//! 2. **Describe** its content through a [`DescriberRegistry`](describe::DescriberRegistry).
//! 3. **Fingerprint** its leading bytes ([`fingerprint`]).
//! 4. **Render** the template against those [`Attributes`].
//! 5. **Resolve** collisions against the batch's [`Claims`].
//! 6. **Rename**, and record a [`RenameOutcome`].
//!
//! Processing is sequential and synchronous; see [`Renamer::batch`] for the
//! per-file iterator and [`rename_batch`] for the one-shot call.

mod batch;
mod conflict;
pub mod error;
mod fingerprint;
mod record;
mod template;

pub use crate::batch::{Batch, RenameOutcome, Renamer, SkipReason, Status, rename_batch};
pub use crate::conflict::Claims;
pub use crate::fingerprint::{FINGERPRINT_WINDOW, Fingerprint, fingerprint};
pub use crate::record::FileRecord;
pub use crate::template::{Attributes, DEFAULT_TEMPLATE, NamingTemplate};
pub use renamr_describe as describe;
