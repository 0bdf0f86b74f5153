use clap::Parser;
use renamr_config::{Overrides, TextStyle};
use renamr_engine::{RenameOutcome, Status};
use std::fmt;
use std::path::PathBuf;

/// Batch-rename every file in a directory into descriptive, collision-free
/// names derived from its content and metadata.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Directory whose files should be renamed. Subdirectories are skipped.
    pub folder: PathBuf,
    /// Naming template, e.g. "{folder}_{extra|slug}_{i}{ext}".
    #[arg(short, long)]
    pub template: Option<String>,
    /// Show what would be renamed without renaming anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,
    /// How text and PDF files are described: "snippet" (first line) or
    /// "title" (cleaned-up title, date or first words).
    #[arg(long, value_name = "STYLE")]
    pub text_style: Option<TextStyle>,
    /// Configuration file (TOML, YAML or JSON) to use instead of the default location.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Flags that were not given leave lower-priority sources alone.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            template: self.template.clone(),
            dry_run: self.dry_run.then_some(true),
            text_style: self.text_style,
        }
    }
}

/// Tally of a finished batch.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub renamed: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &RenameOutcome) {
        match outcome.status() {
            Status::Renamed => self.renamed += 1,
            Status::Planned => self.planned += 1,
            Status::Skipped(_) => self.skipped += 1,
            Status::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.planned {
            0 => write!(f, "{} renamed", self.renamed)?,
            n => write!(f, "{n} planned")?,
        }
        write!(f, ", {} skipped, {} failed", self.skipped, self.failed)
    }
}
