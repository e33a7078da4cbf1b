//! Split orchestration: strategy selection, job planning, execution.
//!
//! Planning is pure (strategy + page count → jobs) so the whole
//! decision tree is testable without a PDF or an interactive prompt.
//! Execution walks the planned jobs in ordinal order and writes one
//! file per job; a codec failure skips that file only.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use serde::Serialize;

use crate::detect::{self, Boundary};
use crate::error::{Error, Result};
use crate::partition::{self, PageRange, SplitStrategy, DEFAULT_PREFIX};
use crate::pdf::PdfSource;

/// Operator's answer when detection comes up short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackChoice {
    /// Split into fixed chunks of this many pages.
    FixedPages(usize),
    /// Split into this many near-equal parts.
    FixedParts(usize),
    /// Operator-entered zero-based half-open ranges.
    Manual(Vec<(usize, usize)>),
}

/// Resolve detection results into a concrete strategy.
///
/// The decision tree from the interactive flow, as a function:
/// enough boundaries means a boundary-based split; otherwise the
/// operator's fallback choice decides. (Rescanning with different
/// keywords stays with the caller, since it needs the page texts
/// again.)
pub fn choose_strategy(
    boundaries: Vec<Boundary>,
    fallback: Option<FallbackChoice>,
) -> Result<SplitStrategy> {
    if detect::is_sufficient(&boundaries) {
        return Ok(SplitStrategy::Boundaries(boundaries));
    }

    match fallback {
        Some(FallbackChoice::FixedPages(k)) => Ok(SplitStrategy::FixedPages(k)),
        Some(FallbackChoice::FixedParts(n)) => Ok(SplitStrategy::FixedParts(n)),
        Some(FallbackChoice::Manual(pairs)) => Ok(SplitStrategy::Manual(pairs)),
        None => Err(Error::DetectionInsufficient {
            found: boundaries.len(),
            min: detect::MIN_BOUNDARIES,
        }),
    }
}

/// One planned output file: a page range plus its filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitJob {
    /// The pages this file will contain.
    pub range: PageRange,
    /// Filename (no directory component).
    pub filename: String,
}

/// Plan the output files for a strategy.
///
/// Pure: partitions the page space and derives filenames. Empty
/// ranges (possible when noisy detection misorders boundary numbers
/// relative to pages) are rejected here, before any file is touched.
pub fn plan_jobs(
    strategy: &SplitStrategy,
    total_pages: usize,
    prefix: &str,
) -> Result<Vec<SplitJob>> {
    let ranges = partition::partition(strategy, total_pages)?;

    let mut jobs = Vec::with_capacity(ranges.len());
    for range in ranges {
        if range.is_empty() {
            return Err(Error::InvalidRange(format!(
                "part {} covers no pages (boundary pages out of order?)",
                range.ordinal
            )));
        }
        let filename = partition::output_filename(prefix, &range);
        jobs.push(SplitJob { range, filename });
    }
    Ok(jobs)
}

/// Options for a split run.
///
/// # Example
///
/// ```no_run
/// use splitbook::split::SplitOptions;
///
/// let options = SplitOptions::new()
///     .with_prefix("Chapter")
///     .with_output_dir("out/chapters");
/// ```
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Keywords tried first during detection.
    pub keywords: Vec<String>,
    /// Broader keywords tried when the primary scan finds nothing.
    pub fallback_keywords: Vec<String>,
    /// Output filename prefix.
    pub prefix: String,
    /// Output directory; `<stem>_split` beside the input when unset.
    pub output_dir: Option<PathBuf>,
}

impl SplitOptions {
    /// Create options with the default keyword sets and prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the primary detection keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the output filename prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            keywords: detect::PRIMARY_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            fallback_keywords: detect::SECONDARY_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            prefix: DEFAULT_PREFIX.to_string(),
            output_dir: None,
        }
    }
}

/// One successfully written output file.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub range: PageRange,
    pub page_count: usize,
}

/// One output file that failed to write and was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    pub filename: String,
    pub reason: String,
}

/// Result of a split run.
///
/// Files written before a failure stay on disk; a run that reports
/// failures still delivered everything in `written`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    pub written: Vec<WrittenFile>,
    pub failed: Vec<FailedFile>,
}

impl SplitReport {
    /// Whether every planned file was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Execute a split of `source` using an already-chosen strategy.
///
/// Creates the output directory, then writes each planned file in
/// ordinal order. A PDF-level error on one file is logged, recorded
/// in the report, and does not stop the run.
pub fn split_with_strategy(
    source: &PdfSource,
    strategy: &SplitStrategy,
    options: &SplitOptions,
) -> Result<SplitReport> {
    use crate::pdf::PageSource;

    let total_pages = source.page_count();
    let jobs = plan_jobs(strategy, total_pages, &options.prefix)?;

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| source.default_output_dir());
    fs::create_dir_all(&output_dir)?;

    let mut report = SplitReport {
        output_dir: output_dir.clone(),
        ..Default::default()
    };

    for job in &jobs {
        let path = output_dir.join(&job.filename);
        match source.write_range(&job.range, &path) {
            Ok(()) => {
                info!(
                    "wrote {} ({} pages: {}-{})",
                    job.filename,
                    job.range.page_count(),
                    job.range.start + 1,
                    job.range.end
                );
                report.written.push(WrittenFile {
                    path,
                    range: job.range.clone(),
                    page_count: job.range.page_count(),
                });
            }
            Err(e) => {
                warn!("skipping {}: {}", job.filename, e);
                report.failed.push(FailedFile {
                    filename: job.filename.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}
