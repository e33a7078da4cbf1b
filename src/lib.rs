//! # splitbook
//!
//! Split a textbook PDF into per-chapter files.
//!
//! The library scans extracted page text for chapter headings
//! ("Reading 12", "Chapter 3: Title…"), derives a gap-free partition
//! of the page space from the detected boundaries, and writes one PDF
//! per range. When heading detection comes up short, fixed-size and
//! manual partition strategies take over.
//!
//! ## Quick Start
//!
//! ```no_run
//! use splitbook::{split_file, SplitOptions};
//!
//! fn main() -> splitbook::Result<()> {
//!     let report = split_file("textbook.pdf", &SplitOptions::new())?;
//!     for file in &report.written {
//!         println!("{} ({} pages)", file.path.display(), file.page_count);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`detect`] — pure boundary scan over page texts
//! - [`partition`] — boundary / fixed-size / manual range strategies
//! - [`pdf`] — the seam to the PDF library (lopdf)
//! - [`split`] — strategy selection, job planning, execution

pub mod detect;
pub mod error;
pub mod partition;
pub mod pdf;
pub mod split;
pub mod text;

// Re-export commonly used types
pub use detect::{
    find_boundaries, find_boundaries_with_fallback, Boundary, MIN_BOUNDARIES, PRIMARY_KEYWORDS,
    SECONDARY_KEYWORDS,
};
pub use error::{Error, Result};
pub use partition::{output_filename, parse_range_entry, PageRange, SplitStrategy};
pub use pdf::{collect_page_texts, PageSource, PdfSource};
pub use split::{
    choose_strategy, plan_jobs, split_with_strategy, FallbackChoice, SplitJob, SplitOptions,
    SplitReport,
};

use std::path::Path;

/// Scan a PDF file for chapter boundaries.
///
/// Uses the given keywords, or the default primary set with secondary
/// fallback when `keywords` is empty.
///
/// # Example
///
/// ```no_run
/// use splitbook::scan_file;
///
/// let boundaries = scan_file("textbook.pdf", &[])?;
/// for b in &boundaries {
///     println!("{} {} at page {}", b.label, b.number, b.page_index + 1);
/// }
/// # Ok::<(), splitbook::Error>(())
/// ```
pub fn scan_file<P: AsRef<Path>>(path: P, keywords: &[&str]) -> Result<Vec<Boundary>> {
    let source = PdfSource::open(path)?;
    let texts = collect_page_texts(&source);
    if keywords.is_empty() {
        Ok(find_boundaries_with_fallback(
            &texts,
            PRIMARY_KEYWORDS,
            SECONDARY_KEYWORDS,
        ))
    } else {
        Ok(find_boundaries(&texts, keywords))
    }
}

/// Split a PDF file by automatically detected boundaries.
///
/// Scans with the configured keyword sets and splits along the
/// detected boundaries. Returns [`Error::DetectionInsufficient`] when
/// fewer than [`MIN_BOUNDARIES`] headings are found; callers then
/// pick a fallback strategy and use [`split_file_with_strategy`].
pub fn split_file<P: AsRef<Path>>(path: P, options: &SplitOptions) -> Result<SplitReport> {
    let source = PdfSource::open(path)?;
    let texts = collect_page_texts(&source);

    let primary: Vec<&str> = options.keywords.iter().map(String::as_str).collect();
    let secondary: Vec<&str> = options.fallback_keywords.iter().map(String::as_str).collect();
    let boundaries = find_boundaries_with_fallback(&texts, &primary, &secondary);

    let strategy = choose_strategy(boundaries, None)?;
    split_with_strategy(&source, &strategy, options)
}

/// Split a PDF file with an explicitly chosen strategy.
pub fn split_file_with_strategy<P: AsRef<Path>>(
    path: P,
    strategy: &SplitStrategy,
    options: &SplitOptions,
) -> Result<SplitReport> {
    let source = PdfSource::open(path)?;
    split_with_strategy(&source, strategy, options)
}
