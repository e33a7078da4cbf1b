//! PDF access seam.
//!
//! Isolates the concrete PDF library (lopdf) behind a small trait so
//! the detection and partition logic stays testable against plain
//! strings. The source keeps the raw file bytes around: each output
//! file is assembled by reloading the document and deleting every
//! page outside its range, which sidesteps copying page resource
//! dependencies by hand.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use lopdf::Document;

use crate::error::{Error, Result};
use crate::partition::PageRange;

/// Read access to an ordered sequence of pages.
///
/// The only capabilities the splitter needs from a document: how many
/// pages it has and the plain text of each one.
pub trait PageSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract plain text from a page (zero-based index).
    ///
    /// Returns an empty string for unreadable pages rather than
    /// failing; a page the extractor cannot decode simply yields no
    /// boundary matches.
    fn extract_text(&self, page_index: usize) -> String;
}

/// A PDF document opened for splitting, backed by lopdf.
pub struct PdfSource {
    doc: Document,
    bytes: Vec<u8>,
    path: PathBuf,
    page_count: usize,
}

impl PdfSource {
    /// Open a PDF file.
    ///
    /// Returns [`Error::InputNotFound`] when the path does not exist
    /// and [`Error::EmptyDocument`] for a PDF with no pages.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let doc = Document::load_mem(&bytes)?;
        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(Error::EmptyDocument);
        }

        debug!("opened {} ({} pages)", path.display(), page_count);
        Ok(Self {
            doc,
            bytes,
            path: path.to_path_buf(),
            page_count,
        })
    }

    /// Path the document was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default output directory: `<stem>_split` beside the input.
    pub fn default_output_dir(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(format!("{stem}_split"))
    }

    /// Write one page range to `path` as a standalone PDF.
    ///
    /// The document is reloaded from the retained bytes, pages outside
    /// the range are deleted, and unreferenced objects pruned before
    /// saving.
    pub fn write_range(&self, range: &PageRange, path: &Path) -> Result<()> {
        if range.is_empty() {
            return Err(Error::InvalidRange(format!(
                "range {}..{} covers no pages",
                range.start, range.end
            )));
        }
        if range.start >= self.page_count {
            return Err(Error::PageOutOfRange(range.start, self.page_count));
        }

        let mut doc = Document::load_mem(&self.bytes)?;

        // lopdf page numbers are 1-indexed; keep [start+1, end].
        let keep_first = range.start as u32 + 1;
        let keep_last = range.end.min(self.page_count) as u32;
        let delete: Vec<u32> = (1..=self.page_count as u32)
            .filter(|&p| p < keep_first || p > keep_last)
            .collect();
        if !delete.is_empty() {
            doc.delete_pages(&delete);
        }
        doc.prune_objects();

        doc.save(path)?;
        debug!(
            "wrote {} (pages {}..{})",
            path.display(),
            range.start,
            range.end
        );
        Ok(())
    }
}

impl PageSource for PdfSource {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn extract_text(&self, page_index: usize) -> String {
        if page_index >= self.page_count {
            return String::new();
        }
        match self.doc.extract_text(&[page_index as u32 + 1]) {
            Ok(text) => text,
            Err(e) => {
                warn!("text extraction failed on page {}: {}", page_index, e);
                String::new()
            }
        }
    }
}

/// Extract the text of every page in document order.
///
/// Unreadable pages yield empty strings so the returned vector always
/// has one entry per page.
pub fn collect_page_texts<S: PageSource>(source: &S) -> Vec<String> {
    (0..source.page_count())
        .map(|i| source.extract_text(i))
        .collect()
}
