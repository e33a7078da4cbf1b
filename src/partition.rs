//! Page-range partitioning: turning boundaries, fixed sizes, or
//! operator-entered ranges into the intervals written out as files.
//!
//! All strategies except manual produce a gap-free, non-overlapping
//! cover of `[0, total_pages)`. Manual ranges are operator-controlled
//! and may deliberately skip pages.

use serde::Serialize;

use crate::detect::Boundary;
use crate::error::{Error, Result};
use crate::text::slugify;

/// Default filename prefix for output files.
pub const DEFAULT_PREFIX: &str = "Reading";

/// A contiguous, half-open page interval assigned to one output file.
///
/// `start` and `end` are zero-based page indexes; `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRange {
    /// Ordinal used in the output filename (1-based, or the parsed
    /// chapter number for boundary-based splits).
    pub ordinal: u32,
    /// First page of the range (zero-based, inclusive).
    pub start: usize,
    /// One past the last page of the range.
    pub end: usize,
    /// Title carried over from the boundary that opened this range.
    pub title: Option<String>,
}

impl PageRange {
    /// Number of pages covered by this range.
    pub fn page_count(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether this range covers no pages.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// How to partition the document into output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitStrategy {
    /// One range per detected boundary, each running to the next
    /// boundary's page (the last runs to the end of the document).
    Boundaries(Vec<Boundary>),
    /// Fixed page count per part; the last part is truncated.
    FixedPages(usize),
    /// Fixed number of parts of near-equal size.
    FixedParts(usize),
    /// Explicit zero-based half-open `(start, end)` pairs.
    Manual(Vec<(usize, usize)>),
}

/// Partition by detected boundaries.
///
/// Range `i` is `[b[i].page_index, b[i+1].page_index)`; the final
/// range runs to `total_pages`. Any pages before the first detected
/// boundary belong to the first range, so range 0 always starts at
/// page 0: a preface ahead of the first heading is treated as part of
/// reading 1, never dropped.
///
/// Expects the list as produced by the detector: sorted by chapter
/// number. If noisy detection put the numbers out of page order, a
/// range whose next boundary sits on an earlier page is clamped to
/// empty here and rejected later during job planning.
pub fn by_boundaries(boundaries: &[Boundary], total_pages: usize) -> Result<Vec<PageRange>> {
    if boundaries.is_empty() {
        return Err(Error::DetectionInsufficient { found: 0, min: crate::detect::MIN_BOUNDARIES });
    }
    if total_pages == 0 {
        return Err(Error::EmptyDocument);
    }

    let mut ranges = Vec::with_capacity(boundaries.len());
    for (i, b) in boundaries.iter().enumerate() {
        let start = if i == 0 { 0 } else { b.page_index };
        let end = match boundaries.get(i + 1) {
            Some(next) => next.page_index.max(start),
            None => total_pages,
        };
        ranges.push(PageRange {
            ordinal: b.number,
            start,
            end: end.min(total_pages),
            title: (!b.title.is_empty()).then(|| b.title.clone()),
        });
    }
    Ok(ranges)
}

/// Partition into chunks of `pages_per_part` pages, last chunk
/// truncated to the document end. Ordinals run 1..N.
pub fn by_fixed_pages(pages_per_part: usize, total_pages: usize) -> Result<Vec<PageRange>> {
    if pages_per_part == 0 {
        return Err(Error::InvalidRange("pages per part must be at least 1".into()));
    }
    if total_pages == 0 {
        return Err(Error::EmptyDocument);
    }

    let ranges = (0..total_pages)
        .step_by(pages_per_part)
        .enumerate()
        .map(|(i, start)| PageRange {
            ordinal: i as u32 + 1,
            start,
            end: (start + pages_per_part).min(total_pages),
            title: None,
        })
        .collect();
    Ok(ranges)
}

/// Partition into `parts` near-equal parts.
///
/// The remainder of `total_pages / parts` is distributed one page
/// each to the first `remainder` parts, keeping all part sizes
/// within one page of each other.
pub fn by_fixed_parts(parts: usize, total_pages: usize) -> Result<Vec<PageRange>> {
    if parts == 0 {
        return Err(Error::InvalidRange("part count must be at least 1".into()));
    }
    if total_pages == 0 {
        return Err(Error::EmptyDocument);
    }
    if parts > total_pages {
        return Err(Error::InvalidRange(format!(
            "cannot split {total_pages} pages into {parts} parts"
        )));
    }

    let base = total_pages / parts;
    let remainder = total_pages % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let extra = usize::from(i < remainder);
        let end = start + base + extra;
        ranges.push(PageRange {
            ordinal: i as u32 + 1,
            start,
            end,
            title: None,
        });
        start = end;
    }
    Ok(ranges)
}

/// Validate operator-entered ranges.
///
/// Each pair must satisfy `start < end` after clamping `end` to
/// `total_pages`, and `start` must lie inside the document. Full
/// coverage is deliberately NOT enforced: operators may skip front
/// matter or appendices. Ordinals run 1..N in entry order.
pub fn manual(pairs: &[(usize, usize)], total_pages: usize) -> Result<Vec<PageRange>> {
    if total_pages == 0 {
        return Err(Error::EmptyDocument);
    }

    let mut ranges = Vec::with_capacity(pairs.len());
    for (i, &(start, end)) in pairs.iter().enumerate() {
        if start >= total_pages {
            return Err(Error::PageOutOfRange(start, total_pages));
        }
        let end = end.min(total_pages);
        if start >= end {
            return Err(Error::InvalidRange(format!(
                "range {}..{} covers no pages",
                start, end
            )));
        }
        ranges.push(PageRange {
            ordinal: i as u32 + 1,
            start,
            end,
            title: None,
        });
    }
    Ok(ranges)
}

/// Build the partition for any strategy.
pub fn partition(strategy: &SplitStrategy, total_pages: usize) -> Result<Vec<PageRange>> {
    match strategy {
        SplitStrategy::Boundaries(b) => by_boundaries(b, total_pages),
        SplitStrategy::FixedPages(k) => by_fixed_pages(*k, total_pages),
        SplitStrategy::FixedParts(n) => by_fixed_parts(*n, total_pages),
        SplitStrategy::Manual(pairs) => manual(pairs, total_pages),
    }
}

/// Parse a 1-indexed inclusive `start-end` entry (e.g. `"21-45"`)
/// into a zero-based half-open pair. A single number is a one-page
/// range.
pub fn parse_range_entry(entry: &str) -> Result<(usize, usize)> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(Error::RangeParse("empty range entry".into()));
    }

    let (start_s, end_s) = match entry.split_once('-') {
        Some((s, e)) => (s.trim(), e.trim()),
        None => (entry, entry),
    };

    let start: usize = start_s
        .parse()
        .map_err(|_| Error::RangeParse(format!("invalid start page in '{entry}'")))?;
    let end: usize = end_s
        .parse()
        .map_err(|_| Error::RangeParse(format!("invalid end page in '{entry}'")))?;

    if start == 0 {
        return Err(Error::RangeParse(format!("pages are 1-indexed in '{entry}'")));
    }
    if end < start {
        return Err(Error::RangeParse(format!("end before start in '{entry}'")));
    }

    Ok((start - 1, end))
}

/// Derive the output filename for a range.
///
/// Ordinals are zero-padded to two digits. A non-empty title is
/// slugged and appended after an underscore; otherwise the ordinal
/// stands alone: `Reading_03_Equity_Valuation.pdf`, `Reading_04.pdf`.
pub fn output_filename(prefix: &str, range: &PageRange) -> String {
    let slug = range.title.as_deref().map(slugify).unwrap_or_default();
    if slug.is_empty() {
        format!("{}_{:02}.pdf", prefix, range.ordinal)
    } else {
        format!("{}_{:02}_{}.pdf", prefix, range.ordinal, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary(number: u32, page_index: usize, title: &str) -> Boundary {
        Boundary {
            number,
            page_index,
            label: "Reading".to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_by_boundaries_covers_document() {
        let bs = vec![
            boundary(1, 0, "One"),
            boundary(2, 20, "Two"),
            boundary(3, 45, "Three"),
            boundary(4, 80, "Four"),
        ];
        let ranges = by_boundaries(&bs, 100).unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!((ranges[0].start, ranges[0].end), (0, 20));
        assert_eq!((ranges[1].start, ranges[1].end), (20, 45));
        assert_eq!((ranges[2].start, ranges[2].end), (45, 80));
        assert_eq!((ranges[3].start, ranges[3].end), (80, 100));
        assert_eq!(
            ranges.iter().map(PageRange::page_count).collect::<Vec<_>>(),
            vec![20, 25, 35, 20]
        );
    }

    #[test]
    fn test_by_boundaries_attaches_leading_pages() {
        // A preface before the first heading belongs to reading 1.
        let bs = vec![boundary(1, 12, ""), boundary(2, 40, "")];
        let ranges = by_boundaries(&bs, 90).unwrap();
        assert_eq!(ranges[0].start, 0);
        assert_eq!(ranges[0].end, 40);
        assert_eq!(ranges[1].start, 40);
        assert_eq!(ranges[1].end, 90);
    }

    #[test]
    fn test_by_boundaries_misordered_pages_clamp_to_empty() {
        // Number order contradicting page order: the squeezed range
        // ends up empty rather than reversed.
        let bs = vec![boundary(1, 0, ""), boundary(2, 50, ""), boundary(3, 10, "")];
        let ranges = by_boundaries(&bs, 60).unwrap();
        assert_eq!((ranges[0].start, ranges[0].end), (0, 50));
        assert!(ranges[1].is_empty());
        assert_eq!((ranges[2].start, ranges[2].end), (10, 60));
    }

    #[test]
    fn test_by_boundaries_empty_input() {
        assert!(matches!(
            by_boundaries(&[], 10),
            Err(Error::DetectionInsufficient { found: 0, .. })
        ));
    }

    #[test]
    fn test_by_fixed_pages() {
        let ranges = by_fixed_pages(30, 100).unwrap();
        assert_eq!(ranges.len(), 4);
        assert_eq!((ranges[0].start, ranges[0].end), (0, 30));
        assert_eq!((ranges[3].start, ranges[3].end), (90, 100));
        assert_eq!(ranges[3].ordinal, 4);
    }

    #[test]
    fn test_by_fixed_pages_exact_multiple() {
        let ranges = by_fixed_pages(25, 100).unwrap();
        assert_eq!(ranges.len(), 4);
        assert!(ranges.iter().all(|r| r.page_count() == 25));
    }

    #[test]
    fn test_by_fixed_pages_zero_rejected() {
        assert!(by_fixed_pages(0, 100).is_err());
    }

    #[test]
    fn test_by_fixed_parts_remainder_to_early_parts() {
        let ranges = by_fixed_parts(4, 105).unwrap();
        assert_eq!(
            ranges.iter().map(PageRange::page_count).collect::<Vec<_>>(),
            vec![27, 26, 26, 26]
        );
    }

    #[test]
    fn test_by_fixed_parts_properties() {
        for total in [1usize, 7, 53, 100, 105, 997] {
            for parts in [1usize, 2, 3, 4, 7] {
                if parts > total {
                    continue;
                }
                let ranges = by_fixed_parts(parts, total).unwrap();
                assert_eq!(ranges.len(), parts);
                // Contiguous, non-overlapping, exact cover.
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges.last().unwrap().end, total);
                for w in ranges.windows(2) {
                    assert_eq!(w[0].end, w[1].start);
                }
                // Sizes within one page of each other.
                let sizes: Vec<usize> = ranges.iter().map(PageRange::page_count).collect();
                let max = sizes.iter().max().unwrap();
                let min = sizes.iter().min().unwrap();
                assert!(max - min <= 1, "{total} pages / {parts} parts: {sizes:?}");
            }
        }
    }

    #[test]
    fn test_by_fixed_parts_more_parts_than_pages() {
        assert!(by_fixed_parts(10, 5).is_err());
    }

    #[test]
    fn test_manual_allows_gaps() {
        let ranges = manual(&[(0, 10), (30, 40)], 50).unwrap();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[1].ordinal, 2);
    }

    #[test]
    fn test_manual_clamps_end() {
        let ranges = manual(&[(40, 100)], 50).unwrap();
        assert_eq!(ranges[0].end, 50);
    }

    #[test]
    fn test_manual_rejects_empty_range() {
        assert!(matches!(manual(&[(10, 10)], 50), Err(Error::InvalidRange(_))));
        assert!(matches!(manual(&[(60, 70)], 50), Err(Error::PageOutOfRange(60, 50))));
    }

    #[test]
    fn test_parse_range_entry() {
        assert_eq!(parse_range_entry("1-20").unwrap(), (0, 20));
        assert_eq!(parse_range_entry(" 21 - 45 ").unwrap(), (20, 45));
        assert_eq!(parse_range_entry("7").unwrap(), (6, 7));
    }

    #[test]
    fn test_parse_range_entry_errors() {
        assert!(matches!(parse_range_entry(""), Err(Error::RangeParse(_))));
        assert!(matches!(parse_range_entry("abc"), Err(Error::RangeParse(_))));
        assert!(matches!(parse_range_entry("0-5"), Err(Error::RangeParse(_))));
        assert!(matches!(parse_range_entry("9-3"), Err(Error::RangeParse(_))));
    }

    #[test]
    fn test_output_filename() {
        let with_title = PageRange {
            ordinal: 3,
            start: 0,
            end: 10,
            title: Some("Equity Valuation: Concepts".to_string()),
        };
        assert_eq!(
            output_filename(DEFAULT_PREFIX, &with_title),
            "Reading_03_Equity_Valuation_Concepts.pdf"
        );

        let bare = PageRange {
            ordinal: 12,
            start: 0,
            end: 10,
            title: None,
        };
        assert_eq!(output_filename(DEFAULT_PREFIX, &bare), "Reading_12.pdf");
    }

    #[test]
    fn test_output_filename_unusable_title_falls_back() {
        let junk_title = PageRange {
            ordinal: 1,
            start: 0,
            end: 5,
            title: Some("???".to_string()),
        };
        assert_eq!(output_filename(DEFAULT_PREFIX, &junk_title), "Reading_01.pdf");
    }
}
