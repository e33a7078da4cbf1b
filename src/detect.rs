//! Boundary detection: locating chapter starts in extracted page text.
//!
//! The detector is a pure function over an ordered sequence of page
//! texts. It scans for keyword + number headings ("Reading 12",
//! "Chapter 3: Title…"), suppresses repeats of the same heading on
//! later pages (running headers and footers repeat the chapter title
//! on every page), and returns the surviving boundaries sorted by
//! parsed chapter number.

use log::debug;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use crate::text::{normalize_title, sanitize};

/// Minimum number of boundaries for detection to count as usable.
///
/// Below this, callers should fall back to a fixed-size or manual
/// partition strategy.
pub const MIN_BOUNDARIES: usize = 2;

/// Keywords tried first when scanning for chapter starts.
pub const PRIMARY_KEYWORDS: &[&str] = &["Reading", "Chapter", "Lesson"];

/// Broader markers tried when the primary set finds nothing.
pub const SECONDARY_KEYWORDS: &[&str] = &["Learning Outcome", "Introduction", "Topic", "Unit"];

/// A detected start-of-chapter marker.
///
/// `number` is parsed from the matched text and is not guaranteed
/// unique or contiguous across a document. `title` is a best-effort
/// caption captured from the text trailing the heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boundary {
    /// Chapter/reading ordinal parsed from the matched text.
    pub number: u32,
    /// Zero-based page index where the heading was found.
    pub page_index: usize,
    /// The keyword that matched (as configured, original casing).
    pub label: String,
    /// Normalized trailing caption, possibly empty.
    pub title: String,
}

/// One keyword's compiled match patterns, in priority order.
struct KeywordPatterns {
    keyword: String,
    /// `<keyword> <digits> <separator>? <up to 80 trailing chars>`.
    titled: Regex,
    /// `<keyword> <digits>` with no title capture.
    bare: Regex,
}

fn compile_patterns(keywords: &[&str]) -> Vec<KeywordPatterns> {
    keywords
        .iter()
        .map(|kw| {
            let escaped = regex::escape(kw);
            KeywordPatterns {
                keyword: (*kw).to_string(),
                // Title capture stops at end of line; newline runs in
                // captured text are collapsed during normalization.
                titled: Regex::new(&format!(r"(?i){escaped}\s+(\d+)[.:\s]*(.{{0,80}})"))
                    .expect("titled boundary pattern is valid"),
                bare: Regex::new(&format!(r"(?i){escaped}\s+(\d+)"))
                    .expect("bare boundary pattern is valid"),
            }
        })
        .collect()
}

/// Scan page texts for chapter boundaries using the given keywords.
///
/// Pages are scanned in order; for each page every keyword is tried
/// with its titled pattern first, then its bare pattern. A
/// `(lowercased keyword, number)` pair is only ever accepted once:
/// the first occurrence in page order wins, so a heading repeated in
/// a running header on later pages produces no duplicate boundary.
///
/// The result is sorted by parsed chapter number, not by page order.
/// When extraction noise misreads a heading number this can misorder
/// the output; that matches the long-standing behavior of the
/// original splitter and is deliberately left alone.
///
/// # Example
///
/// ```
/// use splitbook::detect::find_boundaries;
///
/// let pages = vec![
///     "Reading 1: Time Value of Money".to_string(),
///     "interior page".to_string(),
///     "Reading 2: Probability".to_string(),
/// ];
/// let found = find_boundaries(&pages, &["Reading"]);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].page_index, 0);
/// assert_eq!(found[1].number, 2);
/// ```
pub fn find_boundaries(page_texts: &[String], keywords: &[&str]) -> Vec<Boundary> {
    let patterns = compile_patterns(keywords);
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    let mut boundaries = Vec::new();

    for (page_index, raw) in page_texts.iter().enumerate() {
        let text = sanitize(raw);
        if text.is_empty() {
            continue;
        }

        for pat in &patterns {
            accept_first_new(&pat.titled, &text, &pat.keyword, page_index, &mut seen, &mut boundaries);
            accept_first_new(&pat.bare, &text, &pat.keyword, page_index, &mut seen, &mut boundaries);
        }
    }

    // Sorted by parsed chapter number, not page position (see above).
    boundaries.sort_by_key(|b| b.number);
    boundaries
}

/// Run one pattern over a page, accepting the first match whose
/// dedup key has not been seen before.
fn accept_first_new(
    pattern: &Regex,
    text: &str,
    keyword: &str,
    page_index: usize,
    seen: &mut HashSet<(String, u32)>,
    boundaries: &mut Vec<Boundary>,
) {
    for caps in pattern.captures_iter(text) {
        let Ok(number) = caps[1].parse::<u32>() else {
            // Digit runs longer than a u32 are page artifacts, not
            // chapter numbers.
            continue;
        };

        let key = (keyword.to_lowercase(), number);
        if seen.contains(&key) {
            continue;
        }

        let title = caps
            .get(2)
            .map(|m| normalize_title(m.as_str()))
            .unwrap_or_default();

        debug!(
            "boundary: {} {} at page {} ({:.40})",
            keyword, number, page_index, title
        );

        seen.insert(key);
        boundaries.push(Boundary {
            number,
            page_index,
            label: keyword.to_string(),
            title,
        });
        break;
    }
}

/// Scan with the primary keywords, retrying with the secondary set
/// when the primary scan finds nothing at all.
///
/// The returned list may still hold fewer than [`MIN_BOUNDARIES`]
/// entries; deciding what to do about that is the caller's job (see
/// [`crate::split::choose_strategy`]).
pub fn find_boundaries_with_fallback(
    page_texts: &[String],
    primary: &[&str],
    secondary: &[&str],
) -> Vec<Boundary> {
    let found = find_boundaries(page_texts, primary);
    if !found.is_empty() {
        return found;
    }
    debug!("primary keywords found nothing, rescanning with secondary set");
    find_boundaries(page_texts, secondary)
}

/// Whether a boundary list is large enough to drive a split.
pub fn is_sufficient(boundaries: &[Boundary]) -> bool {
    boundaries.len() >= MIN_BOUNDARIES
}
