//! Text cleanup for extracted page content and derived filenames.
//!
//! PDF text extraction routinely leaks control characters and odd
//! whitespace into the output. Everything that feeds the boundary
//! patterns or a filename goes through here first.

use unicode_normalization::UnicodeNormalization;

/// Maximum length of a normalized boundary title, in characters.
pub const MAX_TITLE_LEN: usize = 80;

/// Maximum length of a filename slug, in characters.
pub const MAX_SLUG_LEN: usize = 40;

/// Characters that are illegal in filenames on common filesystems.
const ILLEGAL_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strip control characters left behind by PDF text extraction.
///
/// Removes NUL and the C0/C1 control ranges (0x00–0x08, 0x0B–0x0C,
/// 0x0E–0x1F, 0x7F–0x9F) while keeping tab, newline, and carriage
/// return so that line structure survives for pattern matching.
/// Idempotent: applying it twice yields the same result as once.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|&c| !is_extraction_junk(c)).collect()
}

fn is_extraction_junk(c: char) -> bool {
    matches!(c,
        '\u{00}'..='\u{08}' | '\u{0B}'..='\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

/// Normalize a captured boundary title into a short caption.
///
/// Collapses runs of newlines and whitespace to single spaces,
/// re-applies the control-character sanitizer, normalizes to Unicode
/// NFC, and truncates to [`MAX_TITLE_LEN`] characters.
pub fn normalize_title(raw: &str) -> String {
    let cleaned = sanitize(raw);
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.nfc().take(MAX_TITLE_LEN).collect()
}

/// Derive a filename-safe slug from a title.
///
/// Strips characters illegal in filenames, truncates to
/// [`MAX_SLUG_LEN`] characters, then collapses whitespace runs to
/// single underscores. Returns an empty string when nothing usable
/// remains, in which case callers should omit the slug entirely.
pub fn slugify(title: &str) -> String {
    let stripped: String = sanitize(title)
        .chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .take(MAX_SLUG_LEN)
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join("_")
}
