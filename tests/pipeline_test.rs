//! Pure-pipeline tests: page texts through detection, strategy
//! selection, and job planning, without touching a PDF.

use splitbook::{
    choose_strategy, find_boundaries, find_boundaries_with_fallback, plan_jobs, FallbackChoice,
    SplitStrategy, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS,
};

/// A 100-page book: headings at pages 0, 20, 45, 80, with the
/// chapter title repeated in a running header on every page after
/// its heading.
fn textbook_pages() -> Vec<String> {
    let headings = [
        (0usize, 1u32, "Time Value of Money"),
        (20, 2, "Probability Concepts"),
        (45, 3, "Equity Valuation"),
        (80, 4, "Fixed Income"),
    ];

    let mut pages = vec![String::new(); 100];
    let mut current: Option<(u32, &str)> = None;
    for (i, page) in pages.iter_mut().enumerate() {
        if let Some(&(_, number, title)) = headings.iter().find(|h| h.0 == i) {
            *page = format!("Reading {number}: {title}\nLOS {number}.a body text");
            current = Some((number, title));
        } else if let Some((number, title)) = current {
            // Running header repeats the heading text.
            *page = format!("Reading {number} {title}\ninterior page {i}");
        }
    }
    pages
}

#[test]
fn detects_four_boundaries_despite_running_headers() {
    let pages = textbook_pages();
    let found = find_boundaries(&pages, &["Reading"]);

    assert_eq!(found.len(), 4);
    let pages_found: Vec<usize> = found.iter().map(|b| b.page_index).collect();
    assert_eq!(pages_found, vec![0, 20, 45, 80]);
    assert_eq!(found[2].title, "Equity Valuation");
}

#[test]
fn full_pipeline_yields_expected_jobs() {
    let pages = textbook_pages();
    let boundaries = find_boundaries_with_fallback(&pages, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS);
    let strategy = choose_strategy(boundaries, None).unwrap();
    let jobs = plan_jobs(&strategy, pages.len(), "Reading").unwrap();

    assert_eq!(jobs.len(), 4);
    let spans: Vec<(usize, usize)> = jobs.iter().map(|j| (j.range.start, j.range.end)).collect();
    assert_eq!(spans, vec![(0, 20), (20, 45), (45, 80), (80, 100)]);
    let counts: Vec<usize> = jobs.iter().map(|j| j.range.page_count()).collect();
    assert_eq!(counts, vec![20, 25, 35, 20]);
    assert_eq!(jobs[0].filename, "Reading_01_Time_Value_of_Money.pdf");
}

#[test]
fn secondary_keywords_rescue_an_undetected_book() {
    let mut pages = vec![String::new(); 30];
    pages[0] = "Unit 1 Kinematics".to_string();
    pages[15] = "Unit 2 Dynamics".to_string();

    let boundaries = find_boundaries_with_fallback(&pages, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS);
    assert_eq!(boundaries.len(), 2);

    let strategy = choose_strategy(boundaries, None).unwrap();
    assert!(matches!(strategy, SplitStrategy::Boundaries(_)));
}

#[test]
fn insufficient_detection_falls_back_to_fixed_parts() {
    let pages = vec!["no headings here".to_string(); 50];
    let boundaries = find_boundaries_with_fallback(&pages, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS);
    assert!(boundaries.is_empty());

    let strategy = choose_strategy(boundaries, Some(FallbackChoice::FixedParts(5))).unwrap();
    let jobs = plan_jobs(&strategy, pages.len(), "Reading").unwrap();
    assert_eq!(jobs.len(), 5);
    assert!(jobs.iter().all(|j| j.range.page_count() == 10));
}
