//! Text similarity utilities for institute name matching.
//!
//! Provides the partial-overlap scorer used by fuzzy institute resolution:
//! the score of the shorter string against the best-aligned equal-length
//! window of the longer one, on a 0-100 scale.

use strsim::normalized_levenshtein;

/// Compute partial-overlap similarity between two strings.
///
/// Returns a value in [0.0, 100.0] where:
/// - 100.0 = the shorter string appears verbatim inside the longer
/// - 0.0 = no overlap at all (or one side empty while the other is not)
///
/// The shorter string is slid across every equal-length character window
/// of the longer string; the best window's normalized edit similarity is
/// the score. This makes "Sample Institut" score 100 against
/// "Sample Institute" while "Zebra Corp" scores near zero.
///
/// # Examples
///
/// ```
/// use affil::similarity::partial_ratio;
///
/// assert!((partial_ratio("Sample Institute", "Sample Institute") - 100.0).abs() < 0.001);
/// assert!(partial_ratio("Sample Institut", "Sample Institute") >= 90.0);
/// assert!(partial_ratio("Zebra Corp", "Sample Institute") < 50.0);
/// ```
#[must_use]
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let longer_chars: Vec<char> = longer.chars().collect();
    let window = shorter.chars().count();

    let mut best = 0.0f64;
    for start in 0..=(longer_chars.len() - window) {
        let slice: String = longer_chars[start..start + window].iter().collect();
        let score = normalized_levenshtein(shorter, &slice) * 100.0;
        if score > best {
            best = score;
        }
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Find the best-scoring choice for a query, subject to a score cutoff.
///
/// Scans choices in order and keeps the first one with the strictly highest
/// score, so earlier choices win ties. Returns `None` when no choice meets
/// the cutoff.
pub fn extract_one<'a, I>(query: &str, choices: I, score_cutoff: f64) -> Option<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for choice in choices {
        let score = partial_ratio(query, choice);
        if score >= score_cutoff && best.map_or(true, |(_, s)| score > s) {
            best = Some((choice, score));
        }
    }
    best
}
