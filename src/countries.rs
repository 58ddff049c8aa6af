//! Country reference lookup.
//!
//! Normalizes geopolitical entity text against the ISO 3166-1 reference
//! (via `rust_iso3166`): exact alpha-2 / alpha-3 / name matches first, then
//! a fuzzy pass over official names with a score cutoff. The reference is
//! static for the process lifetime, so country resolution is memoized by
//! input text alone.

use crate::similarity::extract_one;

/// Minimum partial-overlap score for a fuzzy country-name match.
pub const COUNTRY_SCORE_CUTOFF: f64 = 90.0;

/// Alias corrections applied before lookup. The ISO reference does not
/// recognize "UK"; NER models emit it constantly for British affiliations.
fn normalize_alias(text: &str) -> &str {
    match text {
        "UK" => "GB",
        other => other,
    }
}

/// Resolve free-form geopolitical text to a canonical country name.
///
/// Lookup order: alias correction, exact alpha-2 code, exact alpha-3 code,
/// exact name (case-insensitive), fuzzy match over all names with
/// [`COUNTRY_SCORE_CUTOFF`]. Returns `None` when nothing matches.
///
/// # Examples
///
/// ```
/// use affil::countries::lookup;
///
/// assert!(lookup("GB").is_some());
/// assert_eq!(lookup("UK"), lookup("GB"));
/// assert_eq!(lookup("Boston"), None);
/// ```
#[must_use]
pub fn lookup(text: &str) -> Option<&'static str> {
    let query = normalize_alias(text.trim());
    if query.is_empty() {
        return None;
    }

    if query.len() == 2 {
        if let Some(country) = rust_iso3166::from_alpha2(&query.to_ascii_uppercase()) {
            return Some(country.name);
        }
    }
    if query.len() == 3 {
        if let Some(country) = rust_iso3166::from_alpha3(&query.to_ascii_uppercase()) {
            return Some(country.name);
        }
    }

    for country in rust_iso3166::ALL {
        if country.name.eq_ignore_ascii_case(query) {
            return Some(country.name);
        }
    }

    let names = rust_iso3166::ALL.iter().map(|c| c.name);
    extract_one(query, names, COUNTRY_SCORE_CUTOFF).map(|(name, _)| name)
}
