//! Field extractors: flattening source articles into rows and deriving
//! email / postal-code fields from raw affiliation text.
//!
//! Everything here is pure. Missing optional fields degrade to `None`,
//! never to an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{ArticleSource, AuthorSource, Record};

/// Email address: word/digit/dot local part, "@", dotted domain ending in
/// an alphabetic top-level label. A sentence period directly after the
/// address is not part of the match.
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w][\w.]*@[\w.-]+\.[A-Za-z]{2,}").unwrap());

/// Postal codes: US 5-digit (optional dash/space + 4), Canadian
/// letter-digit-letter digit-letter-digit, UK outward + inward code.
/// One combined search; leftmost match wins, then declaration order.
static POSTAL_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b\d{5}(?:[-\s]\d{4})?\b|\b[A-Za-z]\d[A-Za-z][ -]?\d[A-Za-z]\d\b|\b[A-Z]{1,2}\d[A-Z\d]? ?\d[A-Z]{2}\b",
    )
    .unwrap()
});

/// Return the first email-like substring, if any.
#[must_use]
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// Return the first postal-code-like substring, if any.
#[must_use]
pub fn extract_postal_code(text: &str) -> Option<String> {
    POSTAL_CODE.find(text).map(|m| m.as_str().to_string())
}

/// Flatten articles into one [`Record`] per (article, author, affiliation)
/// triple.
///
/// Article and author fields are copied into every row they cover; email
/// and postal code are derived per affiliation string. Authors without
/// affiliations contribute no rows.
#[must_use]
pub fn flatten_articles(articles: &[ArticleSource]) -> Vec<Record> {
    let mut rows = Vec::new();
    for article in articles {
        for author in &article.authors {
            for affiliation in &author.affiliations {
                rows.push(build_row(article, author, affiliation));
            }
        }
    }
    rows
}

fn build_row(article: &ArticleSource, author: &AuthorSource, affiliation: &str) -> Record {
    Record {
        title: article.title.clone(),
        year: article.year.clone(),
        pmid: article.pmid.clone(),
        keywords: article.keywords.clone(),
        subject_codes: article.subject_codes.clone(),
        forename: author.forename.clone(),
        lastname: author.lastname.clone(),
        initials: author.initials.clone(),
        affiliation: affiliation.to_string(),
        email: extract_email(affiliation),
        postal_code: extract_postal_code(affiliation),
        country: None,
        institute: None,
        institute_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_email() {
        let affiliation = "University of Sample, sample@university.edu";
        assert_eq!(
            extract_email(affiliation).as_deref(),
            Some("sample@university.edu")
        );
    }

    #[test]
    fn test_extract_email_trailing_period() {
        // PubMed affiliations often end "Electronic address: x@y.edu."
        let affiliation = "Electronic address: jane.doe@lab.ac.uk.";
        assert_eq!(
            extract_email(affiliation).as_deref(),
            Some("jane.doe@lab.ac.uk")
        );
    }

    #[test]
    fn test_extract_email_none() {
        assert_eq!(extract_email("University of Sample"), None);
    }

    #[test]
    fn test_extract_postal_code_regions() {
        assert_eq!(extract_postal_code("12345").as_deref(), Some("12345"));
        assert_eq!(
            extract_postal_code("Boston, MA 02115-1234").as_deref(),
            Some("02115-1234")
        );
        assert_eq!(extract_postal_code("K1A 0B1").as_deref(), Some("K1A 0B1"));
        assert_eq!(extract_postal_code("W1A 1AA").as_deref(), Some("W1A 1AA"));
    }

    #[test]
    fn test_extract_postal_code_leftmost_wins() {
        let text = "Ottawa K1A 0B1, London W1A 1AA";
        assert_eq!(extract_postal_code(text).as_deref(), Some("K1A 0B1"));
    }

    #[test]
    fn test_extract_postal_code_none() {
        assert_eq!(
            extract_postal_code("University of Sample, sample@university.edu"),
            None
        );
    }

    fn sample_article() -> ArticleSource {
        ArticleSource {
            title: Some("Sample Article".into()),
            year: Some("2023".into()),
            pmid: Some("123456".into()),
            keywords: Some(vec!["Keyword1".into(), "Keyword2".into()]),
            subject_codes: Some(vec!["D001".into()]),
            authors: vec![AuthorSource {
                forename: Some("John".into()),
                lastname: Some("Doe".into()),
                initials: Some("JD".into()),
                affiliations: vec![
                    "University of Sample, sample@university.edu".into(),
                    "Sample Hospital, London W1A 1AA, UK".into(),
                ],
            }],
        }
    }

    #[test]
    fn test_flatten_one_row_per_affiliation() {
        let rows = flatten_articles(&[sample_article()]);
        assert_eq!(rows.len(), 2);

        // Article and author fields are shared across both rows.
        for row in &rows {
            assert_eq!(row.title.as_deref(), Some("Sample Article"));
            assert_eq!(row.pmid.as_deref(), Some("123456"));
            assert_eq!(row.lastname.as_deref(), Some("Doe"));
            assert_eq!(row.keywords.as_ref().unwrap().len(), 2);
            assert_eq!(row.subject_codes.as_deref(), Some(&["D001".into()][..]));
        }

        assert_eq!(rows[0].email.as_deref(), Some("sample@university.edu"));
        assert_eq!(rows[0].postal_code, None);
        assert_eq!(rows[1].email, None);
        assert_eq!(rows[1].postal_code.as_deref(), Some("W1A 1AA"));
    }

    #[test]
    fn test_flatten_missing_optionals_stay_none() {
        let article = ArticleSource {
            authors: vec![AuthorSource {
                affiliations: vec!["Somewhere".into()],
                ..Default::default()
            }],
            ..Default::default()
        };

        let rows = flatten_articles(&[article]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.title, None);
        assert_eq!(row.keywords, None);
        assert_eq!(row.subject_codes, None);
        assert_eq!(row.forename, None);
    }

    #[test]
    fn test_flatten_author_without_affiliations() {
        let article = ArticleSource {
            authors: vec![AuthorSource::default()],
            ..Default::default()
        };
        assert!(flatten_articles(&[article]).is_empty());
    }

    #[test]
    fn test_flatten_empty_keyword_list_is_not_none() {
        let article = ArticleSource {
            keywords: Some(vec![]),
            authors: vec![AuthorSource {
                affiliations: vec!["Somewhere".into()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let rows = flatten_articles(&[article]);
        assert_eq!(rows[0].keywords, Some(vec![]));
    }
}
