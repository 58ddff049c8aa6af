//! Row and source-record structures for affiliation resolution.
//!
//! The record source (external to this crate) parses raw bibliographic
//! documents and hands over [`ArticleSource`] values; this crate flattens
//! them into one [`Record`] per (article, author, affiliation) triple and
//! fills the derived columns during batch resolution.

use serde::{Deserialize, Serialize};

/// One flat row: an (article, author, affiliation) triple.
///
/// An author with N affiliation strings produces N records sharing the
/// article and author fields. The three derived fields (`country`,
/// `institute`, `institute_id`) start as `None` and are populated exactly
/// once by batch resolution; `institute_id` depends on `institute`.
/// Absence of a match leaves a derived field `None`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Article title, if present in the source.
    pub title: Option<String>,
    /// Publication year, kept as text as the source supplies it.
    pub year: Option<String>,
    /// Article identifier.
    pub pmid: Option<String>,
    /// Keyword texts; `None` when the source had no keyword list at all.
    pub keywords: Option<Vec<String>>,
    /// Subject-heading identifiers; `None` when the source had no list.
    pub subject_codes: Option<Vec<String>>,

    /// Author forename.
    pub forename: Option<String>,
    /// Author last name.
    pub lastname: Option<String>,
    /// Author initials.
    pub initials: Option<String>,

    /// The raw affiliation text this row was built from.
    pub affiliation: String,
    /// Email address extracted from the affiliation text.
    pub email: Option<String>,
    /// Postal code extracted from the affiliation text.
    pub postal_code: Option<String>,

    /// Resolved canonical country name (derived).
    pub country: Option<String>,
    /// Resolved canonical institute name (derived).
    pub institute: Option<String>,
    /// Reference identifier of the resolved institute (derived).
    pub institute_id: Option<String>,
}

/// An externally-parsed article structure, as supplied by the record source.
///
/// Optional list fields distinguish "list container absent" (`None`) from
/// "container present but empty" (`Some(vec![])`); flattening preserves
/// that distinction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    /// Article title.
    pub title: Option<String>,
    /// Publication year.
    pub year: Option<String>,
    /// Article identifier.
    pub pmid: Option<String>,
    /// Keyword texts, `None` when the keyword list container is absent.
    pub keywords: Option<Vec<String>>,
    /// Subject-heading identifiers, `None` when the container is absent.
    pub subject_codes: Option<Vec<String>>,
    /// Authors in document order.
    pub authors: Vec<AuthorSource>,
}

/// An externally-parsed author structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorSource {
    /// Author forename.
    pub forename: Option<String>,
    /// Author last name.
    pub lastname: Option<String>,
    /// Author initials.
    pub initials: Option<String>,
    /// Raw affiliation strings attached to this author, in document order.
    pub affiliations: Vec<String>,
}
