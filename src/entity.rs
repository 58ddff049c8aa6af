//! Entity types and structures for affiliation NER.

use serde::{Deserialize, Serialize};

/// Entity type classification.
///
/// Covers the categories affiliation resolution consumes (OntoNotes-style
/// labels as produced by common NER models), with a catch-all for
/// everything else a model may emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Geopolitical entity: country, city, state (GPE)
    Geopolitical,
    /// Organization name (ORG)
    Organization,
    /// Facility: building, campus, named site (FAC)
    Facility,
    /// Other/Miscellaneous entity type
    Other(String),
}

impl EntityType {
    /// Convert to standard label string.
    #[must_use]
    pub fn as_label(&self) -> &str {
        match self {
            EntityType::Geopolitical => "GPE",
            EntityType::Organization => "ORG",
            EntityType::Facility => "FAC",
            EntityType::Other(s) => s.as_str(),
        }
    }

    /// Parse from standard label string.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "GPE" | "B-GPE" | "I-GPE" => EntityType::Geopolitical,
            "ORG" | "ORGANIZATION" | "B-ORG" | "I-ORG" => EntityType::Organization,
            "FAC" | "FACILITY" | "B-FAC" | "I-FAC" => EntityType::Facility,
            other => EntityType::Other(other.to_string()),
        }
    }

    /// Whether this type names an institution (organization or facility).
    ///
    /// Institute resolution treats both categories as candidates.
    #[must_use]
    pub fn is_institutional(&self) -> bool {
        matches!(self, EntityType::Organization | EntityType::Facility)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// A recognized named entity span.
///
/// Ordering within an extraction result reflects the model's scan order.
/// Resolution consumers iterate spans from the end: the last mention in an
/// affiliation string (country after institute after department) is the
/// preferred candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity text (surface form)
    pub text: String,
    /// Entity type classification
    pub entity_type: EntityType,
    /// Start position (byte offset in original text)
    pub start: usize,
    /// End position (byte offset, exclusive)
    pub end: usize,
}

impl Entity {
    /// Create a new entity span.
    #[must_use]
    pub fn new(text: impl Into<String>, entity_type: EntityType, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            entity_type,
            start,
            end,
        }
    }
}
