//! # affil
//!
//! Affiliation resolution for bibliographic records.
//!
//! Takes free-text author affiliation strings and resolves each one to a
//! normalized country name, an institute name, and an institute identifier,
//! using named-entity recognition plus approximate string matching against
//! a supplied reference table.
//!
//! - **Field extraction**: flatten parsed articles into one row per
//!   (article, author, affiliation) triple; derive email and postal code.
//! - **Resolution**: country via the ISO 3166-1 reference, institute via
//!   exact-then-fuzzy matching with a fixed score cutoff, identifier via a
//!   join on the reference table.
//! - **Memoization**: every resolver runs its inference / fuzzy search at
//!   most once per distinct input for the life of the resolver.
//! - **Batch**: data-parallel over rows (rayon), output in input order.
//!
//! ## Quick start
//!
//! ```rust
//! use affil::{Entity, EntityType, InstituteTable, MockModel, Resolver};
//!
//! let table = InstituteTable::from_pairs([("Sample Institute", "GRID1234")])?;
//! // In production, inject a real NER backend implementing `Model`.
//! let model = MockModel::new("demo").with_entities(vec![
//!     Entity::new("Sample Institute", EntityType::Organization, 14, 30),
//! ]);
//! let resolver = Resolver::new(model);
//!
//! let institute = resolver.resolve_institute("University of Sample Institute", &table);
//! assert_eq!(institute.as_deref(), Some("Sample Institute"));
//! let id = resolver.lookup_identifier(institute.as_deref(), &table);
//! assert_eq!(id.as_deref(), Some("GRID1234"));
//! # Ok::<(), affil::Error>(())
//! ```
//!
//! ## Design notes
//!
//! - The NER model is an opaque capability behind the [`Model`] trait,
//!   injected into the [`Resolver`]; swap in [`MockModel`] for tests.
//! - "No match" is a terminal `None`, never an error. The only fatal
//!   condition is an unusable reference table.
//! - Span selection iterates from the end of the extraction result: the
//!   last mention in an affiliation string is the preferred candidate.

#![warn(missing_docs)]

pub mod batch;
pub mod cache;
pub mod countries;
mod entity;
mod error;
pub mod fields;
pub mod record;
pub mod resolve;
pub mod similarity;
pub mod table;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Re-exports
pub use cache::{CacheKey, ResolutionCache, ResolverKind};
pub use entity::{Entity, EntityType};
pub use error::{Error, Result};
pub use fields::{extract_email, extract_postal_code, flatten_articles};
pub use record::{ArticleSource, AuthorSource, Record};
pub use resolve::{Resolver, FUZZY_SCORE_CUTOFF};
pub use table::{InstituteEntry, InstituteTable};

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use affil::prelude::*;
    //!
    //! let resolver = Resolver::new(MockModel::new("demo"));
    //! assert_eq!(resolver.resolve_country("nowhere"), None);
    //! ```
    pub use crate::entity::{Entity, EntityType};
    pub use crate::error::{Error, Result};
    pub use crate::record::{ArticleSource, AuthorSource, Record};
    pub use crate::resolve::Resolver;
    pub use crate::table::InstituteTable;
    pub use crate::{flatten_articles, MockModel, Model};
}

/// Trait for entity-extraction backends.
///
/// The resolver treats the model as a pure, possibly slow, CPU-bound
/// function from text to labeled spans: deterministic for a fixed
/// implementation and input, no retries. Span order is the model's scan
/// order; consumers pick candidates from the end.
///
/// Real NER backends (ONNX transformer models, pattern extractors, remote
/// inference) live in downstream crates and implement this trait; the
/// in-crate [`MockModel`] covers testing.
pub trait Model: Send + Sync {
    /// Extract entity spans from text, in scan order.
    fn extract_entities(&self, text: &str) -> Result<Vec<Entity>>;

    /// Model name/identifier.
    fn name(&self) -> &'static str {
        "unknown"
    }

    /// Human-readable description of the model.
    fn description(&self) -> &'static str {
        "Unknown entity extraction model"
    }

    /// Whether the model is available and ready.
    fn is_available(&self) -> bool {
        true
    }
}

/// A mock entity-extraction model for testing.
///
/// Returns canned spans: a default set for any text, plus optional
/// per-text overrides. Counts extraction calls so memoization tests can
/// assert at-most-once inference. Clones share the call counter.
///
/// # Example
///
/// ```rust
/// use affil::{Entity, EntityType, MockModel, Model};
///
/// let mock = MockModel::new("test-mock").with_entities(vec![
///     Entity::new("France", EntityType::Geopolitical, 0, 6),
/// ]);
///
/// let spans = mock.extract_entities("France").unwrap();
/// assert_eq!(spans.len(), 1);
/// assert_eq!(mock.call_count(), 1);
/// ```
#[derive(Clone)]
pub struct MockModel {
    name: &'static str,
    default_entities: Vec<Entity>,
    responses: HashMap<String, Vec<Entity>>,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockModel {
    /// Create a new mock model that extracts nothing.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            default_entities: Vec::new(),
            responses: HashMap::new(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Set the spans returned for any text without an override.
    #[must_use]
    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.default_entities = entities;
        self
    }

    /// Set the spans returned for one exact input text.
    #[must_use]
    pub fn with_response(mut self, text: impl Into<String>, entities: Vec<Entity>) -> Self {
        self.responses.insert(text.into(), entities);
        self
    }

    /// Make every extraction call fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Number of extraction calls made so far, across all clones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Model for MockModel {
    fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::inference("mock model configured to fail"));
        }
        Ok(self
            .responses
            .get(text)
            .unwrap_or(&self.default_entities)
            .clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        "Mock entity extraction model for testing"
    }
}
