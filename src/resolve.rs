//! Country, institute, and identifier resolution.
//!
//! A [`Resolver`] owns the injected entity-extraction capability and the
//! resolution cache. Every resolution is memoized: at most one inference /
//! fuzzy-search per distinct key for the life of the resolver.
//!
//! Candidate selection scans extracted spans from the end. Affiliation
//! strings tend to run department, institute, city, country, so the last
//! mention of a category is the most reliable one. This is a deliberate
//! tie-break; keep it as iterate-from-end.

use tracing::{debug, warn};

use crate::cache::{CacheKey, ResolutionCache, ResolverKind};
use crate::countries;
use crate::entity::{Entity, EntityType};
use crate::similarity::extract_one;
use crate::table::InstituteTable;
use crate::Model;

/// Minimum partial-overlap score for a fuzzy institute match (0-100).
pub const FUZZY_SCORE_CUTOFF: f64 = 90.0;

/// Resolves affiliation strings to countries, institutes, and identifiers.
pub struct Resolver {
    model: Box<dyn Model>,
    cache: ResolutionCache,
}

impl Resolver {
    /// Create a resolver around an entity-extraction model.
    pub fn new(model: impl Model + 'static) -> Self {
        Self::from_boxed(Box::new(model))
    }

    /// Create a resolver around an already-boxed model.
    #[must_use]
    pub fn from_boxed(model: Box<dyn Model>) -> Self {
        Self {
            model,
            cache: ResolutionCache::new(),
        }
    }

    /// The resolution cache. Exposed so tests can inspect or reset it.
    #[must_use]
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// The injected model.
    #[must_use]
    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    /// Extract entities, downgrading a model failure to an empty span set.
    ///
    /// A single row's inference failure must never abort a batch.
    fn entities(&self, text: &str) -> Vec<Entity> {
        match self.model.extract_entities(text) {
            Ok(spans) => spans,
            Err(err) => {
                warn!(model = self.model.name(), error = %err, "entity extraction failed, treating as no entities");
                Vec::new()
            }
        }
    }

    /// Resolve the affiliation text to a canonical country name.
    ///
    /// Scans GEOPOLITICAL spans from the end; the first span the country
    /// reference recognizes wins. A span the reference rejects does not
    /// stop the scan. Memoized by input text alone (the country reference
    /// is static for the process lifetime).
    pub fn resolve_country(&self, text: &str) -> Option<String> {
        let key = CacheKey::of(ResolverKind::Country, text);
        self.cache.fetch_or_compute(key, || {
            let spans = self.entities(text);
            for span in spans.iter().rev() {
                if span.entity_type != EntityType::Geopolitical {
                    continue;
                }
                if let Some(name) = countries::lookup(&span.text) {
                    debug!(candidate = %span.text, country = name, "resolved country");
                    return Some(name.to_string());
                }
            }
            None
        })
    }

    /// Resolve the affiliation text to a canonical institute name from the
    /// reference table.
    ///
    /// Scans ORGANIZATION and FACILITY spans from the end. Per span, an
    /// exact table match returns immediately; otherwise the best fuzzy
    /// match is accepted iff its score reaches [`FUZZY_SCORE_CUTOFF`].
    /// Memoized by (text, table fingerprint).
    pub fn resolve_institute(&self, text: &str, table: &InstituteTable) -> Option<String> {
        let key = CacheKey::with_table(ResolverKind::Institute, text, table.fingerprint());
        self.cache.fetch_or_compute(key, || {
            let spans = self.entities(text);
            for span in spans.iter().rev() {
                if !span.entity_type.is_institutional() {
                    continue;
                }
                if table.contains(&span.text) {
                    debug!(institute = %span.text, "resolved institute (exact)");
                    return Some(span.text.clone());
                }
                if let Some((name, score)) = extract_one(&span.text, table.names(), FUZZY_SCORE_CUTOFF)
                {
                    debug!(candidate = %span.text, institute = name, score, "resolved institute (fuzzy)");
                    return Some(name.to_string());
                }
            }
            None
        })
    }

    /// Map a resolved institute name to its reference identifier.
    ///
    /// `None` institute short-circuits to `None` without touching the
    /// cache or the table. Otherwise the first table entry with a matching
    /// name supplies the identifier. Memoized by (name, table fingerprint).
    pub fn lookup_identifier(
        &self,
        institute: Option<&str>,
        table: &InstituteTable,
    ) -> Option<String> {
        let name = institute?;
        let key = CacheKey::with_table(ResolverKind::Identifier, name, table.fingerprint());
        self.cache
            .fetch_or_compute(key, || table.identifier_of(name).map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockModel;

    fn table() -> InstituteTable {
        InstituteTable::from_pairs([("Sample Institute", "GRID1234"), ("Other Place", "GRID9999")])
            .unwrap()
    }

    #[test]
    fn test_no_entities_resolves_none() {
        let resolver = Resolver::new(MockModel::new("empty"));
        assert_eq!(resolver.resolve_country("no entities here"), None);
        assert_eq!(resolver.resolve_institute("no entities here", &table()), None);
    }

    #[test]
    fn test_last_geopolitical_mention_wins() {
        // Spans in scan order: the model saw "France" first, "Germany" last.
        let mock = MockModel::new("gpe").with_entities(vec![
            Entity::new("France", EntityType::Geopolitical, 0, 6),
            Entity::new("Germany", EntityType::Geopolitical, 20, 27),
        ]);
        let resolver = Resolver::new(mock);
        assert_eq!(
            resolver.resolve_country("Lyon, France ... Berlin, Germany").as_deref(),
            Some("Germany")
        );
    }

    #[test]
    fn test_unrecognized_candidate_does_not_abort_scan() {
        // Rightmost span is not a country; the scan must fall through to
        // the earlier span instead of returning None.
        let mock = MockModel::new("gpe").with_entities(vec![
            Entity::new("France", EntityType::Geopolitical, 0, 6),
            Entity::new("Boston", EntityType::Geopolitical, 10, 16),
        ]);
        let resolver = Resolver::new(mock);
        assert_eq!(
            resolver.resolve_country("France ... Boston").as_deref(),
            Some("France")
        );
    }

    #[test]
    fn test_exact_institute_beats_fuzzy() {
        let mock = MockModel::new("org").with_entities(vec![Entity::new(
            "Sample Institute",
            EntityType::Organization,
            0,
            16,
        )]);
        let resolver = Resolver::new(mock);
        assert_eq!(
            resolver.resolve_institute("Sample Institute", &table()).as_deref(),
            Some("Sample Institute")
        );
    }

    #[test]
    fn test_fuzzy_institute_threshold() {
        let accept = MockModel::new("org").with_entities(vec![Entity::new(
            "Sample Institut",
            EntityType::Organization,
            0,
            15,
        )]);
        let resolver = Resolver::new(accept);
        assert_eq!(
            resolver.resolve_institute("Sample Institut", &table()).as_deref(),
            Some("Sample Institute")
        );

        let reject = MockModel::new("org").with_entities(vec![Entity::new(
            "Zebra Corp",
            EntityType::Organization,
            0,
            10,
        )]);
        let resolver = Resolver::new(reject);
        assert_eq!(resolver.resolve_institute("Zebra Corp", &table()), None);
    }

    #[test]
    fn test_facility_spans_are_candidates() {
        let mock = MockModel::new("fac").with_entities(vec![Entity::new(
            "Sample Institute",
            EntityType::Facility,
            0,
            16,
        )]);
        let resolver = Resolver::new(mock);
        assert_eq!(
            resolver.resolve_institute("Sample Institute", &table()).as_deref(),
            Some("Sample Institute")
        );
    }

    #[test]
    fn test_model_failure_downgrades_to_none() {
        let resolver = Resolver::new(MockModel::new("broken").failing());
        assert_eq!(resolver.resolve_country("anything"), None);
        assert_eq!(resolver.resolve_institute("anything", &table()), None);
    }

    #[test]
    fn test_lookup_identifier_none_short_circuits() {
        let resolver = Resolver::new(MockModel::new("empty"));
        assert_eq!(resolver.lookup_identifier(None, &table()), None);
        // Short-circuit must not leave a cache entry behind.
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_lookup_identifier_joins_table() {
        let resolver = Resolver::new(MockModel::new("empty"));
        assert_eq!(
            resolver.lookup_identifier(Some("Sample Institute"), &table()).as_deref(),
            Some("GRID1234")
        );
        assert_eq!(resolver.lookup_identifier(Some("Unknown"), &table()), None);
    }
}
