//! Institute reference table.
//!
//! An ordered list of (name, identifier) pairs loaded once per run and
//! treated as immutable. The table carries a fingerprint computed at
//! construction; resolvers fold it into cache keys so a resolution computed
//! against one table snapshot is never reused against another.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One reference entry: an institute name and its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstituteEntry {
    /// Canonical institute name.
    pub name: String,
    /// Stable identifier for the institute.
    pub id: String,
}

/// The institute reference table.
///
/// Duplicate names are tolerated: lookups return the first occurrence.
#[derive(Debug, Clone)]
pub struct InstituteTable {
    entries: Vec<InstituteEntry>,
    fingerprint: u64,
}

impl InstituteTable {
    /// Build a table from (name, identifier) pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reference`] for an empty table; no resolution can
    /// proceed without reference data.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let entries: Vec<InstituteEntry> = pairs
            .into_iter()
            .map(|(name, id)| InstituteEntry {
                name: name.into(),
                id: id.into(),
            })
            .collect();

        if entries.is_empty() {
            return Err(Error::reference("institute table is empty"));
        }

        let mut hasher = DefaultHasher::new();
        entries.hash(&mut hasher);
        let fingerprint = hasher.finish();

        Ok(Self {
            entries,
            fingerprint,
        })
    }

    /// Snapshot identity of this table's contents.
    ///
    /// Two tables with identical entries in identical order share a
    /// fingerprint; any difference in content or order changes it.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries. Always false for a constructed
    /// table; provided for completeness alongside [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate institute names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Whether `name` appears verbatim in the table.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Identifier of the first entry whose name equals `name`.
    #[must_use]
    pub fn identifier_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id.as_str())
    }
}
