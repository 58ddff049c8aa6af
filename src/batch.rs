//! Parallel batch orchestration.
//!
//! Rows are independent: each worker reads its own row plus the shared
//! read-only table and the shared cache. `par_iter_mut` writes results in
//! place, so output order is input order regardless of worker scheduling.

use rayon::prelude::*;
use tracing::debug;

use crate::record::Record;
use crate::resolve::Resolver;
use crate::table::InstituteTable;

impl Resolver {
    /// Compute the country, institute, and institute_id columns for every
    /// record, in parallel across rows.
    ///
    /// Within a row, the identifier join is sequenced after institute
    /// resolution (it consumes the resolved name); country resolution has
    /// no such dependency. A row that resolves nothing carries `None` in
    /// the derived columns; no row-level outcome is an error.
    #[must_use]
    pub fn resolve_batch(&self, mut records: Vec<Record>, table: &InstituteTable) -> Vec<Record> {
        debug!(rows = records.len(), table_len = table.len(), "resolving batch");
        records.par_iter_mut().for_each(|record| {
            record.country = self.resolve_country(&record.affiliation);
            record.institute = self.resolve_institute(&record.affiliation, table);
            record.institute_id = self.lookup_identifier(record.institute.as_deref(), table);
        });
        records
    }
}
