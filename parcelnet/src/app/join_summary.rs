use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// counts reported at the end of a parcel enrichment run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinSummary {
    pub nodes: usize,
    pub parcels_read: usize,
    pub matched: usize,
    pub missing_geometry: usize,
    pub duplicate_parcels: usize,
    pub query_failures: usize,
    /// matched parcels without an entry in the block lookup
    pub missing_block: usize,
}

impl JoinSummary {
    /// parcels excluded from the output
    pub fn rejected(&self) -> usize {
        self.missing_geometry + self.duplicate_parcels + self.query_failures
    }
}

impl Display for JoinSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} parcels read, {} matched to {} nodes, {} rejected ({} missing geometry, {} duplicate, {} failed query), {} without block",
            self.parcels_read,
            self.matched,
            self.nodes,
            self.rejected(),
            self.missing_geometry,
            self.duplicate_parcels,
            self.query_failures,
            self.missing_block
        )
    }
}
