use serde::{Deserialize, Serialize};

/// execution parameters for a batch of nearest node queries. none of these
/// change results, only how the batch is scheduled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryEngineConfig {
    /// number of parcels handed to the worker pool at a time. cancellation and
    /// progress are checked between chunks.
    pub chunk_size: usize,
    /// run each chunk on the rayon thread pool
    pub parallelize: bool,
    /// show a progress bar on stderr
    pub progress: bool,
}

impl Default for QueryEngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10_000,
            parallelize: true,
            progress: false,
        }
    }
}
