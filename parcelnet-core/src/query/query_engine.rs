use super::{BatchResult, CancellationToken, QueryEngineConfig, QueryFailure};
use crate::{
    index::NearestNodeSearch,
    model::{NearestMatch, ParcelQuery},
    NearestError,
};
use itertools::Itertools;
use kdam::{Bar, BarExt};
use rayon::prelude::*;

/// runs batches of nearest node queries against a built index.
///
/// the index is borrowed immutably for the lifetime of the engine, so it is complete
/// before the first query runs and cannot change while queries are in flight.
/// a parcel whose query fails is reported in [`BatchResult::failures`] and does not
/// affect the rest of the batch.
pub struct QueryEngine<'a, I: NearestNodeSearch> {
    index: &'a I,
    config: QueryEngineConfig,
    cancellation: CancellationToken,
}

impl<'a, I: NearestNodeSearch> QueryEngine<'a, I> {
    pub fn new(index: &'a I, config: QueryEngineConfig) -> QueryEngine<'a, I> {
        QueryEngine {
            index,
            config,
            cancellation: CancellationToken::default(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> QueryEngine<'a, I> {
        self.cancellation = cancellation;
        self
    }

    /// queries every parcel, chunk by chunk, checking for cancellation between chunks.
    ///
    /// # Arguments
    ///
    /// * `parcels` - parcel centroids to assign to network nodes
    ///
    /// # Returns
    ///
    /// matches and per-parcel failures in input order, or [`NearestError::Cancelled`]
    /// if the cancellation token fired before the batch completed.
    pub fn run(&self, parcels: &[ParcelQuery]) -> Result<BatchResult, NearestError> {
        let mut result = BatchResult {
            matches: Vec::with_capacity(parcels.len()),
            failures: vec![],
        };
        self.for_each_chunk(parcels, |chunk_result| {
            result.extend(chunk_result);
            Ok::<(), NearestError>(())
        })?;
        Ok(result)
    }

    /// queries every parcel chunk by chunk and hands each chunk's result to `f` as soon
    /// as it completes, so callers can write results out without holding the whole batch.
    /// chunks are delivered in input order. an error from `f` stops the batch.
    ///
    /// # Returns
    ///
    /// the number of parcels queried
    pub fn for_each_chunk<E, F>(&self, parcels: &[ParcelQuery], mut f: F) -> Result<usize, E>
    where
        E: From<NearestError>,
        F: FnMut(BatchResult) -> Result<(), E>,
    {
        let total = parcels.len();
        let chunk_size = self.config.chunk_size.max(1);
        let mut bar = if self.config.progress {
            let desc = format!("nearest node search ({})", self.index.metric_type());
            let b = Bar::builder()
                .desc(desc)
                .total(total)
                .build()
                .map_err(|e| NearestError::InternalError(format!("progress bar error: {e}")))?;
            Some(b)
        } else {
            None
        };

        let mut completed = 0;
        let mut failed = 0;
        for chunk in parcels.chunks(chunk_size) {
            if self.cancellation.is_cancelled() {
                if bar.is_some() {
                    eprintln!();
                }
                log::warn!("nearest node search cancelled after {completed} of {total} queries");
                return Err(E::from(NearestError::Cancelled { completed, total }));
            }
            let chunk_result = self.run_chunk(chunk);
            failed += chunk_result.failures.len();
            completed += chunk.len();
            f(chunk_result)?;
            if let Some(b) = bar.as_mut() {
                let _ = b.update(chunk.len());
            }
        }
        if bar.is_some() {
            eprintln!();
        }

        log::debug!(
            "nearest node search finished with {} matches and {failed} failures",
            completed - failed
        );
        Ok(completed)
    }

    /// queries a single chunk without checking for cancellation. results are in input order.
    pub fn run_chunk(&self, chunk: &[ParcelQuery]) -> BatchResult {
        let outcomes: Vec<Result<NearestMatch, QueryFailure>> = if self.config.parallelize {
            chunk.par_iter().map(|p| self.query_one(p)).collect()
        } else {
            chunk.iter().map(|p| self.query_one(p)).collect()
        };
        let (matches, failures): (Vec<_>, Vec<_>) = outcomes.into_iter().partition_result();
        BatchResult { matches, failures }
    }

    fn query_one(&self, parcel: &ParcelQuery) -> Result<NearestMatch, QueryFailure> {
        self.index.query(parcel).map_err(|error| {
            log::warn!("parcel '{}' excluded: {error}", parcel.parcel_id);
            QueryFailure {
                parcel_id: parcel.parcel_id.clone(),
                error,
            }
        })
    }
}
