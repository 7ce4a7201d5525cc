use super::JoinSummary;
use crate::{
    assemble::{self, ParcelOutputRow, RejectedParcelRow, RowWriter},
    config::{DuplicateParcelPolicy, JoinConfiguration},
    io::BlockLookup,
    ParcelnetError,
};
use parcelnet_core::{
    index::{NearestNodeSearch, NodeIndex},
    metric::metric_ops,
    model::{ParcelId, ParcelQuery},
    query::{CancellationToken, QueryEngine},
    NearestError, RecordKind,
};
use std::{
    collections::HashSet,
    path::Path,
    time::{Duration, Instant},
};

const MISSING_GEOMETRY: &str = "missing geometry";
const DUPLICATE_PARCEL: &str = "duplicate parcel id";

/// runs a full parcel enrichment: reads nodes and builds the spatial index, reads the
/// block lookup and parcels, then searches for the nearest node of every parcel chunk
/// by chunk. each chunk's joined rows and rejected parcels are written out before the
/// next chunk is queried.
///
/// # Arguments
///
/// * `conf` - the run configuration
/// * `progress` - show a progress bar during the nearest node search
///
/// # Returns
///
/// counts of matched and rejected parcels
pub fn run(conf: &JoinConfiguration, progress: bool) -> Result<JoinSummary, ParcelnetError> {
    conf.validate()?;
    check_output_available(&conf.output_file, conf.overwrite)?;
    if let Some(rejects_file) = &conf.rejects_file {
        check_output_available(rejects_file, conf.overwrite)?;
    }

    let nodes = conf.nodes.read()?;
    if let Some(msg) =
        metric_ops::planar_distortion_warning(conf.metric, &nodes, conf.planar_latitude_warning_span)
    {
        log::warn!("{msg}");
    }
    let index = NodeIndex::build(&nodes, conf.metric)?;
    log::info!(
        "built {} spatial index over {} nodes",
        index.metric_type(),
        index.len()
    );

    let blocks = conf
        .blocks
        .as_ref()
        .map(BlockLookup::try_from)
        .transpose()?;

    let parcel_read = conf.parcels.read()?;
    let parcels_read = parcel_read.parcels.len() + parcel_read.missing_geometry.len();
    let (parcels, duplicates) =
        deduplicate_parcels(parcel_read.parcels, conf.duplicate_parcel_policy)?;

    let mut output = RowWriter::<ParcelOutputRow>::create(&conf.output_file, conf.overwrite)?;
    let mut rejects = conf
        .rejects_file
        .as_ref()
        .map(|f| RowWriter::<RejectedParcelRow>::create(f, conf.overwrite))
        .transpose()?;
    let mut rejected_count: usize = 0;
    let mut reject = |parcel_id: &ParcelId, reason: &str| -> Result<(), ParcelnetError> {
        rejected_count += 1;
        match rejects.as_mut() {
            Some(writer) => writer.write(&RejectedParcelRow {
                parcel_id: parcel_id.to_string(),
                reason: String::from(reason),
            }),
            None => Ok(()),
        }
    };
    for parcel_id in parcel_read.missing_geometry.iter() {
        reject(parcel_id, MISSING_GEOMETRY)?;
    }
    for parcel_id in duplicates.iter() {
        reject(parcel_id, DUPLICATE_PARCEL)?;
    }

    let cancellation = match conf.max_runtime_seconds {
        Some(secs) => CancellationToken::with_deadline(Instant::now() + Duration::from_secs(secs)),
        None => CancellationToken::new(),
    };
    let engine = QueryEngine::new(&index, conf.query_engine_config(progress))
        .with_cancellation(cancellation);
    let mut matched = 0;
    let mut query_failures = 0;
    let mut missing_block = 0;
    engine.for_each_chunk(&parcels, |chunk| {
        for failure in chunk.failures.iter() {
            reject(&failure.parcel_id, failure.error.to_string().as_str())?;
        }
        query_failures += chunk.failures.len();
        let assembled = assemble::assemble(chunk.matches, blocks.as_ref());
        output.write_all(assembled.rows.iter())?;
        matched += assembled.rows.len();
        missing_block += assembled.missing_block;
        Ok::<(), ParcelnetError>(())
    })?;

    output.finish()?;
    if let Some(writer) = rejects {
        writer.finish()?;
    } else if rejected_count > 0 {
        log::info!("{rejected_count} parcels rejected, set rejects_file to list them");
    }
    if blocks.is_some() && missing_block > 0 {
        log::warn!("{missing_block} matched parcels have no entry in the block lookup");
    }

    let summary = JoinSummary {
        nodes: index.len(),
        parcels_read,
        matched,
        missing_geometry: parcel_read.missing_geometry.len(),
        duplicate_parcels: duplicates.len(),
        query_failures,
        missing_block,
    };
    log::info!("{summary}");
    Ok(summary)
}

/// keeps the first occurrence of each parcel id. under [`DuplicateParcelPolicy::Fail`]
/// any repeat is an error, otherwise repeats are logged and returned for reporting.
pub fn deduplicate_parcels(
    parcels: Vec<ParcelQuery>,
    policy: DuplicateParcelPolicy,
) -> Result<(Vec<ParcelQuery>, Vec<ParcelId>), NearestError> {
    let mut seen: HashSet<ParcelId> = HashSet::with_capacity(parcels.len());
    let mut unique = Vec::with_capacity(parcels.len());
    let mut duplicates = vec![];
    for parcel in parcels.into_iter() {
        if seen.insert(parcel.parcel_id.clone()) {
            unique.push(parcel);
            continue;
        }
        match policy {
            DuplicateParcelPolicy::Fail => {
                return Err(NearestError::DuplicateKey {
                    kind: RecordKind::Parcel,
                    id: parcel.parcel_id.to_string(),
                });
            }
            DuplicateParcelPolicy::Skip => {
                log::warn!(
                    "skipping repeated parcel id {}, keeping its first occurrence",
                    parcel.parcel_id
                );
                duplicates.push(parcel.parcel_id);
            }
        }
    }
    Ok((unique, duplicates))
}

fn check_output_available(file: &str, overwrite: bool) -> Result<(), ParcelnetError> {
    if !overwrite && Path::new(file).exists() {
        return Err(ParcelnetError::OutputExists(String::from(file)));
    }
    Ok(())
}
