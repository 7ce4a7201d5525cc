use super::join_ops;
use crate::{
    config::{DuplicateParcelPolicy, JoinConfiguration},
    io::{BlockLookupSource, NodeSource, ParcelSource},
    ParcelnetError,
};
use clap::Subcommand;
use parcelnet_core::metric::MetricType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ParcelnetOperation {
    /// assign each parcel its census block and nearest network node. command line
    /// arguments override values read from the configuration file.
    Join {
        /// a .toml or .json run configuration
        #[arg(long)]
        configuration_file: Option<String>,
        /// distance metric, required when no configuration file is given
        #[arg(long, value_enum)]
        metric: Option<MetricType>,
        /// CSV of network nodes with id and x/y columns
        #[arg(long)]
        nodes_file: Option<String>,
        #[arg(long)]
        node_id_column: Option<String>,
        /// CSV or ESRI shapefile (.shp) of parcels
        #[arg(long)]
        parcels_file: Option<String>,
        /// parcel id column for CSV parcels, dbase field name for shapefile parcels
        #[arg(long)]
        parcel_id_column: Option<String>,
        /// CSV of parcel_id,block_id assignments
        #[arg(long)]
        blocks_file: Option<String>,
        #[arg(long)]
        output_file: Option<String>,
        /// CSV listing excluded parcels and the reason
        #[arg(long)]
        rejects_file: Option<String>,
        #[arg(long)]
        chunk_size: Option<usize>,
        #[arg(long, value_enum)]
        duplicate_parcel_policy: Option<DuplicateParcelPolicy>,
        #[arg(long)]
        max_runtime_seconds: Option<u64>,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
        /// run all queries on the calling thread
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
}

impl ParcelnetOperation {
    pub fn run(&self) -> Result<(), ParcelnetError> {
        match self {
            ParcelnetOperation::Join {
                configuration_file,
                metric,
                nodes_file,
                node_id_column,
                parcels_file,
                parcel_id_column,
                blocks_file,
                output_file,
                rejects_file,
                chunk_size,
                duplicate_parcel_policy,
                max_runtime_seconds,
                overwrite,
                sequential,
            } => {
                let mut conf = match configuration_file {
                    Some(f) => JoinConfiguration::try_from(f)?,
                    None => {
                        let metric = metric.ok_or_else(|| missing_argument("metric"))?;
                        let nodes = nodes_file
                            .clone()
                            .ok_or_else(|| missing_argument("nodes-file"))?;
                        let parcels = parcels_file
                            .clone()
                            .ok_or_else(|| missing_argument("parcels-file"))?;
                        let output = output_file
                            .clone()
                            .ok_or_else(|| missing_argument("output-file"))?;
                        JoinConfiguration::new(
                            metric,
                            NodeSource::new(nodes),
                            parcel_source(parcels, parcel_id_column.clone()),
                            output,
                        )
                    }
                };

                if let Some(m) = metric {
                    conf.metric = *m;
                }
                if let Some(f) = nodes_file {
                    conf.nodes.file = f.clone();
                }
                if let Some(c) = node_id_column {
                    conf.nodes.id_column = c.clone();
                }
                match (parcels_file, parcel_id_column) {
                    (Some(f), c) if configuration_file.is_some() => {
                        conf.parcels = parcel_source(f.clone(), c.clone());
                    }
                    (None, Some(c)) => set_parcel_id_column(&mut conf.parcels, c.clone()),
                    _ => {}
                }
                if let Some(f) = blocks_file {
                    conf.blocks = Some(BlockLookupSource::new(f.clone()));
                }
                if let Some(f) = output_file {
                    conf.output_file = f.clone();
                }
                if let Some(f) = rejects_file {
                    conf.rejects_file = Some(f.clone());
                }
                if let Some(n) = chunk_size {
                    conf.chunk_size = *n;
                }
                if let Some(p) = duplicate_parcel_policy {
                    conf.duplicate_parcel_policy = *p;
                }
                if let Some(s) = max_runtime_seconds {
                    conf.max_runtime_seconds = Some(*s);
                }
                conf.overwrite = conf.overwrite || *overwrite;
                conf.parallelize = conf.parallelize && !*sequential;

                log::info!(
                    "joining parcels from {} to nodes from {} with {} metric",
                    conf.parcels.file(),
                    conf.nodes.file,
                    conf.metric
                );
                let summary = join_ops::run(&conf, true)?;
                println!("{summary}");
                Ok(())
            }
        }
    }
}

fn missing_argument(name: &str) -> ParcelnetError {
    ParcelnetError::ConfigurationError(format!(
        "--{name} is required when no --configuration-file is provided"
    ))
}

/// shapefiles are detected by extension, everything else is read as CSV
fn parcel_source(file: String, id_column: Option<String>) -> ParcelSource {
    if file.to_lowercase().ends_with(".shp") {
        ParcelSource::Shapefile {
            file,
            id_field: id_column.unwrap_or_else(|| String::from("parcel_id")),
        }
    } else {
        let mut source = ParcelSource::new_csv(file);
        if let Some(c) = id_column {
            set_parcel_id_column(&mut source, c);
        }
        source
    }
}

fn set_parcel_id_column(source: &mut ParcelSource, column: String) {
    match source {
        ParcelSource::Csv { id_column, .. } => *id_column = column,
        ParcelSource::Shapefile { id_field, .. } => *id_field = column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcel_source_by_extension() {
        match parcel_source(String::from("parcels.SHP"), Some(String::from("APN"))) {
            ParcelSource::Shapefile { id_field, .. } => assert_eq!(id_field, "APN"),
            other => panic!("expected shapefile source, found {other:?}"),
        }
        match parcel_source(String::from("parcels.csv.gz"), None) {
            ParcelSource::Csv { id_column, .. } => assert_eq!(id_column, "parcel_id"),
            other => panic!("expected csv source, found {other:?}"),
        }
    }

    #[test]
    fn test_metric_required_without_configuration() {
        let op = ParcelnetOperation::Join {
            configuration_file: None,
            metric: None,
            nodes_file: Some(String::from("nodes.csv")),
            node_id_column: None,
            parcels_file: Some(String::from("parcels.csv")),
            parcel_id_column: None,
            blocks_file: None,
            output_file: Some(String::from("out.csv")),
            rejects_file: None,
            chunk_size: None,
            duplicate_parcel_policy: None,
            max_runtime_seconds: None,
            overwrite: false,
            sequential: false,
        };
        match op.run() {
            Err(ParcelnetError::ConfigurationError(msg)) => assert!(msg.contains("--metric")),
            other => panic!("expected configuration error, found {other:?}"),
        }
    }
}
