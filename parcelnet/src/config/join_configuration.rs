use super::DuplicateParcelPolicy;
use crate::{
    io::{BlockLookupSource, NodeSource, ParcelSource},
    ParcelnetError,
};
use parcelnet_core::{metric::MetricType, query::QueryEngineConfig};
use serde::{Deserialize, Serialize};

mod default {
    pub fn chunk_size() -> usize {
        10_000
    }

    pub fn parallelize() -> bool {
        true
    }

    pub fn planar_latitude_warning_span() -> f64 {
        5.0
    }
}

/// defines a parcel enrichment run. the metric has no default, every run
/// states whether it measures planar or geodesic distance.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct JoinConfiguration {
    pub metric: MetricType,
    pub nodes: NodeSource,
    pub parcels: ParcelSource,
    #[serde(default)]
    pub blocks: Option<BlockLookupSource>,
    pub output_file: String,
    /// optional CSV listing parcels excluded from the output and why
    #[serde(default)]
    pub rejects_file: Option<String>,
    #[serde(default = "default::chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default::parallelize")]
    pub parallelize: bool,
    #[serde(default)]
    pub duplicate_parcel_policy: DuplicateParcelPolicy,
    /// latitude span in degrees above which planar search on degree coordinates logs a warning
    #[serde(default = "default::planar_latitude_warning_span")]
    pub planar_latitude_warning_span: f64,
    /// stops the nearest node search between chunks once this many seconds have passed
    #[serde(default)]
    pub max_runtime_seconds: Option<u64>,
    #[serde(default)]
    pub overwrite: bool,
}

impl JoinConfiguration {
    pub fn new(
        metric: MetricType,
        nodes: NodeSource,
        parcels: ParcelSource,
        output_file: String,
    ) -> JoinConfiguration {
        JoinConfiguration {
            metric,
            nodes,
            parcels,
            blocks: None,
            output_file,
            rejects_file: None,
            chunk_size: default::chunk_size(),
            parallelize: default::parallelize(),
            duplicate_parcel_policy: DuplicateParcelPolicy::default(),
            planar_latitude_warning_span: default::planar_latitude_warning_span(),
            max_runtime_seconds: None,
            overwrite: false,
        }
    }

    pub fn query_engine_config(&self, progress: bool) -> QueryEngineConfig {
        QueryEngineConfig {
            chunk_size: self.chunk_size,
            parallelize: self.parallelize,
            progress,
        }
    }

    pub fn validate(&self) -> Result<(), ParcelnetError> {
        if self.chunk_size == 0 {
            return Err(ParcelnetError::ConfigurationError(String::from(
                "chunk_size must be greater than zero",
            )));
        }
        if !self.planar_latitude_warning_span.is_finite() || self.planar_latitude_warning_span < 0.0
        {
            return Err(ParcelnetError::ConfigurationError(format!(
                "planar_latitude_warning_span must be a non-negative number, found {}",
                self.planar_latitude_warning_span
            )));
        }
        if Some(&self.output_file) == self.rejects_file.as_ref() {
            return Err(ParcelnetError::ConfigurationError(format!(
                "output_file and rejects_file must differ, both are {}",
                self.output_file
            )));
        }
        Ok(())
    }
}

impl TryFrom<&String> for JoinConfiguration {
    type Error = ParcelnetError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let conf: JoinConfiguration = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                ParcelnetError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                ParcelnetError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                ParcelnetError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                ParcelnetError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(ParcelnetError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        conf.validate()?;
        Ok(conf)
    }
}
