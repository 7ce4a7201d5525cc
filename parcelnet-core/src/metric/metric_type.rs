use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// selects the distance function and coordinate conversion used by a spatial index.
///
/// planar search treats x/y as linear units and is fast, but when used on raw
/// longitude/latitude degrees it is distorted away from the equator. geodesic search
/// reads x/y as longitude/latitude degrees and orders nodes by great-circle distance.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Planar,
    Geodesic,
}

impl Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricType::Planar => write!(f, "planar"),
            MetricType::Geodesic => write!(f, "geodesic"),
        }
    }
}

impl TryFrom<&str> for MetricType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "planar" | "euclidean" => Ok(MetricType::Planar),
            "geodesic" | "haversine" => Ok(MetricType::Geodesic),
            other => Err(format!(
                "unknown metric '{other}', must be one of 'planar' or 'geodesic'"
            )),
        }
    }
}
